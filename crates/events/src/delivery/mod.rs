//! External delivery channels.

pub mod crm;
