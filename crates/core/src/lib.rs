//! Artisan Corner domain logic.
//!
//! Everything in here is free of I/O and of other workspace crates so the
//! API server, the repository layer and any future front-end tooling can
//! share it:
//!
//! - [`catalog`]: product filtering by category and search text.
//! - [`gallery`]: the auto-advancing image gallery state machine and its
//!   async driver.
//! - [`contact`]: contact form payload and validation.

pub mod catalog;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod types;
