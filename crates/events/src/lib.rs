//! Artisan Corner visitor notifications and outbound delivery.
//!
//! - [`ToastBus`]: fans transient user-facing [`Toast`]s out to whoever is
//!   rendering them. It is handed around through application state;
//!   nothing is global.
//! - [`delivery`]: forwarding contact submissions to a CRM.

pub mod delivery;
pub mod toast;

pub use delivery::crm::{BrevoContactSink, ContactSink, CrmError, LogContactSink};
pub use toast::{Toast, ToastBus, ToastKind, ToastVariant};
