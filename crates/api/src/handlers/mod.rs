pub mod categories;
pub mod contact;
pub mod products;
pub mod toasts;
