//! Domain value objects.
//!
//! Validated wrappers for the contact fields the contact manager checks
//! before a save reaches the store.

pub mod email;
pub mod errors;
pub mod phone;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::PhoneNumber;
