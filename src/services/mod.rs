//! Application service layer.
//!
//! Services sit between the HTTP handlers and the data access layer. The
//! handlers only ever see the [`ContactManager`] trait.

mod contact_manager;

pub use contact_manager::{ContactManager, ContactManagerImpl, SaveRejection};
