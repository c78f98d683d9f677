//! Data models for the contacts domain.
//!
//! A [`Contact`] is the root entity; [`Phone`] and [`Address`] records are
//! owned by exactly one contact and carry a back-reference to it.

pub mod address;
pub mod contact;
pub mod phone;

pub use address::{Address, AddressType};
pub use contact::Contact;
pub use phone::{Phone, PhoneType};
