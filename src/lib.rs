//! Contacts API - a REST service for managing contacts, their phone numbers,
//! and addresses.
//!
//! The HTTP layer is a thin mapping onto a contact manager: it parses
//! requests, makes one manager call, and turns the result into a status code.
//!
//! # Architecture
//!
//! - **models**: Contact, Phone and Address records
//! - **domain**: Validated value objects (email, phone number)
//! - **error**: Store and configuration error types
//! - **config**: Configuration from environment variables
//! - **repositories**: Contact storage (SQLite, in-memory)
//! - **services**: The contact manager the handlers depend on
//! - **server**: axum routes, handlers, and responses

pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::{Config, StoreKind};
pub use error::{ConfigError, StoreError};
pub use models::{Address, AddressType, Contact, Phone, PhoneType};
pub use repositories::{ContactRepository, InMemoryContactRepository, SqliteContactRepository};
pub use server::{app, run_server, ApiError};
pub use services::{ContactManager, ContactManagerImpl};
