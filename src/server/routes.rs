//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{routing::get, Router};

use crate::server::handlers::{
    delete_contact, get_address, get_contact, get_phone, health, list_addresses, list_contacts,
    list_phones, save_contact, search_contacts,
};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Contacts
        .route("/api/contacts", get(list_contacts).post(save_contact))
        .route("/api/contacts/search", get(search_contacts))
        .route("/api/contacts/{id}", get(get_contact).delete(delete_contact))
        // Phones
        .route("/api/contacts/{id}/phones", get(list_phones))
        .route("/api/contacts/{id}/phones/{phone_id}", get(get_phone))
        // Addresses
        .route("/api/contacts/{id}/addresses", get(list_addresses))
        .route("/api/contacts/{id}/addresses/{address_id}", get(get_address))
}
