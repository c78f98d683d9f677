//! HTTP handlers for the contacts API.
//!
//! Each handler makes exactly one contact manager call and maps the result:
//! `None`/`false` become 404, a refused save becomes a 500 problem. A body
//! that does not read as a contact is a 400 before the manager is called.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::models::{Address, Contact, Phone};
use crate::server::responses::{ApiError, Created};
use crate::server::AppState;

/// Route prefix for the contacts resource.
pub const CONTACTS_PATH: &str = "/api/contacts";

/// Detail reported when the contact manager refuses a save.
pub const SAVE_FAILED: &str = "Failed to insert the contact";

/// Query string for contact search.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List every contact.
pub async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    debug!("List contacts request");
    let contacts = state.contact_manager.list_contacts().await?;
    Ok(Json(contacts))
}

/// Get one contact by id.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Contact>, ApiError> {
    debug!(contact_id = id, "Get contact request");
    state
        .contact_manager
        .get_contact(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Search contacts by first and last name.
pub async fn search_contacts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let first_name = params.first_name.as_deref().unwrap_or_default();
    let last_name = params.last_name.as_deref().unwrap_or_default();
    debug!(first_name, last_name, "Search contacts request");

    let contacts = state
        .contact_manager
        .search_contacts(first_name, last_name)
        .await?;
    Ok(Json(contacts))
}

/// Save a contact and point `Location` at it.
pub async fn save_contact(
    State(state): State<AppState>,
    payload: Result<Json<Contact>, JsonRejection>,
) -> Result<Created<Contact>, ApiError> {
    let Json(contact) = payload?;
    debug!(contact_id = contact.contact_id, "Save contact request");

    match state.contact_manager.save_contact(&contact).await? {
        Some(saved) => {
            let location = format!("{}/{}", CONTACTS_PATH, saved.contact_id);
            Ok(Created::new(saved).with_location(location))
        }
        None => Err(ApiError::Problem(SAVE_FAILED.to_string())),
    }
}

/// Delete a contact and its phones and addresses.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    debug!(contact_id = id, "Delete contact request");

    if state.contact_manager.delete_contact(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// List the phones of a contact.
pub async fn list_phones(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Phone>>, ApiError> {
    debug!(contact_id = id, "List phones request");
    let phones = state.contact_manager.list_phones(id).await?;
    Ok(Json(phones))
}

/// Get one phone of a contact.
pub async fn get_phone(
    State(state): State<AppState>,
    Path((id, phone_id)): Path<(i32, i32)>,
) -> Result<Json<Phone>, ApiError> {
    debug!(contact_id = id, phone_id, "Get phone request");
    state
        .contact_manager
        .get_phone(id, phone_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// List the addresses of a contact.
pub async fn list_addresses(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Address>>, ApiError> {
    debug!(contact_id = id, "List addresses request");
    let addresses = state.contact_manager.list_addresses(id).await?;
    Ok(Json(addresses))
}

/// Get one address of a contact.
pub async fn get_address(
    State(state): State<AppState>,
    Path((id, address_id)): Path<(i32, i32)>,
) -> Result<Json<Address>, ApiError> {
    debug!(contact_id = id, address_id, "Get address request");
    state
        .contact_manager
        .get_address(id, address_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
