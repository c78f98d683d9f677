//! Contact model representing a person.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, Phone};

/// A contact record.
///
/// `contact_id` is assigned by the store. A value of `0` marks a contact that
/// has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// Unique identifier for the contact
    pub contact_id: i32,

    /// First name
    pub first_name: String,

    /// Middle name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    /// Last name
    pub last_name: String,

    /// Primary email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,

    /// Date of birth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,

    /// Free-form notes about the contact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Profile image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// When the contact was first stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,

    /// When the contact was last saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,

    /// Phone numbers owned by this contact
    pub phones: Vec<Phone>,

    /// Addresses owned by this contact
    pub addresses: Vec<Address>,
}

impl Contact {
    /// Create an unsaved contact with just a name.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    /// Whether the store has assigned an id to this contact yet.
    pub fn is_new(&self) -> bool {
        self.contact_id == 0
    }

    /// Point every phone and address at this contact's id.
    pub fn bind_children(&mut self) {
        let contact_id = self.contact_id;
        for phone in &mut self.phones {
            phone.contact_id = contact_id;
        }
        for address in &mut self.addresses {
            address.contact_id = contact_id;
        }
    }

    /// Give every phone and address with id `0` the next free id within
    /// this contact. Explicit ids are left alone.
    ///
    /// Returns `false` and changes nothing when the new ids would not fit in
    /// an `i32`.
    pub fn assign_child_ids(&mut self) -> bool {
        let phone_start = first_free_id(self.phones.iter().map(|p| p.phone_id));
        let address_start = first_free_id(self.addresses.iter().map(|a| a.address_id));
        let (Some(phone_start), Some(address_start)) = (phone_start, address_start) else {
            return false;
        };

        let mut next = phone_start;
        for phone in self.phones.iter_mut().filter(|p| p.phone_id == 0) {
            phone.phone_id = next;
            next = next.saturating_add(1);
        }
        let mut next = address_start;
        for address in self.addresses.iter_mut().filter(|a| a.address_id == 0) {
            address.address_id = next;
            next = next.saturating_add(1);
        }
        true
    }
}

/// First id to hand out after the largest existing one, or `None` if the
/// unassigned (`0`) ids would run past `i32::MAX`.
fn first_free_id(ids: impl Iterator<Item = i32>) -> Option<i32> {
    let (max, unassigned) = ids.fold((0, 0i32), |(max, zeros), id| {
        (max.max(id), zeros.saturating_add(i32::from(id == 0)))
    });
    if unassigned == 0 {
        return Some(max.saturating_add(1));
    }
    max.checked_add(unassigned)?;
    Some(max + 1)
}
