//! Postal address records owned by a contact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum AddressType {
    #[default]
    Home,
    Work,
    Billing,
    Shipping,
    Other,
}

impl AddressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Work => "Work",
            Self::Billing => "Billing",
            Self::Shipping => "Shipping",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Home" => Ok(Self::Home),
            "Work" => Ok(Self::Work),
            "Billing" => Ok(Self::Billing),
            "Shipping" => Ok(Self::Shipping),
            "Other" => Ok(Self::Other),
            other => Err(format!("unknown address type: {}", other)),
        }
    }
}

/// A postal address belonging to a contact.
///
/// `address_id` is unique within the parent contact only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address_id: i32,

    /// Back-reference to the owning contact
    pub contact_id: i32,

    pub street_address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_address: Option<String>,

    pub city: String,

    pub state: String,

    pub postal_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    pub address_type: AddressType,
}
