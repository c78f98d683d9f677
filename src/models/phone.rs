//! Phone number records owned by a contact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of phone number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PhoneType {
    Home,
    Work,
    #[default]
    Mobile,
    Fax,
    Other,
}

impl PhoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Work => "Work",
            Self::Mobile => "Mobile",
            Self::Fax => "Fax",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhoneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Home" => Ok(Self::Home),
            "Work" => Ok(Self::Work),
            "Mobile" => Ok(Self::Mobile),
            "Fax" => Ok(Self::Fax),
            "Other" => Ok(Self::Other),
            other => Err(format!("unknown phone type: {}", other)),
        }
    }
}

/// A phone number belonging to a contact.
///
/// `phone_id` is unique within the parent contact only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Phone {
    pub phone_id: i32,

    /// Back-reference to the owning contact
    pub contact_id: i32,

    pub phone_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    pub phone_type: PhoneType,
}

impl Phone {
    /// Create an unsaved phone number.
    pub fn new(phone_number: impl Into<String>, phone_type: PhoneType) -> Self {
        Self {
            phone_number: phone_number.into(),
            phone_type,
            ..Default::default()
        }
    }
}
