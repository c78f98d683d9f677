use crate::error::StoreResult;
use crate::models::{Address, Contact, Phone};
use async_trait::async_trait;

/// Storage for contacts and their phones and addresses.
///
/// Provides abstraction over contact persistence, enabling different
/// implementations (SQLite, in-memory, mock). Lookups signal "not found"
/// with `None` or `false`; `Err` is reserved for storage faults.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// All contacts ordered by id, with phones and addresses populated.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    /// A single contact with phones and addresses populated.
    async fn get(&self, contact_id: i32) -> StoreResult<Option<Contact>>;

    /// Contacts whose names match the given criteria.
    ///
    /// Criteria are trimmed. A blank criterion matches every contact; a
    /// non-blank one must equal the field, ignoring case.
    async fn search(&self, first_name: &str, last_name: &str) -> StoreResult<Vec<Contact>>;

    /// Insert or replace a contact.
    ///
    /// A contact with id `0` is inserted under a fresh id. Any other id
    /// replaces the stored record and its children, or yields `None` when no
    /// such contact exists.
    async fn save(&self, contact: &Contact) -> StoreResult<Option<Contact>>;

    /// Delete a contact and its children. Returns whether it existed.
    async fn delete(&self, contact_id: i32) -> StoreResult<bool>;

    /// Phones of a contact; empty when the contact does not exist.
    async fn list_phones(&self, contact_id: i32) -> StoreResult<Vec<Phone>>;

    /// A phone, only if it belongs to the given contact.
    async fn get_phone(&self, contact_id: i32, phone_id: i32) -> StoreResult<Option<Phone>>;

    /// Addresses of a contact; empty when the contact does not exist.
    async fn list_addresses(&self, contact_id: i32) -> StoreResult<Vec<Address>>;

    /// An address, only if it belongs to the given contact.
    async fn get_address(&self, contact_id: i32, address_id: i32)
        -> StoreResult<Option<Address>>;
}

/// Padding stripped from names and search criteria.
///
/// Kept to the characters SQLite's `TRIM` is given so every store agrees.
pub(crate) const NAME_PADDING: &[char] = &[' ', '\t', '\r', '\n'];

/// Strip [`NAME_PADDING`] from both ends.
pub(crate) fn trim_name(name: &str) -> &str {
    name.trim_matches(NAME_PADDING)
}

/// Name matching shared by the stores that filter in Rust.
pub(crate) fn name_matches(criterion: &str, value: &str) -> bool {
    let criterion = trim_name(criterion);
    criterion.is_empty() || criterion.eq_ignore_ascii_case(trim_name(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches() {
        assert!(name_matches("", "Ada"));
        assert!(name_matches("   ", "Ada"));
        assert!(name_matches("ada", "Ada"));
        assert!(name_matches(" ADA ", "Ada"));
        assert!(!name_matches("Ad", "Ada"));
        assert!(!name_matches("Grace", "Ada"));
        assert!(name_matches("Ada", "Ada\t"));
        assert!(name_matches("\nAda", "Ada"));
    }

    #[test]
    fn test_trim_name_keeps_other_whitespace() {
        assert_eq!(trim_name(" \tAda\r\n"), "Ada");
        assert_eq!(trim_name("\u{00A0}Ada"), "\u{00A0}Ada");
    }
}
