//! Contact manager service layer.
//!
//! The capability the HTTP handlers depend on, plus the default
//! implementation that applies save rules before delegating to a
//! [`ContactRepository`].

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{EmailAddress, PhoneNumber, ValidationError};
use crate::error::StoreResult;
use crate::models::{Address, Contact, Phone};
use crate::repositories::ContactRepository;

/// Contact management operations.
///
/// Single-item lookups return `None` when nothing matches and delete returns
/// `false` when there was nothing to delete. `Err` means the store failed.
#[async_trait]
pub trait ContactManager: Send + Sync {
    /// All contacts.
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// A contact by id.
    async fn get_contact(&self, contact_id: i32) -> StoreResult<Option<Contact>>;

    /// Contacts matching a first and last name. Blank criteria match anything.
    async fn search_contacts(&self, first_name: &str, last_name: &str)
        -> StoreResult<Vec<Contact>>;

    /// Insert or update a contact. `None` means the contact was not saved.
    async fn save_contact(&self, contact: &Contact) -> StoreResult<Option<Contact>>;

    /// Delete a contact. `false` means it did not exist.
    async fn delete_contact(&self, contact_id: i32) -> StoreResult<bool>;

    /// Phones of a contact.
    async fn list_phones(&self, contact_id: i32) -> StoreResult<Vec<Phone>>;

    /// A phone that belongs to the given contact.
    async fn get_phone(&self, contact_id: i32, phone_id: i32) -> StoreResult<Option<Phone>>;

    /// Addresses of a contact.
    async fn list_addresses(&self, contact_id: i32) -> StoreResult<Vec<Address>>;

    /// An address that belongs to the given contact.
    async fn get_address(&self, contact_id: i32, address_id: i32)
        -> StoreResult<Option<Address>>;
}

/// Why a save was refused before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRejection {
    NegativeId(i32),
    Invalid(ValidationError),
    ForeignChild { kind: &'static str, contact_id: i32 },
    DuplicateChildId { kind: &'static str, id: i32 },
}

impl std::fmt::Display for SaveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeId(id) => write!(f, "contact id {} is negative", id),
            Self::Invalid(err) => write!(f, "{}", err),
            Self::ForeignChild { kind, contact_id } => {
                write!(f, "{} belongs to another contact ({})", kind, contact_id)
            }
            Self::DuplicateChildId { kind, id } => write!(f, "duplicate {} id {}", kind, id),
        }
    }
}

impl From<ValidationError> for SaveRejection {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

/// Default implementation of ContactManager.
pub struct ContactManagerImpl {
    repository: Arc<dyn ContactRepository>,
}

impl ContactManagerImpl {
    /// Create a new contact manager over the given repository.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    /// Check a contact against the save rules.
    ///
    /// Returns the contact as it should be stored: email and phone numbers
    /// trimmed, and a blank email dropped.
    pub fn validate(contact: &Contact) -> Result<Contact, SaveRejection> {
        if contact.contact_id < 0 {
            return Err(SaveRejection::NegativeId(contact.contact_id));
        }
        if contact.first_name.trim().is_empty() {
            return Err(ValidationError::BlankName("firstName").into());
        }
        if contact.last_name.trim().is_empty() {
            return Err(ValidationError::BlankName("lastName").into());
        }

        let mut prepared = contact.clone();
        prepared.email_address = match contact.email_address.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                Some(EmailAddress::new(email)?.into_inner())
            }
            _ => None,
        };

        let mut phone_ids = HashSet::new();
        for phone in &mut prepared.phones {
            phone.phone_number = PhoneNumber::new(phone.phone_number.as_str())?.into_inner();
            Self::check_child("phone", phone.contact_id, phone.phone_id, contact, &mut phone_ids)?;
        }

        let mut address_ids = HashSet::new();
        for address in &prepared.addresses {
            Self::check_child(
                "address",
                address.contact_id,
                address.address_id,
                contact,
                &mut address_ids,
            )?;
        }

        Ok(prepared)
    }

    fn check_child(
        kind: &'static str,
        child_contact_id: i32,
        child_id: i32,
        parent: &Contact,
        seen: &mut HashSet<i32>,
    ) -> Result<(), SaveRejection> {
        if child_contact_id != 0 && child_contact_id != parent.contact_id {
            return Err(SaveRejection::ForeignChild {
                kind,
                contact_id: child_contact_id,
            });
        }
        if child_id != 0 && !seen.insert(child_id) {
            return Err(SaveRejection::DuplicateChildId { kind, id: child_id });
        }
        Ok(())
    }
}

#[async_trait]
impl ContactManager for ContactManagerImpl {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        self.repository.list().await
    }

    async fn get_contact(&self, contact_id: i32) -> StoreResult<Option<Contact>> {
        self.repository.get(contact_id).await
    }

    async fn search_contacts(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Vec<Contact>> {
        self.repository.search(first_name, last_name).await
    }

    async fn save_contact(&self, contact: &Contact) -> StoreResult<Option<Contact>> {
        let prepared = match Self::validate(contact) {
            Ok(prepared) => prepared,
            Err(rejection) => {
                warn!(contact_id = contact.contact_id, %rejection, "Contact rejected");
                return Ok(None);
            }
        };

        let saved = self.repository.save(&prepared).await?;
        match &saved {
            Some(c) => debug!(contact_id = c.contact_id, "Contact saved"),
            None => warn!(contact_id = contact.contact_id, "Contact not saved by store"),
        }
        Ok(saved)
    }

    async fn delete_contact(&self, contact_id: i32) -> StoreResult<bool> {
        let deleted = self.repository.delete(contact_id).await?;
        if deleted {
            debug!(contact_id, "Contact deleted");
        }
        Ok(deleted)
    }

    async fn list_phones(&self, contact_id: i32) -> StoreResult<Vec<Phone>> {
        self.repository.list_phones(contact_id).await
    }

    async fn get_phone(&self, contact_id: i32, phone_id: i32) -> StoreResult<Option<Phone>> {
        self.repository.get_phone(contact_id, phone_id).await
    }

    async fn list_addresses(&self, contact_id: i32) -> StoreResult<Vec<Address>> {
        self.repository.list_addresses(contact_id).await
    }

    async fn get_address(
        &self,
        contact_id: i32,
        address_id: i32,
    ) -> StoreResult<Option<Address>> {
        self.repository.get_address(contact_id, address_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhoneType;
    use crate::repositories::InMemoryContactRepository;

    fn manager() -> ContactManagerImpl {
        ContactManagerImpl::new(Arc::new(InMemoryContactRepository::new()))
    }

    #[test]
    fn test_validate_accepts_minimal_contact() {
        assert!(ContactManagerImpl::validate(&Contact::new("Ada", "Lovelace")).is_ok());
    }

    #[test]
    fn test_validate_rules() {
        let blank = Contact::new(" ", "Lovelace");
        assert_eq!(
            ContactManagerImpl::validate(&blank),
            Err(SaveRejection::Invalid(ValidationError::BlankName("firstName")))
        );

        let mut negative = Contact::new("Ada", "Lovelace");
        negative.contact_id = -1;
        assert_eq!(
            ContactManagerImpl::validate(&negative),
            Err(SaveRejection::NegativeId(-1))
        );

        let mut bad_email = Contact::new("Ada", "Lovelace");
        bad_email.email_address = Some("ada-at-example".to_string());
        assert!(matches!(
            ContactManagerImpl::validate(&bad_email),
            Err(SaveRejection::Invalid(ValidationError::InvalidEmail(_)))
        ));

        bad_email.email_address = Some("  ".to_string());
        assert_eq!(ContactManagerImpl::validate(&bad_email).unwrap().email_address, None);

        let mut bad_phone = Contact::new("Ada", "Lovelace");
        bad_phone.phones = vec![Phone::new("call me", PhoneType::Home)];
        assert!(matches!(
            ContactManagerImpl::validate(&bad_phone),
            Err(SaveRejection::Invalid(ValidationError::InvalidPhone(_)))
        ));
    }

    #[test]
    fn test_validate_normalizes_email_and_phones() {
        let mut contact = Contact::new("Ada", "Lovelace");
        contact.email_address = Some(" ada@example.com ".to_string());
        contact.phones = vec![Phone::new(" 555-0100\n", PhoneType::Home)];

        let prepared = ContactManagerImpl::validate(&contact).unwrap();
        assert_eq!(prepared.email_address.as_deref(), Some("ada@example.com"));
        assert_eq!(prepared.phones[0].phone_number, "555-0100");
        assert_eq!(prepared.first_name, "Ada");
    }

    #[test]
    fn test_validate_children() {
        let mut foreign = Contact::new("Ada", "Lovelace");
        foreign.contact_id = 1;
        foreign.phones = vec![Phone {
            contact_id: 2,
            ..Phone::new("555-0100", PhoneType::Home)
        }];
        assert_eq!(
            ContactManagerImpl::validate(&foreign),
            Err(SaveRejection::ForeignChild {
                kind: "phone",
                contact_id: 2
            })
        );

        let mut duplicate = Contact::new("Ada", "Lovelace");
        duplicate.addresses = vec![
            Address {
                address_id: 3,
                ..Default::default()
            },
            Address {
                address_id: 3,
                ..Default::default()
            },
        ];
        assert_eq!(
            ContactManagerImpl::validate(&duplicate),
            Err(SaveRejection::DuplicateChildId {
                kind: "address",
                id: 3
            })
        );
    }

    #[tokio::test]
    async fn test_save_rejected_contact_returns_none() {
        let manager = manager();
        let saved = manager
            .save_contact(&Contact::new("", "Lovelace"))
            .await
            .unwrap();

        assert!(saved.is_none());
        assert!(manager.list_contacts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_get_round_trip() {
        let manager = manager();
        let mut contact = Contact::new("Ada", "Lovelace");
        contact.phones = vec![Phone::new("555-0100", PhoneType::Mobile)];

        let saved = manager.save_contact(&contact).await.unwrap().unwrap();
        let loaded = manager.get_contact(saved.contact_id).await.unwrap().unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(
            manager.get_phone(saved.contact_id, 1).await.unwrap(),
            Some(saved.phones[0].clone())
        );
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let manager = manager();
        assert!(!manager.delete_contact(5).await.unwrap());
    }
}
