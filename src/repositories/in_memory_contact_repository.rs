use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::models::{Address, Contact, Phone};
use crate::repositories::traits::{name_matches, ContactRepository};

/// Contact repository held entirely in process memory.
///
/// Contacts are stored whole, children included, keyed by id. Data is lost
/// when the process exits.
#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: RwLock<BTreeMap<i32, Contact>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with contacts.
    ///
    /// Contacts with id `0` are given fresh ids in order; children are bound
    /// and numbered the same way `save` does.
    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut map = BTreeMap::new();
        for mut contact in contacts {
            if contact.is_new() {
                let Some(id) = next_id(&map) else {
                    warn!("Contact ids exhausted; skipping preloaded contact");
                    continue;
                };
                contact.contact_id = id;
            }
            contact.bind_children();
            if !contact.assign_child_ids() {
                warn!(
                    contact_id = contact.contact_id,
                    "Child ids exhausted; skipping preloaded contact"
                );
                continue;
            }
            map.insert(contact.contact_id, contact);
        }
        Self {
            contacts: RwLock::new(map),
        }
    }
}

fn next_id(contacts: &BTreeMap<i32, Contact>) -> Option<i32> {
    contacts.keys().next_back().copied().unwrap_or(0).checked_add(1)
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list(&self) -> StoreResult<Vec<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.values().cloned().collect())
    }

    async fn get(&self, contact_id: i32) -> StoreResult<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.get(&contact_id).cloned())
    }

    async fn search(&self, first_name: &str, last_name: &str) -> StoreResult<Vec<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .values()
            .filter(|c| name_matches(first_name, &c.first_name))
            .filter(|c| name_matches(last_name, &c.last_name))
            .cloned()
            .collect())
    }

    async fn save(&self, contact: &Contact) -> StoreResult<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        let now = Utc::now();
        let mut saved = contact.clone();

        if saved.is_new() {
            let Some(id) = next_id(&contacts) else {
                debug!("contact ids exhausted");
                return Ok(None);
            };
            saved.contact_id = id;
            saved.date_created = Some(now);
        } else {
            match contacts.get(&saved.contact_id) {
                Some(existing) => saved.date_created = existing.date_created.or(Some(now)),
                None => {
                    debug!(contact_id = saved.contact_id, "save target does not exist");
                    return Ok(None);
                }
            }
        }

        saved.date_modified = Some(now);
        saved.bind_children();
        if !saved.assign_child_ids() {
            debug!(contact_id = saved.contact_id, "child ids exhausted");
            return Ok(None);
        }

        contacts.insert(saved.contact_id, saved.clone());
        Ok(Some(saved))
    }

    async fn delete(&self, contact_id: i32) -> StoreResult<bool> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.remove(&contact_id).is_some())
    }

    async fn list_phones(&self, contact_id: i32) -> StoreResult<Vec<Phone>> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .get(&contact_id)
            .map(|c| c.phones.clone())
            .unwrap_or_default())
    }

    async fn get_phone(&self, contact_id: i32, phone_id: i32) -> StoreResult<Option<Phone>> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .get(&contact_id)
            .and_then(|c| c.phones.iter().find(|p| p.phone_id == phone_id))
            .cloned())
    }

    async fn list_addresses(&self, contact_id: i32) -> StoreResult<Vec<Address>> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .get(&contact_id)
            .map(|c| c.addresses.clone())
            .unwrap_or_default())
    }

    async fn get_address(
        &self,
        contact_id: i32,
        address_id: i32,
    ) -> StoreResult<Option<Address>> {
        let contacts = self.contacts.read().await;
        Ok(contacts
            .get(&contact_id)
            .and_then(|c| c.addresses.iter().find(|a| a.address_id == address_id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhoneType;

    fn ada() -> Contact {
        let mut contact = Contact::new("Ada", "Lovelace");
        contact.phones = vec![Phone::new("555-0100", PhoneType::Home)];
        contact.addresses = vec![Address {
            city: "London".to_string(),
            ..Default::default()
        }];
        contact
    }

    #[tokio::test]
    async fn test_save_assigns_ids_and_timestamps() {
        let repo = InMemoryContactRepository::new();

        let first = repo.save(&ada()).await.unwrap().unwrap();
        let second = repo.save(&Contact::new("Grace", "Hopper")).await.unwrap().unwrap();

        assert_eq!(first.contact_id, 1);
        assert_eq!(second.contact_id, 2);
        assert!(first.date_created.is_some());
        assert_eq!(first.phones[0].phone_id, 1);
        assert_eq!(first.phones[0].contact_id, 1);
        assert_eq!(first.addresses[0].contact_id, 1);
    }

    #[tokio::test]
    async fn test_save_updates_existing_and_keeps_created() {
        let repo = InMemoryContactRepository::new();
        let created = repo.save(&ada()).await.unwrap().unwrap();

        let mut changed = created.clone();
        changed.notes = Some("First programmer".to_string());
        let updated = repo.save(&changed).await.unwrap().unwrap();

        assert_eq!(updated.contact_id, created.contact_id);
        assert_eq!(updated.date_created, created.date_created);
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert_eq!(
            repo.get(created.contact_id).await.unwrap().unwrap().notes.as_deref(),
            Some("First programmer")
        );
    }

    #[tokio::test]
    async fn test_save_unknown_id_returns_none() {
        let repo = InMemoryContactRepository::new();
        let mut ghost = ada();
        ghost.contact_id = 42;

        assert!(repo.save(&ghost).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_refuses_when_ids_run_out() {
        let mut last = Contact::new("Grace", "Hopper");
        last.contact_id = i32::MAX;
        let repo = InMemoryContactRepository::with_contacts(vec![last]);

        assert!(repo.save(&ada()).await.unwrap().is_none());

        let mut crowded = repo.get(i32::MAX).await.unwrap().unwrap();
        crowded.phones = vec![
            Phone {
                phone_id: i32::MAX,
                ..Phone::new("555-0100", PhoneType::Home)
            },
            Phone::new("555-0101", PhoneType::Work),
        ];
        assert!(repo.save(&crowded).await.unwrap().is_none());
        assert!(repo.list_phones(i32::MAX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = InMemoryContactRepository::with_contacts(vec![ada()]);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert!(repo.get(1).await.unwrap().is_none());
        assert!(repo.list_phones(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_is_exact_and_case_insensitive() {
        let repo = InMemoryContactRepository::with_contacts(vec![
            ada(),
            Contact::new("Ada", "Byron"),
            Contact::new("Grace", "Hopper"),
        ]);

        assert_eq!(repo.search("ada", "").await.unwrap().len(), 2);
        assert_eq!(repo.search("Ada", "LOVELACE").await.unwrap().len(), 1);
        assert_eq!(repo.search("", "").await.unwrap().len(), 3);
        assert!(repo.search("Ad", "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nested_lookups_respect_owner() {
        let repo = InMemoryContactRepository::with_contacts(vec![
            ada(),
            Contact::new("Grace", "Hopper"),
        ]);

        assert!(repo.get_phone(1, 1).await.unwrap().is_some());
        assert!(repo.get_phone(2, 1).await.unwrap().is_none());
        assert!(repo.get_phone(1, 9).await.unwrap().is_none());
        assert!(repo.get_address(1, 1).await.unwrap().is_some());
        assert!(repo.get_address(3, 1).await.unwrap().is_none());
        assert_eq!(repo.list_addresses(1).await.unwrap().len(), 1);
    }
}
