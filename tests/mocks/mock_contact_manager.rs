use async_trait::async_trait;
use contacts_api::error::{StoreError, StoreResult};
use contacts_api::models::{Address, Contact, Phone};
use contacts_api::services::ContactManager;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact manager for testing.
///
/// Keeps contacts in memory with no validation, counts method calls, and can
/// be told to refuse saves or to fail every call like a broken store.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactManager {
    contacts: Arc<Mutex<BTreeMap<i32, Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    refuse_saves: Arc<AtomicBool>,
    store_down: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockContactManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact as-is, keyed by its id.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.contact_id, contact);
    }

    /// Make `save_contact` return `None`.
    pub fn refuse_saves(&self) {
        self.refuse_saves.store(true, Ordering::SeqCst);
    }

    /// Make every call return a store error.
    pub fn break_store(&self) {
        self.store_down.store(true, Ordering::SeqCst);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.store_down.load(Ordering::SeqCst) {
            return Err(StoreError::Other("store unavailable".to_string()));
        }
        Ok(())
    }

    fn with_contact<T>(&self, contact_id: i32, f: impl FnOnce(&Contact) -> T) -> Option<T> {
        let contacts = self.contacts.lock().unwrap();
        contacts.get(&contact_id).map(f)
    }
}

#[async_trait]
impl ContactManager for MockContactManager {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list_contacts")?;
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.values().cloned().collect())
    }

    async fn get_contact(&self, contact_id: i32) -> StoreResult<Option<Contact>> {
        self.track_call("get_contact")?;
        Ok(self.with_contact(contact_id, Contact::clone))
    }

    async fn search_contacts(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Vec<Contact>> {
        self.track_call("search_contacts")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts
            .values()
            .filter(|c| first_name.is_empty() || c.first_name == first_name)
            .filter(|c| last_name.is_empty() || c.last_name == last_name)
            .cloned()
            .collect())
    }

    async fn save_contact(&self, contact: &Contact) -> StoreResult<Option<Contact>> {
        self.track_call("save_contact")?;

        if self.refuse_saves.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let mut contacts = self.contacts.lock().unwrap();
        let mut saved = contact.clone();
        if saved.contact_id == 0 {
            saved.contact_id = contacts.keys().next_back().copied().unwrap_or(0) + 1;
        }
        contacts.insert(saved.contact_id, saved.clone());
        Ok(Some(saved))
    }

    async fn delete_contact(&self, contact_id: i32) -> StoreResult<bool> {
        self.track_call("delete_contact")?;
        let mut contacts = self.contacts.lock().unwrap();
        Ok(contacts.remove(&contact_id).is_some())
    }

    async fn list_phones(&self, contact_id: i32) -> StoreResult<Vec<Phone>> {
        self.track_call("list_phones")?;
        Ok(self
            .with_contact(contact_id, |c| c.phones.clone())
            .unwrap_or_default())
    }

    async fn get_phone(&self, contact_id: i32, phone_id: i32) -> StoreResult<Option<Phone>> {
        self.track_call("get_phone")?;
        Ok(self
            .with_contact(contact_id, |c| {
                c.phones.iter().find(|p| p.phone_id == phone_id).cloned()
            })
            .flatten())
    }

    async fn list_addresses(&self, contact_id: i32) -> StoreResult<Vec<Address>> {
        self.track_call("list_addresses")?;
        Ok(self
            .with_contact(contact_id, |c| c.addresses.clone())
            .unwrap_or_default())
    }

    async fn get_address(
        &self,
        contact_id: i32,
        address_id: i32,
    ) -> StoreResult<Option<Address>> {
        self.track_call("get_address")?;
        Ok(self
            .with_contact(contact_id, |c| {
                c.addresses.iter().find(|a| a.address_id == address_id).cloned()
            })
            .flatten())
    }
}
