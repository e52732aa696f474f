//! Contact Repository
//!
//! `Repository<Contact>` over the shared [`ContactStore`]. Every mutation is
//! followed by a full save; a failed save is logged and the in-memory change
//! is kept.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Contact, ContactDraft, ContactField, DomainError, DomainResult};

use super::store::{ContactStore, LoadReport};
use super::traits::Repository;

#[derive(Clone)]
pub struct ContactRepository {
    store: Arc<Mutex<ContactStore>>,
}

impl ContactRepository {
    pub fn new(store: Arc<Mutex<ContactStore>>) -> Self {
        Self { store }
    }

    /// Wrap a fresh store
    pub fn from_store(store: ContactStore) -> Self {
        Self::new(Arc::new(Mutex::new(store)))
    }

    pub fn store(&self) -> Arc<Mutex<ContactStore>> {
        Arc::clone(&self.store)
    }

    /// Bulk load from the contacts file
    pub async fn load(&self) -> LoadReport {
        self.store.lock().await.load()
    }

    /// Append a contact built from dialog input
    pub async fn add(&self, draft: ContactDraft) -> DomainResult<Contact> {
        let mut store = self.store.lock().await;
        let contact = store.add(draft);
        persist(&store);
        Ok(contact)
    }

    /// In-place cell edit
    pub async fn set_field(&self, id: u32, field: ContactField, value: String) -> DomainResult<Contact> {
        let mut store = self.store.lock().await;
        let contact = store.set_field(id, field, value)?;
        persist(&store);
        Ok(contact)
    }

    /// Explicit save, surfacing the error instead of logging it
    pub async fn save(&self) -> DomainResult<()> {
        let store = self.store.lock().await;
        store.save().map_err(DomainError::from)
    }
}

fn persist(store: &ContactStore) {
    if let Err(err) = store.save() {
        tracing::error!("failed to save contacts: {err}");
    }
}

#[async_trait]
impl Repository<Contact> for ContactRepository {
    async fn create(&self, entity: &Contact) -> DomainResult<Contact> {
        self.add(entity.to_draft()).await
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Contact>> {
        let store = self.store.lock().await;
        Ok(store.get(id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Contact>> {
        let store = self.store.lock().await;
        Ok(store.contacts().to_vec())
    }

    async fn update(&self, entity: &Contact) -> DomainResult<Contact> {
        let mut store = self.store.lock().await;
        let contact = store.update(entity)?;
        persist(&store);
        Ok(contact)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut store = self.store.lock().await;
        if store.delete(id).is_some() {
            persist(&store);
        }
        Ok(())
    }
}
