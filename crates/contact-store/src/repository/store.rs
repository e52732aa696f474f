//! Contact Store
//!
//! Ordered in-memory collection backing the contacts table. Every change is
//! published to subscribers synchronously, so the UI can re-render without
//! polling. Persistence is explicit: callers run [`ContactStore::save`]
//! after each mutation.

use serde::Serialize;

use crate::config::StoreConfig;
use crate::domain::{Contact, ContactDraft, ContactField};
use crate::error::{Result, StoreError};

use super::xml;

/// Change notification delivered to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreEvent {
    Loaded { count: usize },
    Added { contact: Contact },
    Removed { contact: Contact },
    Updated { contact: Contact },
    Saved { count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Outcome of [`ContactStore::load`]
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Contacts appended by this load
    pub loaded: usize,
    /// Why the load stopped early, if it did
    pub error: Option<StoreError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

pub struct ContactStore {
    config: StoreConfig,
    contacts: Vec<Contact>,
    next_id: u32,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("config", &self.config)
            .field("contacts", &self.contacts.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ContactStore {
    /// Empty store; nothing is read until [`load`](Self::load)
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            contacts: Vec::new(),
            next_id: 1,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn publish(&self, event: StoreEvent) {
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }

    fn insert(&mut self, draft: ContactDraft) -> Contact {
        let contact = Contact::from_draft(self.next_id, draft);
        self.next_id += 1;
        self.contacts.push(contact.clone());
        contact
    }

    /// Append every contact in the configured file
    ///
    /// Never fails: a missing file leaves the store as it was, a malformed
    /// one keeps whatever was read before the error.
    pub fn load(&mut self) -> LoadReport {
        let path = self.config.path.clone();
        let mut report = LoadReport::default();

        match xml::open_file(&path, self.config.placeholder) {
            Ok(reader) => {
                for item in reader {
                    match item {
                        Ok(draft) => {
                            self.insert(draft);
                            report.loaded += 1;
                        }
                        Err(err) => {
                            tracing::warn!(
                                "stopped reading {} after {} contacts: {err}",
                                path.display(),
                                report.loaded
                            );
                            report.error = Some(err);
                        }
                    }
                }
            }
            Err(err) if err.is_not_found_file() => {
                tracing::info!("no contacts file at {}, starting empty", path.display());
                report.error = Some(err);
            }
            Err(err) => {
                tracing::warn!("failed to open {}: {err}", path.display());
                report.error = Some(err);
            }
        }

        tracing::debug!("loaded {} contacts from {}", report.loaded, path.display());
        self.publish(StoreEvent::Loaded { count: report.loaded });
        report
    }

    /// Append a new contact at the end
    pub fn add(&mut self, draft: ContactDraft) -> Contact {
        let contact = self.insert(draft);
        self.publish(StoreEvent::Added { contact: contact.clone() });
        contact
    }

    /// Remove by id; `None` (and no notification) if absent
    pub fn delete(&mut self, id: u32) -> Option<Contact> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        let removed = self.contacts.remove(index);
        self.publish(StoreEvent::Removed { contact: removed.clone() });
        Some(removed)
    }

    /// Replace all four fields of an existing contact
    pub fn update(&mut self, contact: &Contact) -> Result<Contact> {
        let existing = self
            .contacts
            .iter_mut()
            .find(|c| c.id == contact.id)
            .ok_or(StoreError::NotFound(contact.id))?;
        existing.apply(contact.to_draft());
        let updated = existing.clone();
        self.publish(StoreEvent::Updated { contact: updated.clone() });
        Ok(updated)
    }

    /// In-place edit of a single column
    pub fn set_field(&mut self, id: u32, field: ContactField, value: String) -> Result<Contact> {
        let existing = self
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        existing.set_field(field, value);
        let updated = existing.clone();
        self.publish(StoreEvent::Updated { contact: updated.clone() });
        Ok(updated)
    }

    /// Overwrite the configured file with the whole collection
    pub fn save(&self) -> Result<()> {
        xml::write_file(&self.config.path, &self.contacts, self.config.placeholder)?;
        tracing::debug!("saved {} contacts to {}", self.contacts.len(), self.config.path.display());
        self.publish(StoreEvent::Saved { count: self.contacts.len() });
        Ok(())
    }

    /// The file contents [`save`](Self::save) would write right now
    pub fn render(&self) -> String {
        xml::render_contacts(&self.contacts, self.config.placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn store() -> ContactStore {
        ContactStore::new(StoreConfig::new("unused.xml"))
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut store = store();
        let a = store.add(ContactDraft::new("A", "", "", ""));
        let b = store.add(ContactDraft::new("B", "", "", ""));
        store.delete(b.id);
        let c = store.add(ContactDraft::new("C", "", "", ""));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = store();
        store.add(ContactDraft::new("A", "B", "1", ""));
        assert!(store.delete(99).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_identical_contacts_are_distinct() {
        let mut store = store();
        let first = store.add(ContactDraft::new("Same", "Name", "1", ""));
        let second = store.add(ContactDraft::new("Same", "Name", "1", ""));
        store.delete(second.id);
        assert_eq!(store.contacts(), &[first]);
    }

    #[test]
    fn test_set_field_and_update() {
        let mut store = store();
        let contact = store.add(ContactDraft::new("A", "B", "1", ""));

        let edited = store.set_field(contact.id, ContactField::PhoneNumber, "2".into()).unwrap();
        assert_eq!(edited.phone_number, "2");

        let mut replacement = edited.clone();
        replacement.first_name = "Z".into();
        let updated = store.update(&replacement).unwrap();
        assert_eq!(store.get(contact.id), Some(&updated));
        assert_eq!(updated.first_name, "Z");
        assert_eq!(updated.phone_number, "2");
    }

    #[test]
    fn test_edits_on_missing_contact_fail() {
        let mut store = store();
        assert!(matches!(
            store.set_field(5, ContactField::Notes, "x".into()),
            Err(StoreError::NotFound(5))
        ));
        let ghost = Contact::from_draft(5, ContactDraft::default());
        assert!(matches!(store.update(&ghost), Err(StoreError::NotFound(5))));
    }

    #[test]
    fn test_subscribers_see_events_in_order() {
        let mut store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let a = store.add(ContactDraft::new("A", "", "", ""));
        let a = store.set_field(a.id, ContactField::Notes, "n".into()).unwrap();
        store.delete(a.id);
        store.delete(a.id);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add(ContactDraft::default());

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                StoreEvent::Added { contact: Contact::from_draft(1, ContactDraft::new("A", "", "", "")) },
                StoreEvent::Updated { contact: a.clone() },
                StoreEvent::Removed { contact: a },
            ]
        );
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let json = serde_json::to_value(StoreEvent::Saved { count: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "saved", "count": 3 }));
    }
}
