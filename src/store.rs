//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::{Contact, ContactsFileInfo};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// All contacts, in file order
    pub contacts: Vec<Contact>,
    /// Selected row (contact id)
    pub selected: Option<u32>,
    /// Contacts file shown in the status line
    pub file_info: Option<ContactsFileInfo>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the table contents, dropping a selection that no longer exists
pub fn store_set_contacts(store: &AppStore, contacts: Vec<Contact>) {
    let selected = store.selected().get_untracked();
    if let Some(id) = selected {
        if !contacts.iter().any(|c| c.id == id) {
            store.selected().set(None);
        }
    }
    store.contacts().set(contacts);
}

/// The currently selected contact, if any
pub fn store_selected_contact(store: &AppStore) -> Option<Contact> {
    let id = store.selected().get_untracked()?;
    store.contacts().read_untracked().iter().find(|c| c.id == id).cloned()
}
