//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Table columns: (field key sent to the backend, header label)
pub const COLUMNS: &[(&str, &str)] = &[
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("phone_number", "Phone"),
    ("notes", "Notes"),
];

/// Contact data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub notes: String,
}

impl Contact {
    pub fn field(&self, key: &str) -> String {
        match key {
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "phone_number" => self.phone_number.clone(),
            "notes" => self.notes.clone(),
            _ => String::new(),
        }
    }

    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Same id, fields taken from the dialog
    pub fn with_draft(&self, draft: ContactDraft) -> Contact {
        Contact {
            id: self.id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone_number: draft.phone_number,
            notes: draft.notes,
        }
    }
}

/// Dialog input for a new or edited contact (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub notes: String,
}

impl ContactDraft {
    pub fn field(&self, key: &str) -> String {
        match key {
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "phone_number" => self.phone_number.clone(),
            "notes" => self.notes.clone(),
            _ => String::new(),
        }
    }

    pub fn set_field(&mut self, key: &str, value: String) {
        match key {
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "phone_number" => self.phone_number = value,
            "notes" => self.notes = value,
            _ => {}
        }
    }
}

/// Contacts file info for the status line (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactsFileInfo {
    pub path: String,
    pub placeholder: String,
    pub count: usize,
}

/// Payload of the `contacts-changed` event; only the kind matters here
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEvent {
    pub kind: String,
}
