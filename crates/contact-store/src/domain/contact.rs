//! Contact Entity
//!
//! One person's stored name/phone/notes record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, Entity};

/// A single editable column of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    LastName,
    PhoneNumber,
    Notes,
}

impl ContactField {
    /// Fields in file order
    pub const ALL: [ContactField; 4] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::PhoneNumber,
        ContactField::Notes,
    ];

    /// Column key, identical to the XML element name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::PhoneNumber => "phone_number",
            ContactField::Notes => "notes",
        }
    }

    /// Match an element local name
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"first_name" => Some(ContactField::FirstName),
            b"last_name" => Some(ContactField::LastName),
            b"phone_number" => Some(ContactField::PhoneNumber),
            b"notes" => Some(ContactField::Notes),
            _ => None,
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim().as_bytes())
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown contact field '{}'", s)))
    }
}

/// Read access to the four persisted fields
///
/// Implemented by both [`Contact`] and [`ContactDraft`] so the XML writer
/// can serialize either without copying.
pub trait ContactFields {
    fn field(&self, field: ContactField) -> &str;
}

/// Field values of a contact that has not been assigned an id yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub notes: String,
}

impl ContactDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
            notes: notes.into(),
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::PhoneNumber => &mut self.phone_number,
            ContactField::Notes => &mut self.notes,
        }
    }
}

impl ContactFields for ContactDraft {
    fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Notes => &self.notes,
        }
    }
}

/// A stored contact
///
/// `id` is synthetic: assigned by the store, never written to disk, and the
/// only thing edits and deletes match on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub notes: String,
}

impl Contact {
    pub fn from_draft(id: u32, draft: ContactDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone_number: draft.phone_number,
            notes: draft.notes,
        }
    }

    /// Copy the field values out, dropping the id
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Overwrite all four fields, keeping the id
    pub fn apply(&mut self, draft: ContactDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.phone_number = draft.phone_number;
        self.notes = draft.notes;
    }

    pub fn set_field(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::FirstName => self.first_name = value,
            ContactField::LastName => self.last_name = value,
            ContactField::PhoneNumber => self.phone_number = value,
            ContactField::Notes => self.notes = value,
        }
    }

    /// "First Last", as shown in the delete confirmation
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl ContactFields for Contact {
    fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::PhoneNumber => &self.phone_number,
            ContactField::Notes => &self.notes,
        }
    }
}

impl Entity for Contact {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
