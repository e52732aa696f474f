//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde and thiserror).

mod contact;
mod entity;

pub use contact::{Contact, ContactDraft, ContactField, ContactFields};
pub use entity::{DomainError, DomainResult, Entity};
