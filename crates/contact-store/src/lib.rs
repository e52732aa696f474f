//! Contact Store
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: XML persistence, the observable store and the repository seam
//! - config: where the contacts file lives and how empty fields are written

pub mod config;
pub mod domain;
pub mod error;
pub mod repository;

pub use config::{PlaceholderMode, StoreConfig};
pub use domain::{Contact, ContactDraft, ContactField, ContactFields, DomainError, DomainResult, Entity};
pub use error::{Result, StoreError};
pub use repository::{
    ContactReader, ContactRepository, ContactStore, LoadReport, Repository, StoreEvent,
    SubscriptionId, PLACEHOLDER,
};
