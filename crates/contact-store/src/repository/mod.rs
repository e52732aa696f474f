//! Repository Layer
//!
//! XML persistence, the observable contact store and the repository seam
//! the command layer depends on.

mod contact_repo;
mod store;
mod traits;
pub mod xml;

#[cfg(test)]
mod tests;

pub use contact_repo::ContactRepository;
pub use store::{ContactStore, LoadReport, StoreEvent, SubscriptionId};
pub use traits::Repository;
pub use xml::{ContactReader, PLACEHOLDER};
