//! Durable table of adoption applications, at most one per animal.
//!
//! The uniqueness constraint on the animal id is the authoritative guard
//! against two applications for the same animal; implementations report a
//! violation as [`AdoptionStoreError::AlreadyExists`].

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use common::{AdoptionApplication, AdoptionId, AnimalId, NewAdoption};
pub use error::{AdoptionStoreError, Result};
pub use memory::InMemoryAdoptionStore;
pub use sqlite::SqliteAdoptionStore;
pub use store::AdoptionStore;
