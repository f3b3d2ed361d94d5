//! Durable table of animals offered for adoption.
//!
//! The gateway is the only writer. Animals are created by the startup seed
//! and their status only ever moves from `available` to `adopted`.

pub mod error;
pub mod memory;
pub mod seed;
pub mod sqlite;
pub mod store;

pub use common::{Animal, AnimalId, AnimalStatus, NewAnimal};
pub use error::{AnimalStoreError, Result};
pub use memory::InMemoryAnimalStore;
pub use sqlite::SqliteAnimalStore;
pub use store::{AnimalStore, AnimalStoreExt, SeedOutcome};
