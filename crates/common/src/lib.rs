//! Types and process plumbing shared by the gateway and the adoption
//! service.
//!
//! Both services speak the same JSON vocabulary: camelCase keys, integer
//! identifiers and an `{"error": "..."}` envelope for failures.

pub mod adoption;
pub mod animal;
pub mod error;
pub mod service;
pub mod timestamp;
pub mod types;

pub use adoption::{AdoptionApplication, AdoptionRequest, NewAdoption};
pub use animal::{Animal, AnimalStatus, NewAnimal, ParseStatusError};
pub use error::ErrorBody;
pub use types::{AdoptionId, AnimalId};
