use async_trait::async_trait;

use crate::{AdoptionApplication, AnimalId, NewAdoption, Result};

/// Core trait for adoption store implementations.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait AdoptionStore: Send + Sync {
    /// Returns the application recorded for an animal, if any.
    async fn find_by_animal(&self, animal_id: AnimalId) -> Result<Option<AdoptionApplication>>;

    /// Stores a new application, assigning its id and creation time.
    ///
    /// Fails with `AlreadyExists` if the animal already has an application,
    /// even when a concurrent insert won the race after a negative
    /// `find_by_animal`.
    async fn insert(&self, adoption: NewAdoption) -> Result<AdoptionApplication>;

    /// Returns the number of stored applications.
    async fn count_adoptions(&self) -> Result<u64>;
}
