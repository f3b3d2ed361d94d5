use async_trait::async_trait;

use crate::{Animal, AnimalId, NewAnimal, Result, seed};

/// Core trait for animal store implementations.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Returns every animal, ordered by id.
    async fn list_animals(&self) -> Result<Vec<Animal>>;

    /// Looks up a single animal. Returns None if it doesn't exist.
    async fn get_animal(&self, id: AnimalId) -> Result<Option<Animal>>;

    /// Sets the animal's status to adopted.
    ///
    /// Idempotent: marking an already adopted animal succeeds. Fails with
    /// `AnimalNotFound` if no animal has this id.
    async fn mark_adopted(&self, id: AnimalId) -> Result<()>;

    /// Returns the number of stored animals.
    async fn count_animals(&self) -> Result<u64>;

    /// Stores a new animal with status available and returns it with its id.
    async fn insert_animal(&self, animal: NewAnimal) -> Result<Animal>;
}

/// Outcome of [`AnimalStoreExt::seed_if_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and this many sample animals were inserted.
    Seeded(u64),
    /// The store already held this many animals; nothing was inserted.
    AlreadyPopulated(u64),
}

/// Extension trait providing convenience methods for animal stores.
#[async_trait]
pub trait AnimalStoreExt: AnimalStore {
    /// Inserts the sample animals if, and only if, the store is empty.
    ///
    /// Meant to run once at startup, before the service accepts requests.
    async fn seed_if_empty(&self) -> Result<SeedOutcome> {
        let existing = self.count_animals().await?;
        if existing > 0 {
            tracing::info!(existing, "animal store already populated, skipping seed");
            return Ok(SeedOutcome::AlreadyPopulated(existing));
        }

        let mut inserted = 0;
        for animal in seed::sample_animals() {
            self.insert_animal(animal).await?;
            inserted += 1;
        }

        tracing::info!(inserted, "seeded animal store with sample animals");
        Ok(SeedOutcome::Seeded(inserted))
    }
}

// Blanket implementation for all AnimalStore implementations
impl<T: AnimalStore + ?Sized> AnimalStoreExt for T {}
