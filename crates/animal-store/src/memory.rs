use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Animal, AnimalId, AnimalStatus, AnimalStore, AnimalStoreError, NewAnimal, Result};

#[derive(Debug, Default)]
struct InMemoryAnimalState {
    animals: BTreeMap<AnimalId, Animal>,
    next_id: i64,
    fail_on_update: bool,
}

/// In-memory animal store implementation for testing.
///
/// Provides the same interface as the SQLite implementation and can be told
/// to fail status updates, which is how the gateway's partial-failure path
/// is exercised.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnimalStore {
    state: Arc<RwLock<InMemoryAnimalState>>,
}

impl InMemoryAnimalStore {
    /// Creates a new empty in-memory animal store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures `mark_adopted` to fail until switched back off.
    pub async fn set_fail_on_update(&self, fail: bool) {
        self.state.write().await.fail_on_update = fail;
    }
}

#[async_trait]
impl AnimalStore for InMemoryAnimalStore {
    async fn list_animals(&self) -> Result<Vec<Animal>> {
        Ok(self.state.read().await.animals.values().cloned().collect())
    }

    async fn get_animal(&self, id: AnimalId) -> Result<Option<Animal>> {
        Ok(self.state.read().await.animals.get(&id).cloned())
    }

    async fn mark_adopted(&self, id: AnimalId) -> Result<()> {
        let mut state = self.state.write().await;

        if state.fail_on_update {
            return Err(AnimalStoreError::Unavailable("status update rejected".to_string()));
        }

        let animal = state
            .animals
            .get_mut(&id)
            .ok_or(AnimalStoreError::AnimalNotFound(id))?;
        animal.status = AnimalStatus::Adopted;
        Ok(())
    }

    async fn count_animals(&self) -> Result<u64> {
        Ok(self.state.read().await.animals.len() as u64)
    }

    async fn insert_animal(&self, animal: NewAnimal) -> Result<Animal> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let animal = animal.into_animal(AnimalId::new(state.next_id));
        state.animals.insert(animal.id, animal.clone());
        Ok(animal)
    }
}
