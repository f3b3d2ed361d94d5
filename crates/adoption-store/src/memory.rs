use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::timestamp;
use tokio::sync::RwLock;

use crate::{
    AdoptionApplication, AdoptionId, AdoptionStore, AdoptionStoreError, AnimalId, NewAdoption,
    Result,
};

#[derive(Debug, Default)]
struct InMemoryAdoptionState {
    by_animal: HashMap<AnimalId, AdoptionApplication>,
    next_id: i64,
    fail_on_insert: bool,
}

/// In-memory adoption store implementation for testing.
///
/// Enforces the same one-application-per-animal rule as the SQLite table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdoptionStore {
    state: Arc<RwLock<InMemoryAdoptionState>>,
}

impl InMemoryAdoptionStore {
    /// Creates a new empty in-memory adoption store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures `insert` to fail with a storage error.
    pub async fn set_fail_on_insert(&self, fail: bool) {
        self.state.write().await.fail_on_insert = fail;
    }
}

#[async_trait]
impl AdoptionStore for InMemoryAdoptionStore {
    async fn find_by_animal(&self, animal_id: AnimalId) -> Result<Option<AdoptionApplication>> {
        Ok(self.state.read().await.by_animal.get(&animal_id).cloned())
    }

    async fn insert(&self, adoption: NewAdoption) -> Result<AdoptionApplication> {
        let mut state = self.state.write().await;

        if state.fail_on_insert {
            return Err(AdoptionStoreError::Unavailable("insert rejected".to_string()));
        }
        if state.by_animal.contains_key(&adoption.animal_id) {
            return Err(AdoptionStoreError::AlreadyExists(adoption.animal_id));
        }

        state.next_id += 1;
        let application =
            adoption.into_application(AdoptionId::new(state.next_id), timestamp::now());
        state.by_animal.insert(application.animal_id, application.clone());

        Ok(application)
    }

    async fn count_adoptions(&self) -> Result<u64> {
        Ok(self.state.read().await.by_animal.len() as u64)
    }
}
