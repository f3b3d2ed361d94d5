//! Two-phase adoption commit between the gateway and the adoption service.
//!
//! The adoption service's record is written first; the local animal status
//! is flipped only once that record is confirmed. An animal is therefore
//! never marked adopted without an application behind it. The reverse gap
//! (record stored, local update failed) is reported as
//! [`AdoptError::LocalStatusNotUpdated`] and is not compensated.

use std::time::Instant;

use animal_store::{AnimalStore, AnimalStoreError};
use common::{AdoptionId, AdoptionRequest, AnimalId};
use serde::Serialize;
use thiserror::Error;

use crate::client::{AdoptionClient, ClientError};

/// Returned to the client after a completed adoption.
pub const ADOPTION_CONFIRMED: &str = "Adoption application submitted and animal marked as adopted.";

/// Errors that can end an adoption attempt.
#[derive(Debug, Error)]
pub enum AdoptError {
    /// Applicant name or email is missing or blank.
    #[error("Applicant name and email are required.")]
    MissingApplicantDetails,

    /// No animal has this id.
    #[error("Animal not found.")]
    AnimalNotFound(AnimalId),

    /// The local store already shows the animal as adopted.
    #[error("This animal has already been adopted and cannot be adopted again.")]
    AlreadyAdopted(AnimalId),

    /// The adoption service rejected the application or could not be reached.
    #[error(transparent)]
    Remote(#[from] ClientError),

    /// The application is recorded remotely but the animal still reads as
    /// available locally.
    #[error("animal {animal_id} adopted remotely but local update failed: {source}")]
    LocalStatusNotUpdated {
        animal_id: AnimalId,
        adoption_id: Option<AdoptionId>,
        source: AnimalStoreError,
    },

    /// The animal store failed before anything was sent remotely.
    #[error("Animal store error: {0}")]
    Store(#[from] AnimalStoreError),
}

impl AdoptError {
    /// Short label used for the failure metric.
    pub fn kind(&self) -> &'static str {
        match self {
            AdoptError::MissingApplicantDetails => "validation",
            AdoptError::AnimalNotFound(_) => "not_found",
            AdoptError::AlreadyAdopted(_) => "already_adopted",
            AdoptError::Remote(ClientError::Rejected { .. }) => "remote_rejected",
            AdoptError::Remote(ClientError::Unreachable(_)) => "remote_unreachable",
            AdoptError::Remote(ClientError::TimedOut(_)) => "remote_timeout",
            AdoptError::Remote(ClientError::UnexpectedStatus(_)) => "remote_unexpected",
            AdoptError::LocalStatusNotUpdated { .. } => "local_update_failed",
            AdoptError::Store(_) => "store",
        }
    }
}

/// Validated applicant details from the adoption form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub name: String,
    pub email: String,
    pub message: Option<String>,
}

impl Applicant {
    /// Requires a non-blank name and email; the message stays optional.
    pub fn from_parts(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<Self, AdoptError> {
        let name = name.filter(|s| !s.trim().is_empty());
        let email = email.filter(|s| !s.trim().is_empty());

        match (name, email) {
            (Some(name), Some(email)) => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(AdoptError::MissingApplicantDetails),
        }
    }
}

/// Outcome of a completed adoption, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionConfirmation {
    pub message: String,
    pub animal_id: AnimalId,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(skip)]
    pub adoption_id: Option<AdoptionId>,
}

/// Orchestrates an adoption across the local animal store and the remote
/// adoption service.
pub struct AdoptionCoordinator<A, C>
where
    A: AnimalStore,
    C: AdoptionClient,
{
    animals: A,
    client: C,
}

impl<A, C> AdoptionCoordinator<A, C>
where
    A: AnimalStore,
    C: AdoptionClient,
{
    /// Creates a new adoption coordinator.
    pub fn new(animals: A, client: C) -> Self {
        Self { animals, client }
    }

    /// Adopts `animal_id` on behalf of `applicant`.
    ///
    /// Steps run strictly in order: look up the animal, record the
    /// application remotely, then mark the animal adopted. Any failure
    /// before the remote confirmation leaves the animal available.
    #[tracing::instrument(skip(self, applicant))]
    pub async fn adopt(
        &self,
        animal_id: AnimalId,
        applicant: Applicant,
    ) -> Result<AdoptionConfirmation, AdoptError> {
        metrics::counter!("adoption_requests_total").increment(1);
        let started = Instant::now();

        let result = self.run(animal_id, applicant).await;

        metrics::histogram!("adoption_duration_seconds").record(started.elapsed().as_secs_f64());
        match &result {
            Ok(confirmation) => {
                metrics::counter!("adoption_completed_total").increment(1);
                tracing::info!(
                    adoption_id = ?confirmation.adoption_id,
                    "adoption completed"
                );
            }
            Err(err) => {
                metrics::counter!("adoption_failed_total", "reason" => err.kind()).increment(1);
                tracing::info!(reason = err.kind(), error = %err, "adoption not completed");
            }
        }

        result
    }

    async fn run(
        &self,
        animal_id: AnimalId,
        applicant: Applicant,
    ) -> Result<AdoptionConfirmation, AdoptError> {
        // 1. The animal must exist and still be available
        let animal = self
            .animals
            .get_animal(animal_id)
            .await?
            .ok_or(AdoptError::AnimalNotFound(animal_id))?;

        if animal.status.is_adopted() {
            return Err(AdoptError::AlreadyAdopted(animal_id));
        }

        // 2. Record the application remotely; nothing local changes on failure
        let request = AdoptionRequest {
            animal_id,
            applicant_name: applicant.name.clone(),
            applicant_email: applicant.email.clone(),
            message: applicant.message,
        };
        tracing::debug!("submitting application to adoption service");
        let application = self.client.submit(&request).await?;
        let adoption_id = application.map(|a| a.id);

        // 3. Reflect the confirmed adoption locally
        if let Err(source) = self.animals.mark_adopted(animal_id).await {
            tracing::error!(
                %animal_id,
                ?adoption_id,
                error = %source,
                "adoption recorded remotely but animal status was not updated"
            );
            return Err(AdoptError::LocalStatusNotUpdated {
                animal_id,
                adoption_id,
                source,
            });
        }

        Ok(AdoptionConfirmation {
            message: ADOPTION_CONFIRMED.to_string(),
            animal_id,
            applicant_name: applicant.name,
            applicant_email: applicant.email,
            adoption_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use animal_store::{AnimalStatus, AnimalStoreExt, InMemoryAnimalStore};
    use async_trait::async_trait;
    use common::{AdoptionApplication, NewAdoption, timestamp};
    use tokio::sync::Mutex;

    use super::*;

    /// Scripted adoption client that records what it was sent.
    #[derive(Default)]
    struct StubClient {
        failure: Mutex<Option<ClientError>>,
        submitted: Mutex<Vec<AdoptionRequest>>,
    }

    impl StubClient {
        fn failing(err: ClientError) -> Self {
            Self {
                failure: Mutex::new(Some(err)),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl AdoptionClient for Arc<StubClient> {
        async fn submit(
            &self,
            request: &AdoptionRequest,
        ) -> Result<Option<AdoptionApplication>, ClientError> {
            self.submitted.lock().await.push(request.clone());
            if let Some(err) = self.failure.lock().await.take() {
                return Err(err);
            }
            let count = self.submitted.lock().await.len() as i64;
            let application = NewAdoption::new(
                request.animal_id,
                request.applicant_name.clone(),
                request.applicant_email.clone(),
                request.message.clone(),
            )
            .into_application(AdoptionId::new(count), timestamp::now());
            Ok(Some(application))
        }
    }

    async fn seeded_store() -> InMemoryAnimalStore {
        let store = InMemoryAnimalStore::new();
        store.seed_if_empty().await.unwrap();
        store
    }

    fn ann() -> Applicant {
        Applicant::from_parts(
            Some("Ann".to_string()),
            Some("a@x.com".to_string()),
            None,
        )
        .unwrap()
    }

    async fn status_of(store: &InMemoryAnimalStore, id: i64) -> AnimalStatus {
        store
            .get_animal(AnimalId::new(id))
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[test]
    fn test_applicant_requires_name_and_email() {
        assert!(Applicant::from_parts(None, Some("a@x.com".into()), None).is_err());
        assert!(Applicant::from_parts(Some("Ann".into()), Some(" ".into()), None).is_err());
        assert!(Applicant::from_parts(Some("Ann".into()), Some("a@x.com".into()), None).is_ok());
    }

    #[tokio::test]
    async fn test_successful_adoption_marks_animal_adopted() {
        let store = seeded_store().await;
        let client = Arc::new(StubClient::default());
        let coordinator = AdoptionCoordinator::new(store.clone(), client.clone());

        let confirmation = coordinator.adopt(AnimalId::new(1), ann()).await.unwrap();

        assert_eq!(confirmation.animal_id, AnimalId::new(1));
        assert_eq!(confirmation.applicant_name, "Ann");
        assert_eq!(confirmation.adoption_id, Some(AdoptionId::new(1)));
        assert_eq!(status_of(&store, 1).await, AnimalStatus::Adopted);

        let submitted = client.submitted.lock().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].animal_id, AnimalId::new(1));
        assert_eq!(submitted[0].applicant_email, "a@x.com");
    }

    #[tokio::test]
    async fn test_unknown_animal_never_reaches_remote() {
        let client = Arc::new(StubClient::default());
        let coordinator = AdoptionCoordinator::new(seeded_store().await, client.clone());

        let err = coordinator.adopt(AnimalId::new(404), ann()).await.unwrap_err();

        assert!(matches!(err, AdoptError::AnimalNotFound(_)));
        assert!(client.submitted.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_locally_adopted_animal_never_reaches_remote() {
        let store = seeded_store().await;
        store.mark_adopted(AnimalId::new(2)).await.unwrap();
        let client = Arc::new(StubClient::default());
        let coordinator = AdoptionCoordinator::new(store, client.clone());

        let err = coordinator.adopt(AnimalId::new(2), ann()).await.unwrap_err();

        assert!(matches!(err, AdoptError::AlreadyAdopted(_)));
        assert!(client.submitted.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_remote_failures_leave_animal_available() {
        let failures = [
            ClientError::Rejected {
                status: 409,
                message: "exists".to_string(),
            },
            ClientError::Unreachable("connection refused".to_string()),
            ClientError::TimedOut(Duration::from_secs(1)),
            ClientError::UnexpectedStatus(200),
        ];

        for failure in failures {
            let store = seeded_store().await;
            let coordinator =
                AdoptionCoordinator::new(store.clone(), Arc::new(StubClient::failing(failure)));

            let err = coordinator.adopt(AnimalId::new(3), ann()).await.unwrap_err();

            assert!(matches!(err, AdoptError::Remote(_)));
            assert_eq!(status_of(&store, 3).await, AnimalStatus::Available);
        }
    }

    #[tokio::test]
    async fn test_local_update_failure_is_reported_distinctly() {
        let store = seeded_store().await;
        store.set_fail_on_update(true).await;
        let client = Arc::new(StubClient::default());
        let coordinator = AdoptionCoordinator::new(store.clone(), client.clone());

        let err = coordinator.adopt(AnimalId::new(4), ann()).await.unwrap_err();

        match err {
            AdoptError::LocalStatusNotUpdated {
                animal_id,
                adoption_id,
                ..
            } => {
                assert_eq!(animal_id, AnimalId::new(4));
                assert_eq!(adoption_id, Some(AdoptionId::new(1)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // The remote record exists while the animal still reads as available
        assert_eq!(client.submitted.lock().await.len(), 1);
        assert_eq!(status_of(&store, 4).await, AnimalStatus::Available);
    }
}
