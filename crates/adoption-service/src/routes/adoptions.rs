//! Recording adoption applications.

use std::sync::Arc;

use adoption_store::{AdoptionApplication, AdoptionStore, AnimalId, NewAdoption};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::error::{ALREADY_ADOPTED, ApiError};

/// Shown when a required field is missing or blank.
pub const MISSING_FIELDS: &str = "animalId, applicantName and applicantEmail are required.";

/// Shared application state accessible from all handlers.
pub struct AppState<S: AdoptionStore> {
    pub store: S,
}

impl<S: AdoptionStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

// -- Request types --

/// Body of `POST /adoptions`. Every field is optional at the wire level so
/// that missing fields produce our own 400 instead of a decoder error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdoptionRequest {
    pub animal_id: Option<i64>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub message: Option<String>,
}

impl CreateAdoptionRequest {
    /// Checks the required fields and builds the application to store.
    pub fn validate(self) -> Result<NewAdoption, ApiError> {
        let animal_id = self.animal_id.filter(|id| *id > 0);
        let name = self.applicant_name.filter(|s| !s.trim().is_empty());
        let email = self.applicant_email.filter(|s| !s.trim().is_empty());

        match (animal_id, name, email) {
            (Some(animal_id), Some(name), Some(email)) => Ok(NewAdoption::new(
                AnimalId::new(animal_id),
                name,
                email,
                self.message,
            )),
            _ => Err(ApiError::BadRequest(MISSING_FIELDS.to_string())),
        }
    }
}

// -- Handlers --

/// POST /adoptions: record an application unless the animal already has one.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: AdoptionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateAdoptionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AdoptionApplication>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected adoption body");
        ApiError::BadRequest(MISSING_FIELDS.to_string())
    })?;
    let adoption = req.validate()?;
    let animal_id = adoption.animal_id;

    // Fast path only; the unique constraint decides races in `insert`
    if state.store.find_by_animal(animal_id).await?.is_some() {
        metrics::counter!("adoption_conflicts_total").increment(1);
        return Err(ApiError::Conflict(ALREADY_ADOPTED.to_string()));
    }

    let application = state.store.insert(adoption).await.inspect_err(|_| {
        metrics::counter!("adoption_insert_failures_total").increment(1);
    })?;

    metrics::counter!("adoptions_recorded_total").increment(1);
    tracing::info!(
        adoption_id = %application.id,
        %animal_id,
        applicant = %application.applicant_name,
        "adoption application recorded"
    );

    Ok((StatusCode::CREATED, Json(application)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> CreateAdoptionRequest {
        CreateAdoptionRequest {
            animal_id: Some(1),
            applicant_name: Some("Ann".to_string()),
            applicant_email: Some("a@x.com".to_string()),
            message: None,
        }
    }

    #[test]
    fn test_complete_request_validates() {
        let adoption = complete_request().validate().unwrap();
        assert_eq!(adoption.animal_id, AnimalId::new(1));
        assert_eq!(adoption.applicant_name, "Ann");
        assert_eq!(adoption.message, "");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let cases = [
            CreateAdoptionRequest {
                animal_id: None,
                ..complete_request()
            },
            CreateAdoptionRequest {
                animal_id: Some(0),
                ..complete_request()
            },
            CreateAdoptionRequest {
                applicant_name: Some(String::new()),
                ..complete_request()
            },
            CreateAdoptionRequest {
                applicant_email: Some("   ".to_string()),
                ..complete_request()
            },
            CreateAdoptionRequest::default(),
        ];

        for req in cases {
            assert!(matches!(req.validate(), Err(ApiError::BadRequest(_))));
        }
    }
}
