//! Animal listings and the adoption endpoint.

use std::sync::Arc;

use animal_store::{Animal, AnimalId, AnimalStore};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::adoption::{AdoptionConfirmation, AdoptionCoordinator, Applicant};
use crate::client::AdoptionClient;
use crate::error::{ANIMAL_NOT_FOUND, ApiError};

/// Shared application state accessible from all handlers.
pub struct AppState<A: AnimalStore, C: AdoptionClient> {
    pub animals: A,
    pub coordinator: AdoptionCoordinator<A, C>,
}

impl<A: AnimalStore + Clone, C: AdoptionClient> AppState<A, C> {
    pub fn new(animals: A, client: C) -> Self {
        let coordinator = AdoptionCoordinator::new(animals.clone(), client);
        Self {
            animals,
            coordinator,
        }
    }
}

// -- Request types --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptRequest {
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub message: Option<String>,
}

// -- Handlers --

/// GET /animals: every animal, ordered by id.
#[tracing::instrument(skip(state))]
pub async fn list<A: AnimalStore + 'static, C: AdoptionClient + 'static>(
    State(state): State<Arc<AppState<A, C>>>,
) -> Result<Json<Vec<Animal>>, ApiError> {
    Ok(Json(state.animals.list_animals().await?))
}

/// GET /animals/:id: a single animal.
#[tracing::instrument(skip(state))]
pub async fn get<A: AnimalStore + 'static, C: AdoptionClient + 'static>(
    State(state): State<Arc<AppState<A, C>>>,
    Path(id): Path<String>,
) -> Result<Json<Animal>, ApiError> {
    let animal_id = parse_animal_id(&id)?;
    let animal = state
        .animals
        .get_animal(animal_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(ANIMAL_NOT_FOUND.to_string()))?;

    Ok(Json(animal))
}

/// POST /animals/:id/adopt: submit an adoption application.
#[tracing::instrument(skip(state, payload))]
pub async fn adopt<A: AnimalStore + 'static, C: AdoptionClient + 'static>(
    State(state): State<Arc<AppState<A, C>>>,
    Path(id): Path<String>,
    payload: Result<Json<AdoptRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AdoptionConfirmation>), ApiError> {
    // Applicant details are checked before anything else, including the id
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected adoption body");
            AdoptRequest::default()
        }
    };
    let applicant = Applicant::from_parts(req.applicant_name, req.applicant_email, req.message)?;
    let animal_id = parse_animal_id(&id)?;

    let confirmation = state.coordinator.adopt(animal_id, applicant).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// Ids that are not integers cannot name a stored animal.
fn parse_animal_id(id: &str) -> Result<AnimalId, ApiError> {
    id.parse()
        .map_err(|_| ApiError::NotFound(ANIMAL_NOT_FOUND.to_string()))
}

