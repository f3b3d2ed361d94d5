//! API error types with HTTP response mapping.

use adoption_store::AdoptionStoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ErrorBody;

/// Shown when an animal already has an application.
pub const ALREADY_ADOPTED: &str =
    "This animal already has an adoption application or has already been adopted.";

/// Shown for storage faults; the detail only goes to the log.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// The animal already has an application.
    Conflict(String),
    /// Internal server error; the message is logged, never returned.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };

        (status, axum::Json(ErrorBody::new(message))).into_response()
    }
}

impl From<AdoptionStoreError> for ApiError {
    fn from(err: AdoptionStoreError) -> Self {
        match err {
            AdoptionStoreError::AlreadyExists(_) => ApiError::Conflict(ALREADY_ADOPTED.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
