//! API error types with HTTP response mapping.

use animal_store::AnimalStoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ErrorBody;

use crate::adoption::AdoptError;
use crate::client::ClientError;

pub const ANIMAL_NOT_FOUND: &str = "Animal not found.";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const UPSTREAM_UNREACHABLE: &str = "Could not reach the adoption service.";
pub const UPSTREAM_TIMEOUT: &str = "The adoption service did not respond in time.";
pub const UPSTREAM_UNEXPECTED: &str = "Unexpected response from the adoption service.";
pub const STATUS_NOT_UPDATED: &str =
    "The adoption was recorded, but the animal's status could not be updated.";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Resource not found.
    NotFound(String),
    /// The animal is already adopted.
    Conflict(String),
    /// The adoption service's own verdict, forwarded as-is.
    Upstream { status: StatusCode, message: String },
    /// No response from the adoption service.
    BadGateway(String),
    /// The configured timeout for the adoption service elapsed.
    GatewayTimeout(String),
    /// Server-side failure with a specific public message; `detail` is logged.
    Fault {
        message: &'static str,
        detail: String,
    },
    /// Internal server error; the message is logged, never returned.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Upstream { status, message } => (status, message),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::GatewayTimeout(msg) => (StatusCode::GATEWAY_TIMEOUT, msg),
            ApiError::Fault { message, detail } => {
                tracing::error!(error = %detail, "server fault");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };

        (status, axum::Json(ErrorBody::new(message))).into_response()
    }
}

impl From<AnimalStoreError> for ApiError {
    fn from(err: AnimalStoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<AdoptError> for ApiError {
    fn from(err: AdoptError) -> Self {
        match err {
            AdoptError::MissingApplicantDetails => ApiError::BadRequest(err.to_string()),
            AdoptError::AnimalNotFound(_) => ApiError::NotFound(ANIMAL_NOT_FOUND.to_string()),
            AdoptError::AlreadyAdopted(_) => ApiError::Conflict(err.to_string()),
            AdoptError::Remote(remote) => remote.into(),
            AdoptError::LocalStatusNotUpdated { .. } => ApiError::Fault {
                message: STATUS_NOT_UPDATED,
                detail: err.to_string(),
            },
            AdoptError::Store(store) => store.into(),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rejected { status, message } => match StatusCode::from_u16(status) {
                Ok(status) => ApiError::Upstream { status, message },
                Err(_) => ApiError::BadGateway(message),
            },
            ClientError::Unreachable(detail) => {
                tracing::warn!(error = %detail, "adoption service unreachable");
                ApiError::BadGateway(UPSTREAM_UNREACHABLE.to_string())
            }
            ClientError::TimedOut(_) => ApiError::GatewayTimeout(UPSTREAM_TIMEOUT.to_string()),
            ClientError::UnexpectedStatus(_) => ApiError::Fault {
                message: UPSTREAM_UNEXPECTED,
                detail: err.to_string(),
            },
        }
    }
}
