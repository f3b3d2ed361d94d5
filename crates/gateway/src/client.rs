//! Client for the adoption service's `POST /adoptions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use common::{AdoptionApplication, AdoptionRequest, ErrorBody};
use reqwest::StatusCode;
use thiserror::Error;

/// Used when a rejection carries no `error` message of its own.
pub const REMOTE_FAILURE: &str = "Adoption failed in the adoption service.";

/// Errors from submitting an application to the adoption service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("adoption service rejected the application ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// No response was received (connection refused, reset, DNS, ...).
    #[error("adoption service unreachable: {0}")]
    Unreachable(String),

    /// The configured request timeout elapsed before a response arrived.
    #[error("adoption service did not respond within {0:?}")]
    TimedOut(Duration),

    /// A success status other than 201 Created.
    #[error("unexpected response status from adoption service: {0}")]
    UnexpectedStatus(u16),
}

/// Records adoption applications in the adoption service.
#[async_trait]
pub trait AdoptionClient: Send + Sync {
    /// Submits an application and waits for the service's verdict.
    ///
    /// `Ok` means the service confirmed the record with 201 Created. The
    /// record itself is `None` when the confirmation body could not be
    /// decoded; the application still exists remotely in that case.
    async fn submit(
        &self,
        request: &AdoptionRequest,
    ) -> Result<Option<AdoptionApplication>, ClientError>;
}

/// HTTP client for the adoption service.
///
/// No timeout is applied unless [`with_timeout`](Self::with_timeout) is
/// used; a hung adoption service then stalls the calling request.
#[derive(Clone)]
pub struct HttpAdoptionClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpAdoptionClient {
    /// Creates a new client targeting the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Bounds each submission by `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn adoptions_url(&self) -> String {
        format!("{}/adoptions", self.base_url.trim_end_matches('/'))
    }

    fn classify_send_error(&self, err: reqwest::Error) -> ClientError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => ClientError::TimedOut(timeout),
            _ => ClientError::Unreachable(err.to_string()),
        }
    }
}

#[async_trait]
impl AdoptionClient for HttpAdoptionClient {
    async fn submit(
        &self,
        request: &AdoptionRequest,
    ) -> Result<Option<AdoptionApplication>, ClientError> {
        let mut builder = self.client.post(self.adoptions_url()).json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;
        let status = response.status();

        if status == StatusCode::CREATED {
            let application = response
                .json::<AdoptionApplication>()
                .await
                .inspect_err(|e| {
                    tracing::warn!(error = %e, "adoption confirmed but body unreadable");
                })
                .ok();
            return Ok(application);
        }

        if status.is_success() {
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| REMOTE_FAILURE.to_string());

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
