//! Gateway service: animal listings, the browser frontend, and the
//! adoption flow that spans the local animal store and the adoption
//! service.
//!
//! Provides REST endpoints under `/animals`, health and Prometheus metrics
//! endpoints, and serves the static frontend from its root path.

pub mod adoption;
pub mod client;
pub mod config;
pub mod error;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use animal_store::AnimalStore;
use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use client::AdoptionClient;
pub use routes::animals::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// When `static_dir` is set, any path not matched by the API is served from
/// that directory (`/` resolves to `index.html`).
pub fn create_app<A, C>(
    state: Arc<AppState<A, C>>,
    metrics_handle: PrometheusHandle,
    static_dir: Option<PathBuf>,
) -> Router
where
    A: AnimalStore + 'static,
    C: AdoptionClient + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    let mut app = Router::new()
        .route("/health", get(routes::ops::health))
        .route("/animals", get(routes::animals::list::<A, C>))
        .route("/animals/{id}", get(routes::animals::get::<A, C>))
        .route("/animals/{id}/adopt", post(routes::animals::adopt::<A, C>))
        .with_state(state)
        .merge(metrics_router);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
}
