//! Adoption service entry point.

use std::sync::Arc;

use adoption_service::AppState;
use adoption_service::config::Config;
use adoption_store::SqliteAdoptionStore;
use common::service;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    service::init_tracing(&config.log_level, config.json_logs);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Open the adoption store and make sure the schema exists
    let store = SqliteAdoptionStore::connect(&config.database_url)
        .await
        .expect("failed to open adoption database");
    store
        .run_migrations()
        .await
        .expect("failed to initialize adoption schema");
    tracing::info!(database_url = %config.database_url, "adoption store ready");

    // 4. Build the application
    let state = Arc::new(AppState::new(store.clone()));
    let app = adoption_service::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting adoption service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(service::shutdown_signal("adoption-service"))
        .await
        .expect("server error");

    // 6. Release the store once no handler can reach it any more
    store.close().await;
    tracing::info!("adoption service shut down gracefully");
}
