//! Gateway entry point.

use std::sync::Arc;

use animal_store::{AnimalStoreExt, SqliteAnimalStore};
use common::service;
use gateway::AppState;
use gateway::client::HttpAdoptionClient;
use gateway::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    service::init_tracing(&config.log_level, config.json_logs);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Open the animal store, create the schema and seed sample animals
    let store = SqliteAnimalStore::connect(&config.database_url)
        .await
        .expect("failed to open animal database");
    store
        .run_migrations()
        .await
        .expect("failed to initialize animal schema");
    let seeded = store
        .seed_if_empty()
        .await
        .expect("failed to seed animal store");
    tracing::info!(database_url = %config.database_url, ?seeded, "animal store ready");

    // 4. Client for the adoption service
    let mut client = HttpAdoptionClient::new(config.adoption_service_url.clone());
    match config.adoption_service_timeout {
        Some(timeout) => client = client.with_timeout(timeout),
        None => tracing::info!("no timeout configured for adoption service calls"),
    }

    // 5. Build the application
    let state = Arc::new(AppState::new(store.clone(), client));
    let app = gateway::create_app(state, metrics_handle, Some(config.static_dir.clone()));

    // 6. Start server
    let addr = config.addr();
    tracing::info!(
        %addr,
        adoption_service = %config.adoption_service_url,
        "starting gateway"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(service::shutdown_signal("gateway"))
        .await
        .expect("server error");

    // 7. Release the store once no handler can reach it any more
    store.close().await;
    tracing::info!("gateway shut down gracefully");
}
