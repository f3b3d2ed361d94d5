//! Integration tests for the adoption service API.

use std::sync::{Arc, OnceLock};

use adoption_service::AppState;
use adoption_store::{AdoptionStore, AnimalId, InMemoryAdoptionStore, SqliteAdoptionStore};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup_with_store<S: AdoptionStore + 'static>(store: S) -> axum::Router {
    adoption_service::create_app(Arc::new(AppState::new(store)), get_metrics_handle())
}

async fn sqlite_store() -> SqliteAdoptionStore {
    let store = SqliteAdoptionStore::in_memory().await.unwrap();
    store.run_migrations().await.unwrap();
    store
}

async fn post_adoption(app: &axum::Router, body: Body) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/adoptions")
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(app: &axum::Router, payload: Value) -> (StatusCode, Value) {
    post_adoption(app, Body::from(payload.to_string())).await
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_with_store(InMemoryAdoptionStore::new());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_adoption_returns_full_record() {
    let store = sqlite_store().await;
    let app = setup_with_store(store.clone());

    let (status, json) = post_json(
        &app,
        json!({
            "animalId": 1,
            "applicantName": "Ann",
            "applicantEmail": "a@x.com",
            "message": "I have a quiet flat."
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"], 1);
    assert_eq!(json["animalId"], 1);
    assert_eq!(json["applicantName"], "Ann");
    assert_eq!(json["applicantEmail"], "a@x.com");
    assert_eq!(json["message"], "I have a quiet flat.");
    let created_at = json["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'), "not ISO-8601 UTC: {created_at}");

    assert_eq!(store.count_adoptions().await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_message_defaults_to_empty() {
    let app = setup_with_store(InMemoryAdoptionStore::new());

    let (status, json) = post_json(
        &app,
        json!({ "animalId": 2, "applicantName": "Bo", "applicantEmail": "bo@x.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "");
}

#[tokio::test]
async fn test_missing_or_empty_fields_rejected() {
    let store = InMemoryAdoptionStore::new();
    let app = setup_with_store(store.clone());

    let payloads = [
        json!({ "applicantName": "Ann", "applicantEmail": "a@x.com" }),
        json!({ "animalId": 1, "applicantEmail": "a@x.com" }),
        json!({ "animalId": 1, "applicantName": "Ann" }),
        json!({ "animalId": 1, "applicantName": "", "applicantEmail": "a@x.com" }),
        json!({ "animalId": 1, "applicantName": "Ann", "applicantEmail": "" }),
        json!({ "animalId": 0, "applicantName": "Ann", "applicantEmail": "a@x.com" }),
        json!({}),
    ];

    for payload in payloads {
        let (status, json) = post_json(&app, payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert!(json["error"].as_str().unwrap().contains("required"));
    }

    assert_eq!(store.count_adoptions().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let app = setup_with_store(InMemoryAdoptionStore::new());

    let (status, json) = post_adoption(&app, Body::from("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let (status, _) = post_json(
        &app,
        json!({ "animalId": "one", "applicantName": "Ann", "applicantEmail": "a@x.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_second_application_for_same_animal_conflicts() {
    let store = sqlite_store().await;
    let app = setup_with_store(store.clone());

    let first = json!({ "animalId": 3, "applicantName": "Ann", "applicantEmail": "a@x.com" });
    let second = json!({ "animalId": 3, "applicantName": "Bo", "applicantEmail": "bo@x.com" });

    let (status, _) = post_json(&app, first).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = post_json(&app, second).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["error"].as_str().unwrap().contains("already"));

    let stored = store.find_by_animal(AnimalId::new(3)).await.unwrap().unwrap();
    assert_eq!(stored.applicant_name, "Ann");
    assert_eq!(store.count_adoptions().await.unwrap(), 1);
}

#[tokio::test]
async fn test_concurrent_applications_only_one_created() {
    let store = sqlite_store().await;
    let app = setup_with_store(store.clone());

    let mut handles = Vec::new();
    for i in 0..10 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post_json(
                &app,
                json!({
                    "animalId": 4,
                    "applicantName": format!("Applicant {i}"),
                    "applicantEmail": format!("a{i}@x.com")
                }),
            )
            .await
            .0
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 9);
    assert_eq!(store.count_adoptions().await.unwrap(), 1);
}

#[tokio::test]
async fn test_storage_fault_returns_generic_error() {
    let store = InMemoryAdoptionStore::new();
    store.set_fail_on_insert(true).await;
    let app = setup_with_store(store);

    let (status, json) = post_json(
        &app,
        json!({ "animalId": 5, "applicantName": "Ann", "applicantEmail": "a@x.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], adoption_service::error::INTERNAL_ERROR);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup_with_store(InMemoryAdoptionStore::new());

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
