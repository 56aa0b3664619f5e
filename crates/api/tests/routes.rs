use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use model_monitor::RegistrySettings;
use monitor_api::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(RegistrySettings::default()));
    (state.clone(), create_router(state))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, name: &str, threshold: f64) -> (StatusCode, Value) {
    let body = monitor_body(name, threshold);
    send(app, Method::POST, "/api/v1/monitors", Some(body)).await
}

fn monitor_body(name: &str, threshold: f64) -> Value {
    json!({
        "modelName": name,
        "datasetName": "validation",
        "targetMetric": "accuracy",
        "threshold": threshold,
        "notificationChannel": "slack:#ml-oncall",
    })
}

fn performance_body(accuracy: f64) -> Value {
    json!({
        "accuracy": accuracy,
        "precision": 0.0,
        "recall": 0.0,
        "f1Score": 0.0,
        "latency": 0.0,
    })
}

#[tokio::test]
async fn test_add_and_list_monitors() {
    let (_, app) = app();

    let (status, record) = register(&app, "m1", 0.9).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["config"]["modelName"], "m1");
    assert!(record["performance"].is_null());

    let (status, list) = send(&app, Method::GET, "/api/v1/monitors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 1);
    assert_eq!(
        list["data"][0]["config"]["notificationChannel"],
        "slack:#ml-oncall"
    );
}

#[tokio::test]
async fn test_readd_returns_stored_record() {
    let (_, app) = app();
    register(&app, "m1", 0.9).await;

    let (status, created) = register(&app, "m1", 0.5).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["config"]["threshold"], 0.5);

    let (_, stored) = send(&app, Method::GET, "/api/v1/monitors/m1", None).await;
    assert_eq!(created, stored);
}

#[tokio::test]
async fn test_unknown_model_update_is_not_found() {
    let (state, app) = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/monitors/ghost/performance",
        Some(performance_body(0.5)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["updated"], false);
    assert_eq!(state.registry.monitor_count(), 0);

    let (status, _) = send(&app, Method::GET, "/api/v1/monitors/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_threshold_check_flow() {
    let (_, app) = app();
    register(&app, "m1", 0.9).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/monitors/m1/performance",
        Some(performance_body(0.8)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], true);

    let (status, check) = send(&app, Method::POST, "/api/v1/thresholds/check", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["count"], 1);
    assert_eq!(check["raised"][0]["type"], "accuracyThreshold");
    assert!(check["raised"][0]["message"]
        .as_str()
        .unwrap()
        .contains("m1"));

    send(&app, Method::POST, "/api/v1/thresholds/check", None).await;

    let (_, alerts) = send(&app, Method::GET, "/api/v1/alerts", None).await;
    assert_eq!(alerts["count"], 2);

    let (_, latest) = send(&app, Method::GET, "/api/v1/alerts?limit=1", None).await;
    assert_eq!(latest["count"], 1);
    assert_eq!(latest["data"][0]["id"], alerts["data"][1]["id"]);
}

#[tokio::test]
async fn test_drift_update() {
    let (_, app) = app();
    register(&app, "m1", 0.9).await;

    let drift = json!({
        "featureImportance": { "age": 0.3, "income": 0.7 },
        "distributionShift": { "income": true },
    });
    let (status, _) = send(&app, Method::PUT, "/api/v1/monitors/m1/drift", Some(drift)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, record) = send(&app, Method::GET, "/api/v1/monitors/m1", None).await;
    assert_eq!(record["dataDrift"]["distributionShift"]["income"], true);
    assert_eq!(record["dataDrift"]["featureImportance"]["income"], 0.7);
}

#[tokio::test]
async fn test_health_reports_counts() {
    let (_, app) = app();
    register(&app, "m1", 0.9).await;

    let (status, health) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["monitor_count"], 1);
    assert_eq!(health["alert_count"], 0);
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let (_, app) = app();
    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
