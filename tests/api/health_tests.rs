//! Health Check API Tests

use axum::http::{header, HeaderValue, StatusCode};
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.server.get("/health/live").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_store_and_storage() {
    let app = TestApp::new();

    let response = app.server.get("/health/ready").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["checks"]["database"]["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_request_counters() {
    let app = TestApp::new();
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;

    response.assert_status(StatusCode::OK);
    assert!(response
        .text()
        .contains("partnership_service_http_requests_total"));
}

#[tokio::test]
async fn test_cors_headers_are_applied_to_traced_routes() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("*"))
    );
}
