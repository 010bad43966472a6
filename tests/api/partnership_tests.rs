//! Partnership API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{application_body, TestApp, EXPECTED_SUBMISSION_ID, KNOWN_ADDRESS};

#[tokio::test]
async fn test_create_partnership_with_client_coordinates_skips_geocoding() {
    let app = TestApp::new();
    let mut body = application_body();
    body["latitude"] = json!(35.1796);
    body["longitude"] = json!(129.0756);

    let response = app.server.post("/api/v1/partnerships").json(&body).await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["submissionId"], EXPECTED_SUBMISSION_ID);
    assert_eq!(created["latitude"], 35.1796);
    assert_eq!(created["longitude"], 129.0756);
    assert_eq!(app.geocoder.calls(), 0);
    assert_eq!(app.repository.len(), 1);
}

#[tokio::test]
async fn test_zero_coordinates_are_resolved_from_address() {
    let app = TestApp::new();
    let mut body = application_body();
    body["latitude"] = json!(0);
    body["longitude"] = json!(0);

    let response = app.server.post("/api/v1/partnerships").json(&body).await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["latitude"], 37.5665);
    assert_eq!(created["longitude"], 126.978);
    assert_eq!(app.geocoder.calls(), 1);
}

#[tokio::test]
async fn test_business_hours_keep_only_enabled_days() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/partnerships")
        .json(&application_body())
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["is24Hours"], false);
    assert_eq!(created["businessHours"], json!({ "MONDAY": "09:00-18:00" }));
}

#[tokio::test]
async fn test_24_hour_business_marks_every_supplied_day() {
    let app = TestApp::new();
    let mut body = application_body();
    body["is24Hours"] = json!(true);

    let response = app.server.post("/api/v1/partnerships").json(&body).await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(
        created["businessHours"],
        json!({ "MONDAY": "24시간", "SUNDAY": "24시간" })
    );
}

#[tokio::test]
async fn test_unresolvable_address_saves_nothing() {
    let app = TestApp::new();
    let mut body = application_body();
    body["address"] = json!("어딘가 없는 주소 999");

    let response = app.server.post("/api/v1/partnerships").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = TestApp::new();
    let mut body = application_body();
    body["email"] = json!("not-an-email");

    let response = app.server.post("/api/v1/partnerships").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.geocoder.calls(), 0);
    assert!(app.repository.is_empty());
}

#[tokio::test]
async fn test_same_second_submission_conflicts() {
    let app = TestApp::new();

    app.server
        .post("/api/v1/partnerships")
        .json(&application_body())
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .post("/api/v1/partnerships")
        .json(&application_body())
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(app.repository.len(), 1);
}

#[tokio::test]
async fn test_get_by_submission_id_round_trip() {
    let app = TestApp::new();
    let body = application_body();
    app.server
        .post("/api/v1/partnerships")
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get(&format!("/api/v1/partnerships/{}", EXPECTED_SUBMISSION_ID))
        .await;

    response.assert_status(StatusCode::OK);
    let found: Value = response.json();
    assert_eq!(found["businessName"], body["businessName"]);
    assert_eq!(found["email"], body["email"]);
    assert_eq!(found["address"], KNOWN_ADDRESS);
}

#[tokio::test]
async fn test_unknown_submission_id_is_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/api/v1/partnerships/PN000000000000").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("PN000000000000"));
}

#[tokio::test]
async fn test_register_partnership_always_geocodes() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/partnerships/register")
        .json(&json!({
            "address": KNOWN_ADDRESS,
            "latitude": 10.0,
            "longitude": 20.0
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["latitude"], 37.5665);
    assert_eq!(created["longitude"], 126.978);
    assert!(created.get("submissionId").is_none());
    assert_eq!(app.geocoder.calls(), 1);
}

#[tokio::test]
async fn test_register_unresolvable_address_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/partnerships/register")
        .json(&json!({ "address": "nowhere" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(app.repository.is_empty());
}
