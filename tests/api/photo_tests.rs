//! Photo API Tests

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use crate::common::{png_bytes, TestApp, MAX_FILE_SIZE};

fn png_form(bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes)
            .file_name("storefront.png")
            .mime_type("image/png"),
    )
}

async fn upload(app: &TestApp, reservation: &str) -> Value {
    let response = app
        .server
        .post(&format!("/api/v1/reservations/{}/photos", reservation))
        .multipart(png_form(png_bytes(96, 64)))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_multipart_upload_stores_original_and_thumbnail() {
    let app = TestApp::new();

    let body = upload(&app, "RES-100").await;

    let file_path = body["filePath"].as_str().unwrap();
    let thumbnail_path = body["thumbnailPath"].as_str().unwrap();
    assert!(file_path.starts_with("reservations/RES-100/"));
    assert!(thumbnail_path.starts_with("reservations/RES-100/thumbnails/"));
    assert_eq!(body["contentType"], "image/png");
    assert_eq!(body["originalFileName"], "storefront.png");
    assert_eq!(body["fileUrl"], format!("/files/{}", file_path));
    assert!(app.stored(file_path));
    assert!(app.stored(thumbnail_path));
}

#[tokio::test]
async fn test_stored_files_are_served() {
    let app = TestApp::new();
    let body = upload(&app, "RES-101").await;

    let response = app.server.get(body["fileUrl"].as_str().unwrap()).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.as_bytes().len() as u64, body["fileSize"].as_u64().unwrap());
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let app = TestApp::new();
    let form = MultipartForm::new().add_text("note", "no image here");

    let response = app
        .server
        .post("/api/v1/reservations/RES-102/photos")
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_image_upload_is_rejected() {
    let app = TestApp::new();
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"#!/bin/sh\necho hi\n".to_vec()).file_name("script.jpg"),
    );

    let response = app
        .server
        .post("/api/v1/reservations/RES-103/photos")
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = TestApp::new();
    let mut bytes = png_bytes(8, 8);
    bytes.resize(MAX_FILE_SIZE + 1, 0);

    let response = app
        .server
        .post("/api/v1/reservations/RES-104/photos")
        .multipart(png_form(bytes))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_base64_upload() {
    let app = TestApp::new();
    let data = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(20, 20)));

    let response = app
        .server
        .post("/api/v1/photos/base64")
        .json(&json!({
            "base64Data": data,
            "reservationNumber": "RES-105",
            "fileName": "inline.png"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["reservationNumber"], "RES-105");
    assert!(app.stored(body["filePath"].as_str().unwrap()));
}

#[tokio::test]
async fn test_invalid_base64_is_rejected() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/photos/base64")
        .json(&json!({ "base64Data": "%%%", "reservationNumber": "RES-106" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_thumbnail_for_stored_photo() {
    let app = TestApp::new();
    let body = upload(&app, "RES-107").await;
    let file_path = body["filePath"].as_str().unwrap();

    let response = app
        .server
        .post("/api/v1/photos/thumbnail")
        .json(&json!({ "path": file_path }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let thumb: Value = response.json();
    assert_eq!(thumb["originalPath"], file_path);
    assert_eq!(thumb["thumbnailPath"], body["thumbnailPath"]);
}

#[tokio::test]
async fn test_create_thumbnail_for_missing_photo_is_not_found() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/v1/photos/thumbnail")
        .json(&json!({ "path": "reservations/RES-108/missing.png" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_photo_twice_succeeds() {
    let app = TestApp::new();
    let body = upload(&app, "RES-109").await;
    let file_path = body["filePath"].as_str().unwrap().to_string();

    for _ in 0..2 {
        app.server
            .delete("/api/v1/photos")
            .add_query_param("path", &file_path)
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    assert!(!app.stored(&file_path));
    assert!(!app.stored(body["thumbnailPath"].as_str().unwrap()));
}

#[tokio::test]
async fn test_delete_photo_rejects_traversal() {
    let app = TestApp::new();

    let response = app
        .server
        .delete("/api/v1/photos")
        .add_query_param("path", "reservations/../../etc/passwd.jpg")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_all_photos_of_reservation() {
    let app = TestApp::new();
    let first = upload(&app, "RES-110").await;
    let other = upload(&app, "RES-111").await;

    app.server
        .delete("/api/v1/reservations/RES-110/photos")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(!app.stored(first["filePath"].as_str().unwrap()));
    assert!(app.stored(other["filePath"].as_str().unwrap()));

    app.server
        .delete("/api/v1/reservations/RES-110/photos")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_validate_path() {
    let app = TestApp::new();

    let cases = [
        ("reservations/RES-112/a.jpg", true),
        ("reservations/RES-112/thumbnails/a_thumb.jpg", true),
        ("reservations/RES-112/a.gif", false),
        ("/reservations/RES-112/a.jpg", false),
        ("reservations/../a.jpg", false),
    ];

    for (path, expected) in cases {
        let response = app
            .server
            .get("/api/v1/photos/validate")
            .add_query_param("path", path)
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["valid"], expected, "path {}", path);
    }
}
