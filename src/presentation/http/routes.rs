//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use super::handlers;
use crate::config::{StorageBackend, StorageSettings};
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Multipart framing and JSON envelope allowance on top of the file size limit
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let storage = state.settings.storage.clone();

    let router = Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics));

    with_file_service(router, &storage)
        .layer(DefaultBodyLimit::max(body_limit(&storage)))
        .with_state(state)
}

/// Serve stored files of the local backend under its public URL prefix.
fn with_file_service(router: Router<AppState>, storage: &StorageSettings) -> Router<AppState> {
    let prefix = storage.public_base_url.trim_end_matches('/');
    match storage.backend {
        StorageBackend::Local if prefix.starts_with('/') && prefix.len() > 1 => {
            router.nest_service(prefix, ServeDir::new(&storage.root))
        }
        StorageBackend::Local => router,
    }
}

/// Largest accepted request body. Base64 inflates payloads by a third.
fn body_limit(storage: &StorageSettings) -> usize {
    storage
        .max_file_size
        .saturating_add(storage.max_file_size / 3 + 1)
        .saturating_add(BODY_LIMIT_OVERHEAD)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/partnerships", partnership_routes())
        .nest("/reservations", reservation_routes())
        .nest("/photos", photo_routes())
}

/// Partnership intake routes
fn partnership_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::partnership::create_partnership))
        .route("/register", post(handlers::partnership::register_partnership))
        .route("/{submission_id}", get(handlers::partnership::get_partnership))
}

/// Reservation photo routes
fn reservation_routes() -> Router<AppState> {
    Router::new().route(
        "/{reservation_number}/photos",
        post(handlers::photo::upload_photo).delete(handlers::photo::delete_reservation_photos),
    )
}

/// Stored photo routes
fn photo_routes() -> Router<AppState> {
    Router::new()
        .route("/", delete(handlers::photo::delete_photo))
        .route("/base64", post(handlers::photo::upload_photo_base64))
        .route("/thumbnail", post(handlers::photo::create_thumbnail))
        .route("/validate", get(handlers::photo::validate_path))
}
