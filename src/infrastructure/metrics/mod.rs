//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Database query duration histograms
//! - Partnership submissions by kind
//! - Geocoding lookups by outcome
//! - Photo store operations by operation and outcome

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "partnership_service";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Database query duration histogram
pub static DB_QUERY_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];
    HistogramVec::new(
        HistogramOpts::new("db_query_duration_seconds", "Database query latency in seconds")
            .namespace(NAMESPACE)
            .buckets(buckets),
        &["operation", "table"],
    )
    .expect("Failed to create DB_QUERY_DURATION_SECONDS metric")
});

/// Persisted partnership records by kind ("application", "location")
pub static PARTNERSHIP_SUBMISSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("partnership_submissions_total", "Persisted partnership records")
            .namespace(NAMESPACE),
        &["kind"],
    )
    .expect("Failed to create PARTNERSHIP_SUBMISSIONS_TOTAL metric")
});

/// Geocoding lookups by outcome ("success", "no_match", "error", "rejected")
pub static GEOCODING_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("geocoding_requests_total", "Address geocoding lookups").namespace(NAMESPACE),
        &["outcome"],
    )
    .expect("Failed to create GEOCODING_REQUESTS_TOTAL metric")
});

/// Photo store operations by operation and outcome
pub static PHOTO_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("photo_operations_total", "Photo store operations").namespace(NAMESPACE),
        &["operation", "outcome"],
    )
    .expect("Failed to create PHOTO_OPERATIONS_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(DB_QUERY_DURATION_SECONDS.clone()))
        .expect("Failed to register DB_QUERY_DURATION_SECONDS");
    registry
        .register(Box::new(PARTNERSHIP_SUBMISSIONS_TOTAL.clone()))
        .expect("Failed to register PARTNERSHIP_SUBMISSIONS_TOTAL");
    registry
        .register(Box::new(GEOCODING_REQUESTS_TOTAL.clone()))
        .expect("Failed to register GEOCODING_REQUESTS_TOTAL");
    registry
        .register(Box::new(PHOTO_OPERATIONS_TOTAL.clone()))
        .expect("Failed to register PHOTO_OPERATIONS_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Helper to record HTTP request metrics
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Helper to record database query metrics
pub fn record_db_query(operation: &str, table: &str, duration_secs: f64) {
    DB_QUERY_DURATION_SECONDS
        .with_label_values(&[operation, table])
        .observe(duration_secs);
}

pub fn record_partnership_submission(kind: &str) {
    PARTNERSHIP_SUBMISSIONS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn record_geocoding(outcome: &str) {
    GEOCODING_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_photo_operation(operation: &str, outcome: &str) {
    PHOTO_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Force lazy initialization
        let _ = &*REGISTRY;
        let _ = &*HTTP_REQUESTS_TOTAL;
        let _ = &*GEOCODING_REQUESTS_TOTAL;
    }

    #[test]
    fn test_record_http_request() {
        record_http_request("GET", "/health", 200, 0.001);
        let metrics = gather_metrics();
        assert!(metrics.contains("partnership_service_http_requests_total"));
    }

    #[test]
    fn test_record_domain_counters() {
        record_partnership_submission("application");
        record_geocoding("success");
        record_photo_operation("upload", "success");
        let metrics = gather_metrics();
        assert!(metrics.contains("partnership_service_partnership_submissions_total"));
        assert!(metrics.contains("partnership_service_geocoding_requests_total"));
        assert!(metrics.contains("partnership_service_photo_operations_total"));
    }
}
