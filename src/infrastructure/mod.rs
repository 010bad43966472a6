//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL, in-memory)
//! - Address geocoding clients (Kakao Local API)
//! - Photo storage backends
//! - Prometheus metrics

pub mod database;
pub mod geocoding;
pub mod metrics;
pub mod repositories;
pub mod storage;
