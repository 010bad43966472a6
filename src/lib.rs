//! # Partnership Service Library
//!
//! Partnership intake and reservation photo storage:
//! - Partner applications with geocoded addresses and business hours
//! - Location-only partner registration
//! - Reservation photo upload, thumbnails and removal
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, value objects and store/geocoder traits
//! - **Application Layer**: Partnership service and DTOs
//! - **Infrastructure Layer**: PostgreSQL, Kakao geocoding, local photo storage, metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! partnership_service/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, geocoding and storage implementations
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, clock, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
