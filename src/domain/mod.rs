//! # Domain Layer
//!
//! The domain layer contains the core business rules of the partnership
//! service. It is independent of any external frameworks or infrastructure
//! concerns.
//!
//! ## Structure
//!
//! - **entities**: Partnership and Photo types with their store traits
//! - **value_objects**: SubmissionId, Coordinates, BusinessHours
//! - **services**: Geocoder contract and photo path rules
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Store traits define data access contracts
//! - Value objects own their formatting rules

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
