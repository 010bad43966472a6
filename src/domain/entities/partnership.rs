//! Partnership entity and repository trait.
//!
//! Maps to the `partnerships` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{BusinessHours, Coordinates, SubmissionId};
use crate::shared::error::AppError;

/// Details of a full partnership application.
///
/// Only the full intake path records these; location-only registrations
/// leave them out entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipApplication {
    /// `PN` + creation timestamp
    pub submission_id: SubmissionId,

    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub space_size: String,
    pub additional_info: Option<String>,

    /// Applicant accepted the terms (stored as submitted)
    pub agree_terms: bool,

    /// Open around the clock on every listed day
    pub is_24_hours: bool,

    /// Sparse weekday → hours mapping
    pub business_hours: BusinessHours,
}

/// A persisted partnership record.
///
/// Maps to the `partnerships` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - submission_id: VARCHAR(14) UNIQUE NULL
/// - business_name, owner_name, email, phone: VARCHAR NULL
/// - address: TEXT NOT NULL
/// - latitude, longitude: DOUBLE PRECISION NOT NULL
/// - business_type, space_size: VARCHAR NULL
/// - additional_info: TEXT NULL
/// - agree_terms, is_24_hours: BOOLEAN NOT NULL
/// - business_hours: JSONB NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    /// Repository-assigned primary key
    pub id: i64,

    pub address: String,
    pub coordinates: Coordinates,

    /// Present for full applications, absent for location-only registrations
    pub application: Option<PartnershipApplication>,

    pub created_at: DateTime<Utc>,
}

impl Partnership {
    pub fn submission_id(&self) -> Option<&SubmissionId> {
        self.application.as_ref().map(|a| &a.submission_id)
    }

    pub fn is_location_only(&self) -> bool {
        self.application.is_none()
    }
}

/// A partnership record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPartnership {
    pub address: String,
    pub coordinates: Coordinates,
    pub application: Option<PartnershipApplication>,
}

impl NewPartnership {
    /// Full application with resolved coordinates.
    pub fn application(
        address: String,
        coordinates: Coordinates,
        application: PartnershipApplication,
    ) -> Self {
        Self {
            address,
            coordinates,
            application: Some(application),
        }
    }

    /// Reduced record carrying only the address and its coordinates.
    pub fn location_only(address: String, coordinates: Coordinates) -> Self {
        Self {
            address,
            coordinates,
            application: None,
        }
    }
}

/// Repository trait for Partnership data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartnershipRepository: Send + Sync {
    /// Persist a new record and return it with the stored fields filled in.
    async fn save(&self, partnership: NewPartnership) -> Result<Partnership, AppError>;

    /// Find a full application by its submission ID.
    async fn find_by_submission_id(&self, submission_id: &str)
        -> Result<Option<Partnership>, AppError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
