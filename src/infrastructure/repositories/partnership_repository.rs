//! Partnership Repository Implementation
//!
//! PostgreSQL implementation of the PartnershipRepository trait.
//! Business hours are stored as a JSONB object.

use std::collections::BTreeMap;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::{
    BusinessHours, Coordinates, NewPartnership, Partnership, PartnershipApplication,
    PartnershipRepository, SubmissionId,
};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Database row representation matching the partnerships table schema.
#[derive(Debug, sqlx::FromRow)]
struct PartnershipRow {
    id: i64,
    submission_id: Option<String>,
    business_name: Option<String>,
    owner_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: String,
    latitude: f64,
    longitude: f64,
    business_type: Option<String>,
    space_size: Option<String>,
    additional_info: Option<String>,
    agree_terms: bool,
    is_24_hours: bool,
    business_hours: Json<BTreeMap<String, String>>,
    created_at: DateTime<Utc>,
}

impl PartnershipRow {
    /// Convert database row to domain Partnership entity.
    ///
    /// Rows without a submission ID are location-only registrations.
    fn into_partnership(self) -> Partnership {
        let application = self.submission_id.map(|submission_id| PartnershipApplication {
            submission_id: SubmissionId::from_stored(submission_id),
            business_name: self.business_name.unwrap_or_default(),
            owner_name: self.owner_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            business_type: self.business_type.unwrap_or_default(),
            space_size: self.space_size.unwrap_or_default(),
            additional_info: self.additional_info,
            agree_terms: self.agree_terms,
            is_24_hours: self.is_24_hours,
            business_hours: BusinessHours::from_map(self.business_hours.0),
        });

        Partnership {
            id: self.id,
            address: self.address,
            coordinates: Coordinates::new(self.latitude, self.longitude),
            application,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL partnership repository implementation.
#[derive(Clone)]
pub struct PgPartnershipRepository {
    pool: PgPool,
}

impl PgPartnershipRepository {
    /// Create a new PgPartnershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnershipRepository for PgPartnershipRepository {
    /// Insert a partnership. Location-only records leave every application column NULL.
    async fn save(&self, partnership: NewPartnership) -> Result<Partnership, AppError> {
        let start = Instant::now();
        let app = partnership.application.as_ref();

        let row = sqlx::query_as::<_, PartnershipRow>(
            r#"
            INSERT INTO partnerships (
                submission_id, business_name, owner_name, email, phone,
                address, latitude, longitude, business_type, space_size,
                additional_info, agree_terms, is_24_hours, business_hours
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, submission_id, business_name, owner_name, email, phone,
                      address, latitude, longitude, business_type, space_size,
                      additional_info, agree_terms, is_24_hours, business_hours, created_at
            "#,
        )
        .bind(app.map(|a| a.submission_id.as_str()))
        .bind(app.map(|a| a.business_name.as_str()))
        .bind(app.map(|a| a.owner_name.as_str()))
        .bind(app.map(|a| a.email.as_str()))
        .bind(app.map(|a| a.phone.as_str()))
        .bind(&partnership.address)
        .bind(partnership.coordinates.latitude)
        .bind(partnership.coordinates.longitude)
        .bind(app.map(|a| a.business_type.as_str()))
        .bind(app.map(|a| a.space_size.as_str()))
        .bind(app.and_then(|a| a.additional_info.as_deref()))
        .bind(app.map(|a| a.agree_terms).unwrap_or(false))
        .bind(app.map(|a| a.is_24_hours).unwrap_or(false))
        .bind(Json(
            app.map(|a| a.business_hours.as_map().clone())
                .unwrap_or_default(),
        ))
        .fetch_one(&self.pool)
        .await?;

        metrics::record_db_query("insert", "partnerships", start.elapsed().as_secs_f64());

        Ok(row.into_partnership())
    }

    /// Find an application by submission ID.
    async fn find_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Option<Partnership>, AppError> {
        let start = Instant::now();

        let row = sqlx::query_as::<_, PartnershipRow>(
            r#"
            SELECT id, submission_id, business_name, owner_name, email, phone,
                   address, latitude, longitude, business_type, space_size,
                   additional_info, agree_terms, is_24_hours, business_hours, created_at
            FROM partnerships
            WHERE submission_id = $1
            "#,
        )
        .bind(submission_id)
        .fetch_optional(&self.pool)
        .await?;

        metrics::record_db_query("select", "partnerships", start.elapsed().as_secs_f64());

        Ok(row.map(|r| r.into_partnership()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
