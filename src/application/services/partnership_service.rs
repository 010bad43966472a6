//! Partnership Service
//!
//! Intake of partnership applications: coordinate resolution, business
//! hours normalization, submission ID generation and persistence.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    BusinessHours, Coordinates, DaySchedule, Geocoder, NewPartnership, Partnership,
    PartnershipApplication, PartnershipRepository, SubmissionId,
};
use crate::shared::clock::Clock;
use crate::shared::error::AppError;

/// Partnership service trait
#[async_trait]
pub trait PartnershipService: Send + Sync {
    /// Create and persist a full partnership application.
    async fn create_partnership(&self, dto: CreatePartnershipDto)
        -> Result<Partnership, PartnershipError>;

    /// Look up an application by its submission ID.
    async fn get_by_submission_id(&self, submission_id: &str)
        -> Result<Partnership, PartnershipError>;

    /// Persist a location-only record for an address.
    async fn register_partnership(&self, dto: RegisterPartnershipDto)
        -> Result<Partnership, PartnershipError>;
}

/// Input of a full partnership application
#[derive(Debug, Clone, Default)]
pub struct CreatePartnershipDto {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Client-supplied location; `None` means "resolve from the address"
    pub coordinates: Option<Coordinates>,
    pub business_type: String,
    pub space_size: String,
    pub additional_info: Option<String>,
    pub agree_terms: bool,
    pub is_24_hours: bool,
    pub business_hours: BTreeMap<String, DaySchedule>,
}

/// Input of a location-only registration
#[derive(Debug, Clone, Default)]
pub struct RegisterPartnershipDto {
    pub address: String,
    /// Ignored: registrations always resolve the address themselves
    pub coordinates: Option<Coordinates>,
}

/// Partnership service errors
#[derive(Debug, thiserror::Error)]
pub enum PartnershipError {
    #[error("Unable to resolve coordinates for address '{address}': {reason}")]
    AddressResolution { address: String, reason: String },

    #[error("Partnership application not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] AppError),
}

/// PartnershipService implementation
pub struct PartnershipServiceImpl<R, G, C>
where
    R: PartnershipRepository + ?Sized,
    G: Geocoder + ?Sized,
    C: Clock + ?Sized,
{
    repository: Arc<R>,
    geocoder: Arc<G>,
    clock: Arc<C>,
}

impl<R, G, C> PartnershipServiceImpl<R, G, C>
where
    R: PartnershipRepository + ?Sized,
    G: Geocoder + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(repository: Arc<R>, geocoder: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            repository,
            geocoder,
            clock,
        }
    }

    async fn geocode(&self, address: &str) -> Result<Coordinates, PartnershipError> {
        let coordinates = self
            .geocoder
            .coordinates_from_address(address)
            .await
            .map_err(|e| {
                tracing::warn!(address = %address, error = %e, "Address geocoding failed");
                PartnershipError::AddressResolution {
                    address: address.to_string(),
                    reason: e.to_string(),
                }
            })?;

        tracing::debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "Resolved coordinates from address"
        );

        Ok(coordinates)
    }

    async fn resolve_coordinates(
        &self,
        supplied: Option<Coordinates>,
        address: &str,
    ) -> Result<Coordinates, PartnershipError> {
        match supplied {
            Some(coordinates) => {
                tracing::debug!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Using client-supplied coordinates"
                );
                Ok(coordinates)
            }
            None => {
                tracing::info!("No coordinates supplied, resolving from address");
                self.geocode(address).await
            }
        }
    }
}

#[async_trait]
impl<R, G, C> PartnershipService for PartnershipServiceImpl<R, G, C>
where
    R: PartnershipRepository + ?Sized + 'static,
    G: Geocoder + ?Sized + 'static,
    C: Clock + ?Sized + 'static,
{
    async fn create_partnership(
        &self,
        dto: CreatePartnershipDto,
    ) -> Result<Partnership, PartnershipError> {
        let coordinates = self.resolve_coordinates(dto.coordinates, &dto.address).await?;

        let business_hours = BusinessHours::from_schedule(dto.is_24_hours, &dto.business_hours);
        let submission_id = SubmissionId::generate(self.clock.now());

        let application = PartnershipApplication {
            submission_id,
            business_name: dto.business_name,
            owner_name: dto.owner_name,
            email: dto.email,
            phone: dto.phone,
            business_type: dto.business_type,
            space_size: dto.space_size,
            additional_info: dto.additional_info,
            agree_terms: dto.agree_terms,
            is_24_hours: dto.is_24_hours,
            business_hours,
        };

        let saved = self
            .repository
            .save(NewPartnership::application(dto.address, coordinates, application))
            .await?;

        tracing::info!(
            id = saved.id,
            submission_id = ?saved.submission_id().map(|s| s.as_str()),
            "Partnership application saved"
        );

        Ok(saved)
    }

    async fn get_by_submission_id(
        &self,
        submission_id: &str,
    ) -> Result<Partnership, PartnershipError> {
        if !SubmissionId::is_well_formed(submission_id) {
            tracing::debug!(submission_id = %submission_id, "Malformed submission ID");
            return Err(PartnershipError::NotFound(submission_id.to_string()));
        }

        self.repository
            .find_by_submission_id(submission_id)
            .await?
            .ok_or_else(|| PartnershipError::NotFound(submission_id.to_string()))
    }

    async fn register_partnership(
        &self,
        dto: RegisterPartnershipDto,
    ) -> Result<Partnership, PartnershipError> {
        let coordinates = self.geocode(&dto.address).await?;

        let saved = self
            .repository
            .save(NewPartnership::location_only(dto.address, coordinates))
            .await?;

        tracing::info!(id = saved.id, "Partnership location registered");

        Ok(saved)
    }
}
