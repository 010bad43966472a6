//! Response DTOs
//!
//! Data structures for API response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Partnership, PartnershipApplication, PhotoUploadResult};

/// Partnership response
///
/// Location-only registrations carry no application fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnershipResponse {
    pub id: i64,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub application: Option<ApplicationResponse>,
    pub created_at: String,
}

/// Application fields of a partnership response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub submission_id: String,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub space_size: String,
    pub additional_info: Option<String>,
    pub agree_terms: bool,
    #[serde(rename = "is24Hours")]
    pub is_24_hours: bool,
    pub business_hours: BTreeMap<String, String>,
}

impl From<PartnershipApplication> for ApplicationResponse {
    fn from(app: PartnershipApplication) -> Self {
        Self {
            submission_id: app.submission_id.into_inner(),
            business_name: app.business_name,
            owner_name: app.owner_name,
            email: app.email,
            phone: app.phone,
            business_type: app.business_type,
            space_size: app.space_size,
            additional_info: app.additional_info,
            agree_terms: app.agree_terms,
            is_24_hours: app.is_24_hours,
            business_hours: app.business_hours.into_map(),
        }
    }
}

impl From<Partnership> for PartnershipResponse {
    fn from(p: Partnership) -> Self {
        Self {
            id: p.id,
            address: p.address,
            latitude: p.coordinates.latitude,
            longitude: p.coordinates.longitude,
            application: p.application.map(ApplicationResponse::from),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Photo upload response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResponse {
    pub file_path: String,
    pub file_url: String,
    pub thumbnail_path: String,
    pub thumbnail_url: String,
    pub original_file_name: Option<String>,
    pub content_type: String,
    pub file_size: u64,
    pub checksum: String,
    pub reservation_number: String,
    pub uploaded_at: String,
}

impl From<PhotoUploadResult> for PhotoUploadResponse {
    fn from(r: PhotoUploadResult) -> Self {
        Self {
            file_path: r.file_path,
            file_url: r.file_url,
            thumbnail_path: r.thumbnail_path,
            thumbnail_url: r.thumbnail_url,
            original_file_name: r.original_file_name,
            content_type: r.content_type,
            file_size: r.file_size,
            checksum: r.checksum,
            reservation_number: r.reservation_number,
            uploaded_at: r.uploaded_at.to_rfc3339(),
        }
    }
}

/// Thumbnail creation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailResponse {
    pub original_path: String,
    pub thumbnail_path: String,
}

/// Path validation response
#[derive(Debug, Serialize)]
pub struct PathValidationResponse {
    pub path: String,
    pub valid: bool,
}
