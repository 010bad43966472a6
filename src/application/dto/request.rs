//! Request DTOs
//!
//! Data structures for API request bodies.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::Validate;

use crate::application::services::{CreatePartnershipDto, RegisterPartnershipDto};
use crate::domain::{Coordinates, DaySchedule, PhotoBase64Upload};

/// Partnership application request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnershipRequest {
    #[validate(length(min = 1, max = 255, message = "Business name must be 1-255 characters"))]
    pub business_name: String,

    #[validate(length(min = 1, max = 100, message = "Owner name must be 1-100 characters"))]
    pub owner_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 50, message = "Phone must be 1-50 characters"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    /// `0` or absent means "not supplied"
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Business type must be at most 100 characters"))]
    pub business_type: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Space size must be at most 100 characters"))]
    pub space_size: String,

    #[serde(default)]
    pub additional_info: Option<String>,

    #[serde(default)]
    pub agree_terms: bool,

    #[serde(default, rename = "is24Hours")]
    pub is_24_hours: bool,

    #[serde(default)]
    pub business_hours: Option<BTreeMap<String, BusinessHourRequest>>,
}

/// Opening hours of one weekday
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessHourRequest {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub open: String,

    #[serde(default)]
    pub close: String,
}

impl From<BusinessHourRequest> for DaySchedule {
    fn from(req: BusinessHourRequest) -> Self {
        Self {
            enabled: req.enabled,
            open: req.open,
            close: req.close,
        }
    }
}

impl From<CreatePartnershipRequest> for CreatePartnershipDto {
    fn from(req: CreatePartnershipRequest) -> Self {
        Self {
            coordinates: Coordinates::from_client(req.latitude, req.longitude),
            business_name: req.business_name,
            owner_name: req.owner_name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            business_type: req.business_type,
            space_size: req.space_size,
            additional_info: req.additional_info.filter(|s| !s.trim().is_empty()),
            agree_terms: req.agree_terms,
            is_24_hours: req.is_24_hours,
            business_hours: req
                .business_hours
                .unwrap_or_default()
                .into_iter()
                .map(|(day, hours)| (day, DaySchedule::from(hours)))
                .collect(),
        }
    }
}

/// Location-only registration request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPartnershipRequest {
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<RegisterPartnershipRequest> for RegisterPartnershipDto {
    fn from(req: RegisterPartnershipRequest) -> Self {
        Self {
            coordinates: Coordinates::from_client(req.latitude, req.longitude),
            address: req.address,
        }
    }
}

/// Base64 photo upload request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Base64PhotoRequest {
    #[validate(length(min = 1, message = "Image data is required"))]
    pub base64_data: String,

    #[validate(length(min = 1, max = 64, message = "Reservation number must be 1-64 characters"))]
    pub reservation_number: String,

    #[serde(default)]
    pub file_name: Option<String>,
}

impl From<Base64PhotoRequest> for PhotoBase64Upload {
    fn from(req: Base64PhotoRequest) -> Self {
        Self {
            base64_data: req.base64_data,
            reservation_number: req.reservation_number,
            file_name: req.file_name,
        }
    }
}

/// Request naming a stored photo
#[derive(Debug, Deserialize, Validate)]
pub struct PhotoPathRequest {
    #[validate(length(min = 1, message = "Path is required"))]
    pub path: String,
}
