//! Partnership Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreatePartnershipRequest, RegisterPartnershipRequest};
use crate::application::dto::response::PartnershipResponse;
use crate::application::services::PartnershipError;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

impl From<PartnershipError> for AppError {
    fn from(err: PartnershipError) -> Self {
        match err {
            e @ PartnershipError::AddressResolution { .. } => AppError::BadRequest(e.to_string()),
            e @ PartnershipError::NotFound(_) => AppError::NotFound(e.to_string()),
            PartnershipError::Persistence(e) => e,
        }
    }
}

/// Submit a partnership application
pub async fn create_partnership(
    State(state): State<AppState>,
    Json(body): Json<CreatePartnershipRequest>,
) -> Result<(StatusCode, Json<PartnershipResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let partnership = state.partnerships.create_partnership(body.into()).await?;
    metrics::record_partnership_submission("application");

    Ok((StatusCode::CREATED, Json(PartnershipResponse::from(partnership))))
}

/// Get an application by its submission ID
pub async fn get_partnership(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<PartnershipResponse>, AppError> {
    let partnership = state
        .partnerships
        .get_by_submission_id(&submission_id)
        .await?;

    Ok(Json(PartnershipResponse::from(partnership)))
}

/// Register a partner location by address
pub async fn register_partnership(
    State(state): State<AppState>,
    Json(body): Json<RegisterPartnershipRequest>,
) -> Result<(StatusCode, Json<PartnershipResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let partnership = state.partnerships.register_partnership(body.into()).await?;
    metrics::record_partnership_submission("location");

    Ok((StatusCode::CREATED, Json(PartnershipResponse::from(partnership))))
}
