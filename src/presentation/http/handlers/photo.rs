//! Photo Handlers
//!
//! Reservation photo upload, thumbnailing and removal.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{Base64PhotoRequest, PhotoPathRequest};
use crate::application::dto::response::{
    PathValidationResponse, PhotoUploadResponse, ThumbnailResponse,
};
use crate::domain::{PhotoError, PhotoUpload};
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Multipart field carrying the image
const FILE_FIELD: &str = "file";

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        match err {
            e @ (PhotoError::InvalidReservationNumber(_)
            | PhotoError::InvalidPath(_)
            | PhotoError::InvalidBase64(_)
            | PhotoError::EmptyFile
            | PhotoError::UnsupportedFormat(_)
            | PhotoError::InvalidImage(_)) => AppError::BadRequest(e.to_string()),
            e @ PhotoError::FileTooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
            e @ PhotoError::NotFound(_) => AppError::NotFound(e.to_string()),
            e @ (PhotoError::Io(_) | PhotoError::Internal(_)) => AppError::Internal(e.to_string()),
        }
    }
}

/// Upload one photo for a reservation (multipart field `file`)
pub async fn upload_photo(
    State(state): State<AppState>,
    Path(reservation_number): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PhotoUploadResponse>), AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        upload = Some(PhotoUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload
        .ok_or_else(|| AppError::BadRequest(format!("Missing multipart field '{}'", FILE_FIELD)))?;

    let result = state.photos.upload_photo(upload, &reservation_number).await?;

    Ok((StatusCode::CREATED, Json(PhotoUploadResponse::from(result))))
}

/// Upload one photo sent as base64 text
pub async fn upload_photo_base64(
    State(state): State<AppState>,
    Json(body): Json<Base64PhotoRequest>,
) -> Result<(StatusCode, Json<PhotoUploadResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let result = state.photos.upload_photo_from_base64(body.into()).await?;

    Ok((StatusCode::CREATED, Json(PhotoUploadResponse::from(result))))
}

/// (Re)create the thumbnail of a stored photo
pub async fn create_thumbnail(
    State(state): State<AppState>,
    Json(body): Json<PhotoPathRequest>,
) -> Result<(StatusCode, Json<ThumbnailResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let thumbnail_path = state.photos.create_thumbnail(&body.path).await?;

    Ok((
        StatusCode::CREATED,
        Json(ThumbnailResponse {
            original_path: body.path,
            thumbnail_path,
        }),
    ))
}

/// Delete a stored photo and its thumbnail
pub async fn delete_photo(
    State(state): State<AppState>,
    Query(params): Query<PhotoPathRequest>,
) -> Result<StatusCode, AppError> {
    params.validate().map_err(validation_error)?;

    state.photos.delete_photo(&params.path).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete every photo of a reservation
pub async fn delete_reservation_photos(
    State(state): State<AppState>,
    Path(reservation_number): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .photos
        .delete_all_photos_of_reservation(&reservation_number)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Check whether a path names a permissible stored image
pub async fn validate_path(
    State(state): State<AppState>,
    Query(params): Query<PhotoPathRequest>,
) -> Json<PathValidationResponse> {
    let valid = state.photos.is_valid_image_path(&params.path);

    Json(PathValidationResponse {
        path: params.path,
        valid,
    })
}
