//! Reservation photos and the photo store contract.
//!
//! Photos are attached to a storage reservation by its reservation number.
//! Stored paths are relative to the store and always look like
//! `reservations/<reservation>/<file>` or
//! `reservations/<reservation>/thumbnails/<file>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image extensions accepted for stored photos and thumbnails.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Top-level directory holding every reservation's photos.
pub const RESERVATIONS_DIR: &str = "reservations";

/// Sub-directory of a reservation holding its thumbnails.
pub const THUMBNAILS_DIR: &str = "thumbnails";

/// A binary upload (e.g. one multipart file field).
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// File name as sent by the client
    pub file_name: Option<String>,

    /// Declared MIME type
    pub content_type: Option<String>,

    pub bytes: Vec<u8>,
}

/// An upload carried as base64 text.
#[derive(Debug, Clone)]
pub struct PhotoBase64Upload {
    /// Bare base64 or a `data:<mime>;base64,<payload>` URL
    pub base64_data: String,

    pub reservation_number: String,

    pub file_name: Option<String>,
}

/// Outcome of a stored upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadResult {
    /// Path of the stored original, relative to the store
    pub file_path: String,

    /// Path of the generated thumbnail, relative to the store
    pub thumbnail_path: String,

    /// Public URL of the original
    pub file_url: String,

    /// Public URL of the thumbnail
    pub thumbnail_url: String,

    pub original_file_name: Option<String>,

    /// Detected MIME type of the stored image
    pub content_type: String,

    /// Size of the stored original in bytes
    pub file_size: u64,

    /// SHA-256 of the stored original (hex)
    pub checksum: String,

    pub reservation_number: String,

    pub uploaded_at: DateTime<Utc>,
}

/// Photo store errors
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Invalid reservation number: {0}")]
    InvalidReservationNumber(String),

    #[error("Invalid image path: {0}")]
    InvalidPath(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    #[error("Empty file provided")]
    EmptyFile,

    #[error("File too large: {size} bytes (maximum {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Photo not found: {0}")]
    NotFound(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage for reservation photos.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store an uploaded image for a reservation, together with its thumbnail.
    async fn upload_photo(
        &self,
        upload: PhotoUpload,
        reservation_number: &str,
    ) -> Result<PhotoUploadResult, PhotoError>;

    /// Same as [`PhotoStore::upload_photo`] with a base64 payload.
    async fn upload_photo_from_base64(
        &self,
        request: PhotoBase64Upload,
    ) -> Result<PhotoUploadResult, PhotoError>;

    /// Remove a stored image and its thumbnail. Missing files are not an error.
    async fn delete_photo(&self, path: &str) -> Result<(), PhotoError>;

    /// Create a thumbnail for a stored original and return its path.
    async fn create_thumbnail(&self, original_path: &str) -> Result<String, PhotoError>;

    /// Remove every image of a reservation. Missing reservations are not an error.
    async fn delete_all_photos_of_reservation(
        &self,
        reservation_number: &str,
    ) -> Result<(), PhotoError>;

    /// Whether `path` names a permissible stored-image location.
    fn is_valid_image_path(&self, path: &str) -> bool;
}
