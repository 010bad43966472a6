//! Local-disk photo store.
//!
//! Files live under `root` using the same relative layout as their stored
//! paths, so `root` can be served directly as static files.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::StorageSettings;
use crate::domain::{
    PhotoBase64Upload, PhotoError, PhotoPathPolicy, PhotoStore, PhotoUpload, PhotoUploadResult,
};
use crate::infrastructure::metrics;
use crate::shared::validation::is_valid_reservation_number;

const THUMBNAIL_JPEG_QUALITY: u8 = 85;

/// Photo store writing to a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: PathBuf,
    public_base_url: String,
    max_file_size: usize,
    thumbnail_size: u32,
}

impl LocalPhotoStore {
    pub fn new(settings: &StorageSettings) -> Self {
        Self {
            root: PathBuf::from(&settings.root),
            public_base_url: settings.public_base_url.trim_end_matches('/').to_string(),
            max_file_size: settings.max_file_size,
            thumbnail_size: settings.thumbnail_size,
        }
    }

    fn absolute(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    fn public_url(&self, relative: &str) -> String {
        format!("{}/{}", self.public_base_url, relative)
    }

    async fn write(&self, relative: &str, bytes: &[u8]) -> Result<(), PhotoError> {
        let path = self.absolute(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn remove_file_if_exists(&self, relative: &str) -> Result<bool, PhotoError> {
        match tokio::fs::remove_file(self.absolute(relative)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(
        &self,
        bytes: Vec<u8>,
        original_file_name: Option<String>,
        reservation_number: &str,
    ) -> Result<PhotoUploadResult, PhotoError> {
        if !is_valid_reservation_number(reservation_number) {
            return Err(PhotoError::InvalidReservationNumber(
                reservation_number.to_string(),
            ));
        }
        if bytes.is_empty() {
            return Err(PhotoError::EmptyFile);
        }
        if bytes.len() > self.max_file_size {
            return Err(PhotoError::FileTooLarge {
                size: bytes.len(),
                max: self.max_file_size,
            });
        }

        let format = image::guess_format(&bytes)
            .map_err(|e| PhotoError::UnsupportedFormat(e.to_string()))?;
        let (extension, content_type) = stored_format(format)?;

        let (bytes, thumbnail) = render_thumbnail(bytes, Some(format), self.thumbnail_size).await?;

        let file_name = format!("{}.{}", Uuid::new_v4().simple(), extension);
        let file_path = PhotoPathPolicy::original_path(reservation_number, &file_name);
        let thumbnail_path = PhotoPathPolicy::thumbnail_path(reservation_number, &file_name);

        self.write(&file_path, &bytes).await?;
        if let Err(e) = self.write(&thumbnail_path, &thumbnail).await {
            if let Err(cleanup) = self.remove_file_if_exists(&file_path).await {
                tracing::warn!(
                    file_path = %file_path,
                    error = %cleanup,
                    "Failed to remove original after thumbnail write failure"
                );
            }
            return Err(e);
        }

        tracing::info!(
            reservation_number = %reservation_number,
            file_path = %file_path,
            size = bytes.len(),
            "Stored reservation photo"
        );

        Ok(PhotoUploadResult {
            file_url: self.public_url(&file_path),
            thumbnail_url: self.public_url(&thumbnail_path),
            file_path,
            thumbnail_path,
            original_file_name,
            content_type: content_type.to_string(),
            file_size: bytes.len() as u64,
            checksum: hex::encode(Sha256::digest(&bytes)),
            reservation_number: reservation_number.to_string(),
            uploaded_at: Utc::now(),
        })
    }
}

/// Extension and MIME type used when storing an image of `format`.
fn stored_format(format: ImageFormat) -> Result<(&'static str, &'static str), PhotoError> {
    match format {
        ImageFormat::Jpeg => Ok(("jpg", "image/jpeg")),
        ImageFormat::Png => Ok(("png", "image/png")),
        ImageFormat::WebP => Ok(("webp", "image/webp")),
        other => Err(PhotoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Whether a client-declared MIME type disagrees with the detected one.
fn declared_type_mismatch(declared: Option<&str>, detected: &str) -> bool {
    declared
        .map(|d| d.split(';').next().unwrap_or("").trim())
        .filter(|d| !d.is_empty() && *d != "application/octet-stream")
        .map(|d| !d.eq_ignore_ascii_case(detected))
        .unwrap_or(false)
}

/// Strip an optional `data:<mime>;base64,` prefix and surrounding whitespace.
fn base64_payload(data: &str) -> &str {
    let data = data.trim();
    match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, payload)| payload).unwrap_or(""),
        None => data,
    }
}

/// Decode `bytes` and encode a JPEG thumbnail bounded by `size` on both sides.
/// Returns the original bytes alongside the thumbnail.
async fn render_thumbnail(
    bytes: Vec<u8>,
    format: Option<ImageFormat>,
    size: u32,
) -> Result<(Vec<u8>, Vec<u8>), PhotoError> {
    tokio::task::spawn_blocking(move || {
        let decoded = match format {
            Some(format) => image::load_from_memory_with_format(&bytes, format),
            None => image::load_from_memory(&bytes),
        }
        .map_err(|e| PhotoError::InvalidImage(e.to_string()))?;

        let thumbnail = DynamicImage::ImageRgb8(decoded.thumbnail(size, size).to_rgb8());
        let mut encoded = Vec::new();
        thumbnail
            .write_with_encoder(JpegEncoder::new_with_quality(
                &mut encoded,
                THUMBNAIL_JPEG_QUALITY,
            ))
            .map_err(|e| PhotoError::Internal(format!("thumbnail encoding failed: {}", e)))?;

        Ok((bytes, encoded))
    })
    .await
    .map_err(|e| PhotoError::Internal(format!("thumbnail task failed: {}", e)))?
}

fn observe<T>(operation: &str, result: &Result<T, PhotoError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(PhotoError::Io(_)) | Err(PhotoError::Internal(_)) => "error",
        Err(_) => "rejected",
    };
    metrics::record_photo_operation(operation, outcome);
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn upload_photo(
        &self,
        upload: PhotoUpload,
        reservation_number: &str,
    ) -> Result<PhotoUploadResult, PhotoError> {
        let declared = upload.content_type;
        let result = self
            .store(upload.bytes, upload.file_name, reservation_number)
            .await;
        if let Ok(stored) = &result {
            if declared_type_mismatch(declared.as_deref(), &stored.content_type) {
                tracing::warn!(
                    declared = ?declared,
                    detected = %stored.content_type,
                    file_path = %stored.file_path,
                    "Declared content type differs from detected image format"
                );
            }
        }
        observe("upload", &result);
        result
    }

    async fn upload_photo_from_base64(
        &self,
        request: PhotoBase64Upload,
    ) -> Result<PhotoUploadResult, PhotoError> {
        let result = match STANDARD.decode(base64_payload(&request.base64_data)) {
            Ok(bytes) => {
                self.store(bytes, request.file_name, &request.reservation_number)
                    .await
            }
            Err(e) => Err(PhotoError::InvalidBase64(e.to_string())),
        };
        observe("upload_base64", &result);
        result
    }

    async fn delete_photo(&self, path: &str) -> Result<(), PhotoError> {
        let result = async {
            let parsed =
                PhotoPathPolicy::parse(path).ok_or_else(|| PhotoError::InvalidPath(path.into()))?;

            let removed = self.remove_file_if_exists(path).await?;
            if !parsed.is_thumbnail {
                let thumbnail =
                    PhotoPathPolicy::thumbnail_path(parsed.reservation_number, parsed.file_name);
                self.remove_file_if_exists(&thumbnail).await?;
            }

            if removed {
                tracing::info!(path = %path, "Deleted reservation photo");
            } else {
                tracing::debug!(path = %path, "Photo already absent");
            }
            Ok(())
        }
        .await;
        observe("delete", &result);
        result
    }

    async fn create_thumbnail(&self, original_path: &str) -> Result<String, PhotoError> {
        let result = async {
            let parsed = PhotoPathPolicy::parse(original_path)
                .filter(|p| !p.is_thumbnail)
                .ok_or_else(|| PhotoError::InvalidPath(original_path.into()))?;

            let bytes = match tokio::fs::read(self.absolute(original_path)).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(PhotoError::NotFound(original_path.into()))
                }
                Err(e) => return Err(e.into()),
            };

            let (_, thumbnail) = render_thumbnail(bytes, None, self.thumbnail_size).await?;
            let thumbnail_path =
                PhotoPathPolicy::thumbnail_path(parsed.reservation_number, parsed.file_name);
            self.write(&thumbnail_path, &thumbnail).await?;

            tracing::debug!(original = %original_path, thumbnail = %thumbnail_path, "Created thumbnail");
            Ok(thumbnail_path)
        }
        .await;
        observe("thumbnail", &result);
        result
    }

    async fn delete_all_photos_of_reservation(
        &self,
        reservation_number: &str,
    ) -> Result<(), PhotoError> {
        let result = async {
            if !is_valid_reservation_number(reservation_number) {
                return Err(PhotoError::InvalidReservationNumber(
                    reservation_number.to_string(),
                ));
            }

            let dir = self.absolute(&PhotoPathPolicy::reservation_dir(reservation_number));
            match tokio::fs::remove_dir_all(&dir).await {
                Ok(()) => {
                    tracing::info!(reservation_number = %reservation_number, "Deleted all reservation photos");
                    Ok(())
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
        .await;
        observe("delete_all", &result);
        result
    }

    fn is_valid_image_path(&self, path: &str) -> bool {
        PhotoPathPolicy::is_valid(path)
    }
}
