//! Rules for stored photo paths.
//!
//! A stored photo path is valid when it
//! - is relative and made only of normal components (no `..`, `.`, root,
//!   drive prefix, empty segment or backslash),
//! - is `reservations/<reservation>/<file>` or
//!   `reservations/<reservation>/thumbnails/<file>`,
//! - names a valid reservation number,
//! - ends in an allowed image extension (case-insensitive).

use std::path::{Component, Path};

use crate::domain::entities::{ALLOWED_IMAGE_EXTENSIONS, RESERVATIONS_DIR, THUMBNAILS_DIR};
use crate::shared::validation::is_valid_reservation_number;

/// Parsed view of a valid stored photo path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPath<'a> {
    pub reservation_number: &'a str,
    pub file_name: &'a str,
    pub is_thumbnail: bool,
}

/// Domain service validating and building stored photo paths.
pub struct PhotoPathPolicy;

impl PhotoPathPolicy {
    /// Parse `path` if it satisfies every rule.
    pub fn parse(path: &str) -> Option<PhotoPath<'_>> {
        if path.is_empty() || path.contains('\\') || path.contains('\0') {
            return None;
        }

        let all_normal = Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !all_normal {
            return None;
        }

        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let (reservation_number, file_name, is_thumbnail) = match segments.as_slice() {
            [root, reservation, file] if *root == RESERVATIONS_DIR => (*reservation, *file, false),
            [root, reservation, thumbs, file]
                if *root == RESERVATIONS_DIR && *thumbs == THUMBNAILS_DIR =>
            {
                (*reservation, *file, true)
            }
            _ => return None,
        };

        if !is_valid_reservation_number(reservation_number) || !Self::has_allowed_extension(file_name)
        {
            return None;
        }

        Some(PhotoPath {
            reservation_number,
            file_name,
            is_thumbnail,
        })
    }

    pub fn is_valid(path: &str) -> bool {
        Self::parse(path).is_some()
    }

    /// Whether the file name ends in an allowed image extension.
    pub fn has_allowed_extension(file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Directory of a reservation, relative to the store.
    pub fn reservation_dir(reservation_number: &str) -> String {
        format!("{}/{}", RESERVATIONS_DIR, reservation_number)
    }

    /// Path of an original photo, relative to the store.
    pub fn original_path(reservation_number: &str, file_name: &str) -> String {
        format!("{}/{}", Self::reservation_dir(reservation_number), file_name)
    }

    /// Path of the thumbnail derived from an original file name.
    pub fn thumbnail_path(reservation_number: &str, original_file_name: &str) -> String {
        let stem = Path::new(original_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(original_file_name);
        format!(
            "{}/{}/{}_thumb.jpg",
            Self::reservation_dir(reservation_number),
            THUMBNAILS_DIR,
            stem
        )
    }
}
