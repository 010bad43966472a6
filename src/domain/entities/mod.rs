//! # Domain Entities
//!
//! Core domain entities and the contracts of the stores that hold them.
//!
//! - **Partnership**: a partnership application (or a location-only
//!   registration) with its resolved coordinates
//! - **Photo**: images attached to storage reservations
//!
//! Store traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod partnership;
mod photo;

pub use partnership::{NewPartnership, Partnership, PartnershipApplication, PartnershipRepository};
pub use photo::{
    PhotoBase64Upload, PhotoError, PhotoStore, PhotoUpload, PhotoUploadResult,
    ALLOWED_IMAGE_EXTENSIONS, RESERVATIONS_DIR, THUMBNAILS_DIR,
};

#[cfg(test)]
pub use partnership::MockPartnershipRepository;
