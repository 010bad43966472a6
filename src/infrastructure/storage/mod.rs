//! Photo Storage Adapters
//!
//! Implementations of the domain `PhotoStore` trait, selected by
//! `storage.backend`.

pub mod local;

use std::sync::Arc;

pub use local::LocalPhotoStore;

use crate::config::{StorageBackend, StorageSettings};
use crate::domain::PhotoStore;

/// Build the photo store configured in `settings`.
pub fn build_photo_store(settings: &StorageSettings) -> Arc<dyn PhotoStore> {
    match settings.backend {
        StorageBackend::Local => {
            tracing::info!(root = %settings.root, "Using local photo storage");
            Arc::new(LocalPhotoStore::new(settings))
        }
    }
}
