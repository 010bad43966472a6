//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{NaiveDate, NaiveDateTime};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use tempfile::TempDir;

use partnership_service::config::{
    CorsSettings, DatabaseSettings, GeocoderSettings, ServerSettings, Settings, StorageBackend,
    StorageSettings,
};
use partnership_service::domain::{Coordinates, GeocodeError, Geocoder};
use partnership_service::infrastructure::repositories::InMemoryPartnershipRepository;
use partnership_service::infrastructure::storage::LocalPhotoStore;
use partnership_service::shared::clock::FixedClock;
use partnership_service::startup::{build_router, AppState};

/// Address the stub geocoder resolves
pub const KNOWN_ADDRESS: &str = "서울특별시 중구 세종대로 110";
pub const KNOWN_COORDINATES: Coordinates = Coordinates {
    latitude: 37.5665,
    longitude: 126.978,
};

/// Submission ID produced by the fixed test clock
pub const EXPECTED_SUBMISSION_ID: &str = "PN240309140507";

pub const MAX_FILE_SIZE: usize = 256 * 1024;
pub const THUMBNAIL_SIZE: u32 = 48;

/// Geocoder answering from a fixed table and counting lookups
#[derive(Default)]
pub struct StubGeocoder {
    known: HashMap<String, Coordinates>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn new() -> Self {
        let mut known = HashMap::new();
        known.insert(KNOWN_ADDRESS.to_string(), KNOWN_COORDINATES);
        Self {
            known,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn coordinates_from_address(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known.get(address).copied().ok_or(GeocodeError::NoMatch)
    }
}

/// Test application wired against in-process collaborators
pub struct TestApp {
    pub server: TestServer,
    pub repository: Arc<InMemoryPartnershipRepository>,
    pub geocoder: Arc<StubGeocoder>,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let settings = test_settings(&storage_dir);

        let repository = Arc::new(InMemoryPartnershipRepository::new());
        let geocoder = Arc::new(StubGeocoder::new());
        let photos = Arc::new(LocalPhotoStore::new(&settings.storage));

        let state = AppState::new(
            settings,
            repository.clone(),
            geocoder.clone(),
            Arc::new(FixedClock(fixed_now())),
            photos,
        );

        let server = TestServer::new(build_router(state)).expect("Failed to start test server");

        Self {
            server,
            repository,
            geocoder,
            storage_dir,
        }
    }

    /// Whether a stored path exists under the storage root
    pub fn stored(&self, relative: &str) -> bool {
        self.storage_dir.path().join(relative).exists()
    }
}

pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(14, 5, 7))
        .expect("valid fixed instant")
}

pub fn test_settings(storage_dir: &TempDir) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: None,
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
            run_migrations: false,
        },
        geocoder: GeocoderSettings {
            base_url: "http://127.0.0.1:9".into(),
            api_key: "test-key".into(),
            timeout_secs: 1,
        },
        storage: StorageSettings {
            backend: StorageBackend::Local,
            root: storage_dir.path().to_string_lossy().into_owned(),
            public_base_url: "/files".into(),
            max_file_size: MAX_FILE_SIZE,
            thumbnail_size: THUMBNAIL_SIZE,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        environment: "test".into(),
    }
}

/// A valid partnership application body with generated identity fields
pub fn application_body() -> Value {
    let business_name: String = CompanyName().fake();
    let owner_name: String = Name().fake();
    let email: String = SafeEmail().fake();

    json!({
        "businessName": business_name,
        "ownerName": owner_name,
        "email": email,
        "phone": "010-1234-5678",
        "address": KNOWN_ADDRESS,
        "businessType": "cafe",
        "spaceSize": "small",
        "additionalInfo": "Near the station",
        "agreeTerms": true,
        "is24Hours": false,
        "businessHours": {
            "MONDAY": { "enabled": true, "open": "09:00", "close": "18:00" },
            "SUNDAY": { "enabled": false, "open": "10:00", "close": "16:00" }
        }
    })
}

/// PNG bytes of a solid-colour image
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 120, 200]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("Failed to encode PNG");
    buf
}
