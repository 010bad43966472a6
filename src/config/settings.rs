//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Address geocoding API settings
    pub geocoder: GeocoderSettings,

    /// Photo storage settings
    pub storage: StorageSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL. Without one, partnerships are kept in memory.
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// Kakao Local API configuration used for address geocoding.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    /// API base URL (e.g., "https://dapi.kakao.com")
    pub base_url: String,

    /// REST API key sent as `Authorization: KakaoAK <key>`
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Available photo storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files under a directory on the local disk
    Local,
}

/// Photo storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Which backend stores uploaded photos
    pub backend: StorageBackend,

    /// Root directory for the local backend
    pub root: String,

    /// URL prefix under which stored files are served
    pub public_base_url: String,

    /// Maximum accepted upload size in bytes
    pub max_file_size: usize,

    /// Longest side of generated thumbnails in pixels
    pub thumbnail_size: u32,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the geocoder API key is missing.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("geocoder.base_url", "https://dapi.kakao.com")?
            .set_default("geocoder.api_key", "")?
            .set_default("geocoder.timeout_secs", 5)?
            .set_default("storage.backend", "local")?
            .set_default("storage.root", "./uploads")?
            .set_default("storage.public_base_url", "/files")?
            .set_default("storage.max_file_size", 10_485_760_i64)? // 10MB
            .set_default("storage.thumbnail_size", 300)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("geocoder.api_key", std::env::var("KAKAO_API_KEY").ok())?
            .set_override_option("storage.root", std::env::var("STORAGE_ROOT").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                settings.validate()?;
                Ok(settings)
            })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.geocoder.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "geocoder.api_key (or KAKAO_API_KEY) must be set".into(),
            ));
        }
        if self.storage.thumbnail_size == 0 {
            return Err(ConfigError::Message(
                "storage.thumbnail_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
