//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::application::services::{PartnershipService, PartnershipServiceImpl};
use crate::config::{Settings, StorageBackend};
use crate::domain::{Geocoder, PartnershipRepository, PhotoStore};
use crate::infrastructure::database;
use crate::infrastructure::geocoding::KakaoGeocoder;
use crate::infrastructure::repositories::{InMemoryPartnershipRepository, PgPartnershipRepository};
use crate::infrastructure::storage;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::clock::{Clock, SystemClock};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub partnerships: Arc<dyn PartnershipService>,
    pub photos: Arc<dyn PhotoStore>,
    /// Backing store of `partnerships`, probed by readiness checks
    pub repository: Arc<dyn PartnershipRepository>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the partnership service from its collaborators.
    pub fn new(
        settings: Settings,
        repository: Arc<dyn PartnershipRepository>,
        geocoder: Arc<dyn Geocoder>,
        clock: Arc<dyn Clock>,
        photos: Arc<dyn PhotoStore>,
    ) -> Self {
        let partnerships = Arc::new(PartnershipServiceImpl::new(
            repository.clone(),
            geocoder,
            clock,
        ));

        Self {
            partnerships,
            photos,
            repository,
            settings: Arc::new(settings),
        }
    }
}

/// Router with every route and the request-wide middleware applied
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state).layer(
        // Cors must wrap the routes directly; it needs a defaultable response body
        ServiceBuilder::new()
            .layer(logging::create_trace_layer())
            .layer(cors_layer),
    )
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let repository = partnership_repository(&settings).await?;

        let geocoder: Arc<dyn Geocoder> = Arc::new(
            KakaoGeocoder::new(&settings.geocoder).context("Failed to build geocoding client")?,
        );
        tracing::info!(base_url = %settings.geocoder.base_url, "Geocoder configured");

        if settings.storage.backend == StorageBackend::Local {
            tokio::fs::create_dir_all(&settings.storage.root)
                .await
                .with_context(|| format!("Failed to create storage root {}", settings.storage.root))?;
        }
        let photos = storage::build_photo_store(&settings.storage);

        let state = AppState::new(
            settings.clone(),
            repository,
            geocoder,
            Arc::new(SystemClock),
            photos,
        );

        let router = build_router(state);

        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// PostgreSQL when a database URL is configured, otherwise process memory.
async fn partnership_repository(settings: &Settings) -> Result<Arc<dyn PartnershipRepository>> {
    let Some(url) = settings.database.url.as_deref() else {
        tracing::warn!("No database URL configured; partnerships are kept in memory only");
        return Ok(Arc::new(InMemoryPartnershipRepository::new()));
    };

    let pool = database::create_pool(&settings.database, url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    tracing::info!("Database connection pool created");

    if settings.database.run_migrations {
        database::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PgPartnershipRepository::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
