//! # Partnership Service
//!
//! Application entry point. Initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Partnership store, geocoder and photo storage
//! - HTTP server

use anyhow::Result;
use tracing::info;

use partnership_service::config::Settings;
use partnership_service::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    partnership_service::telemetry::init_tracing();

    info!("Starting Partnership Service...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
