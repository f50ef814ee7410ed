//! # devnotify Main Entry Point
//!
//! Loads configuration, initializes telemetry and the database pool, applies
//! migrations and starts the HTTP server.

use std::sync::Arc;

use devnotify::config::ConfigLoader;
use devnotify::db::init_pool;
use devnotify::notify::telegram::TelegramNotifier;
use devnotify::server::run_server;
use devnotify::telemetry::init_tracing;
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = init_pool(&config).await?;
    Migrator::up(&db, None).await?;

    let notifier = Arc::new(TelegramNotifier::from_config(&config)?);

    run_server(config, db, notifier).await
}
