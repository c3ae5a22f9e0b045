//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bodega-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BODEGA_DATABASE_URL` - `SQLite` connection string (falls back to
//!   `DATABASE_URL`, then `sqlite:bodega.db`)
//!
//! Migration files live in `crates/server/migrations/` and are embedded into
//! the server crate at compile time.

use thiserror::Error;

use bodega_server::config::{ConfigError, ServerConfig};
use bodega_server::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations against the configured database.
///
/// # Errors
///
/// Returns `MigrationError` if configuration loading, the connection, or a
/// migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
