//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BODEGA_DATABASE_URL` - `SQLite` connection string (default:
//!   `sqlite:bodega.db`; falls back to generic `DATABASE_URL` if set)
//! - `BODEGA_HOST` - Bind address (default: 127.0.0.1)
//! - `BODEGA_PORT` - Listen port (default: 5000)
//! - `BODEGA_UPLOAD_DIR` - Root directory for uploaded assets (default: `uploads`)
//! - `BODEGA_PLACEHOLDER_IMAGE_URL` - External image URL assigned to products
//!   extracted from catalogs (unset: extracted products have no image)
//! - `OPENAI_API_KEY` - Model API key; without it the server runs but catalog
//!   ingestion is disabled
//! - `OPENAI_MODEL` - Model ID (default: gpt-4o-mini)
//! - `OPENAI_BASE_URL` - Model API base URL (default: `https://api.openai.com/v1`)
//! - `BODEGA_MODEL_TIMEOUT_SECS` - Outbound model call timeout (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MODEL_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
///
/// Built once at process start and passed by reference through [`crate::state::AppState`];
/// there is no global mutable configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Root directory for per-store uploaded assets
    pub upload_dir: PathBuf,
    /// External image URL assigned to catalog-extracted products
    pub placeholder_image_url: Option<String>,
    /// Model API configuration; `None` disables catalog ingestion
    pub model: Option<ModelConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Chat-completion model API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ModelConfig {
    /// API key for the model service
    pub api_key: SecretString,
    /// Model identifier (e.g., gpt-4o-mini)
    pub model: String,
    /// Base URL of the chat-completions API
    pub base_url: String,
    /// Timeout applied to each outbound model call
    pub timeout: Duration,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("BODEGA_DATABASE_URL", "sqlite:bodega.db");
        let host = get_env_or_default("BODEGA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BODEGA_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("BODEGA_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BODEGA_PORT".to_owned(), e.to_string()))?;
        let upload_dir = PathBuf::from(get_env_or_default("BODEGA_UPLOAD_DIR", "uploads"));
        let placeholder_image_url = get_optional_env("BODEGA_PLACEHOLDER_IMAGE_URL");

        let model = ModelConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            upload_dir,
            placeholder_image_url,
            model,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ModelConfig {
    /// `Some(config)` when `OPENAI_API_KEY` is set, `None` otherwise.
    ///
    /// The key is a hard precondition for calling the model, but never for
    /// starting the server: without it every catalog ingestion resolves to
    /// zero extracted products.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = get_optional_env("OPENAI_API_KEY") else {
            return Ok(None);
        };

        let timeout_secs = get_env_or_default(
            "BODEGA_MODEL_TIMEOUT_SECS",
            &DEFAULT_MODEL_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("BODEGA_MODEL_TIMEOUT_SECS".to_owned(), e.to_string())
        })?;

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("OPENAI_MODEL", DEFAULT_MODEL),
            base_url: get_env_or_default("OPENAI_BASE_URL", DEFAULT_MODEL_BASE_URL),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get the database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str, default: &str) -> SecretString {
    if let Ok(value) = std::env::var(primary_key) {
        return SecretString::from(value);
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return SecretString::from(value);
    }
    SecretString::from(default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            placeholder_image_url: None,
            model: None,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_model_config_debug_redacts_key() {
        let config = ModelConfig {
            api_key: SecretString::from("sk-super-secret-value"),
            model: "gpt-4o-mini".to_owned(),
            base_url: DEFAULT_MODEL_BASE_URL.to_owned(),
            timeout: Duration::from_secs(60),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("gpt-4o-mini"));
        assert!(!debug_output.contains("sk-super-secret-value"));
        // The key itself is still reachable where needed
        assert_eq!(config.api_key.expose_secret(), "sk-super-secret-value");
    }
}
