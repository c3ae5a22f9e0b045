//! Integration tests for Bodega.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate a fresh database and start the server
//! cargo run -p bodega-cli -- migrate
//! cargo run -p bodega-server
//!
//! # Run the integration tests against it
//! cargo test -p bodega-integration-tests -- --ignored
//! ```
//!
//! Tests are ignore-gated because they need a live server; point
//! `BODEGA_BASE_URL` at it (default `http://localhost:5000`).

/// Base URL for the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("BODEGA_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// HTTP client for tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A store name that will not collide across test runs.
#[must_use]
pub fn unique_store_name(prefix: &str) -> String {
    format!("{prefix} {}", uuid::Uuid::new_v4().simple())
}
