//! HTTP route handlers for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! # Stores
//! POST /stores                 - Create a store (multipart), trigger catalog ingestion
//! GET  /stores                 - List all stores, newest first
//! GET  /stores/{slug}          - Fetch one store
//! GET  /stores/{slug}/products - List a store's products, newest first
//! GET  /stores/{slug}/leads    - Lead count for a store
//!
//! # Products
//! GET  /products               - List all products across stores, newest first
//! POST /products               - Create a product manually (multipart)
//! GET  /products/{id}          - Fetch one product with owning-store summary
//! PUT  /products/{id}          - Edit a product, optionally replace its image
//!
//! # Leads
//! POST /leads                  - Record a buyer lead
//!
//! # Assets
//! GET  /uploads/{slug}/{file}  - Served via tower-http ServeDir (see main.rs)
//! ```
//!
//! Every success body carries `"success": true`; every error body is
//! `{"success": false, "message": "..."}` (see [`crate::error::AppError`]).

pub mod leads;
pub mod products;
pub mod stores;

use axum::body::Bytes;
use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Maximum accepted request body size (catalog PDFs can be large).
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// A file pulled out of a multipart payload.
pub(crate) struct UploadedFile {
    /// Client-supplied filename (sanitized before it is stored).
    pub filename: String,
    /// File contents.
    pub data: Bytes,
}

/// Map a multipart decoding error to a client error.
pub(crate) fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("malformed multipart payload: {err}"))
}

/// Normalize an optional text field: trimmed, empty becomes `None`.
pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/stores", get(stores::index).post(stores::create))
        .route("/stores/{slug}", get(stores::show))
        .route("/stores/{slug}/products", get(products::for_store))
        .route("/stores/{slug}/leads", get(leads::count_for_store))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", get(products::show).put(products::update))
}

/// Create the lead routes router.
pub fn lead_routes() -> Router<AppState> {
    Router::new().route("/leads", post(leads::create))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(store_routes())
        .merge(product_routes())
        .merge(lead_routes())
}
