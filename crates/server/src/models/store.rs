//! Store domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bodega_core::{Slug, StoreId};

/// A tenant storefront.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Unique human-readable store name.
    pub name: String,
    /// Unique URL-safe slug, immutable once assigned.
    pub slug: Slug,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional contact phone number.
    pub phone: Option<String>,
    /// Optional Instagram handle.
    pub instagram: Option<String>,
    /// Optional street address.
    pub address: Option<String>,
    /// Optional brand accent color (free text, e.g. "#ff8800").
    pub brand_color: Option<String>,
    /// Filename of the uploaded logo under the store's asset directory.
    pub logo_file: Option<String>,
    /// Filename of the uploaded catalog PDF under the store's asset directory.
    pub catalog_file: Option<String>,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Client-facing URL of the store logo, if one was uploaded.
    #[must_use]
    pub fn logo_url(&self) -> Option<String> {
        self.logo_file
            .as_ref()
            .map(|file| format!("/uploads/{}/{file}", self.slug))
    }

    /// Client-facing URL of the uploaded catalog, if one was uploaded.
    #[must_use]
    pub fn catalog_url(&self) -> Option<String> {
        self.catalog_file
            .as_ref()
            .map(|file| format!("/uploads/{}/{file}", self.slug))
    }
}
