//! Product domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bodega_core::{ImageRef, ProductId, Slug, StoreId};

/// A product belonging to exactly one store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Owning store.
    pub store_id: StoreId,
    /// Product name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional price, free text (not numeric-validated).
    pub price: Option<String>,
    /// Filename of an uploaded image under the owning store's asset directory.
    pub image_file: Option<String>,
    /// External image URL.
    pub image_url: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The product's image reference (local file wins over external URL).
    #[must_use]
    pub fn image(&self) -> ImageRef {
        ImageRef {
            file: self.image_file.clone(),
            url: self.image_url.clone(),
        }
    }

    /// Client-facing image URL resolved against the owning store's slug.
    #[must_use]
    pub fn resolved_image_url(&self, slug: &Slug) -> Option<String> {
        self.image().resolve(slug)
    }
}
