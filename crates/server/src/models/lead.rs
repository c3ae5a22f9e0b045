//! Lead domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bodega_core::{LeadId, ProductId, StoreId};

/// A buyer's expression of interest in a product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    /// Unique lead ID.
    pub id: LeadId,
    /// Product the lead is about.
    pub product_id: ProductId,
    /// Store that owns the product.
    pub store_id: StoreId,
    /// Follow-up status (free text, starts as "pending").
    pub status: String,
    /// When the lead was recorded.
    pub created_at: DateTime<Utc>,
}
