//! Lead repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use bodega_core::{ProductId, StoreId};

use super::RepositoryError;
use crate::models::Lead;

/// Repository for lead database operations.
pub struct LeadRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LeadRepository<'a> {
    /// Create a new lead repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a lead for a product.
    ///
    /// Callers are expected to have verified that the product belongs to the
    /// store; the foreign keys only guarantee both rows exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        product_id: ProductId,
        store_id: StoreId,
    ) -> Result<Lead, RepositoryError> {
        let lead = sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (product_id, store_id, status, created_at) \
             VALUES (?, ?, 'pending', ?) \
             RETURNING id, product_id, store_id, status, created_at",
        )
        .bind(product_id.as_i64())
        .bind(store_id.as_i64())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;
        Ok(lead)
    }

    /// Number of leads recorded for a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_for_store(&self, store_id: StoreId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM leads WHERE store_id = ?")
                .bind(store_id.as_i64())
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bodega_core::Slug;

    use crate::db::products::{NewProduct, ProductRepository};
    use crate::db::stores::{NewStore, StoreRepository};
    use crate::db::test_support;

    #[tokio::test]
    async fn test_create_and_count() {
        let pool = test_support::pool().await;

        let store = StoreRepository::new(&pool)
            .create(NewStore {
                name: "Acme Shop".to_owned(),
                slug: Slug::from_name("Acme Shop"),
                description: None,
                email: None,
                phone: None,
                instagram: None,
                address: None,
                brand_color: None,
                logo_file: None,
                catalog_file: None,
            })
            .await
            .unwrap();

        let product = ProductRepository::new(&pool)
            .create(NewProduct {
                store_id: store.id,
                name: "Widget".to_owned(),
                description: None,
                price: None,
                image_file: None,
                image_url: None,
            })
            .await
            .unwrap();

        let repo = LeadRepository::new(&pool);
        assert_eq!(repo.count_for_store(store.id).await.unwrap(), 0);

        let lead = repo.create(product.id, store.id).await.unwrap();
        assert_eq!(lead.status, "pending");
        assert_eq!(repo.count_for_store(store.id).await.unwrap(), 1);
    }
}
