//! Product repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use bodega_core::{ProductId, Slug, StoreId};

use super::RepositoryError;
use crate::models::Product;

const SELECT_COLUMNS: &str =
    "id, store_id, name, description, price, image_file, image_url, created_at";

/// Fields for a product about to be created.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Owning store.
    pub store_id: StoreId,
    /// Product name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional price, free text.
    pub price: Option<String>,
    /// Saved image filename, if an image was uploaded.
    pub image_file: Option<String>,
    /// External image URL.
    pub image_url: Option<String>,
}

/// Editable product fields for an update.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    /// New product name.
    pub name: String,
    /// New description (replaces the old one; `None` clears it).
    pub description: Option<String>,
    /// New price (replaces the old one; `None` clears it).
    pub price: Option<String>,
    /// Replacement image filename; `None` keeps the current image.
    pub image_file: Option<String>,
}

/// A product joined with summary columns of its owning store.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductWithStore {
    /// The product row.
    #[sqlx(flatten)]
    pub product: Product,
    /// Owning store's slug.
    pub store_slug: Slug,
    /// Owning store's name.
    pub store_name: String,
    /// Owning store's contact phone.
    pub store_phone: Option<String>,
    /// Owning store's Instagram handle.
    pub store_instagram: Option<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a single product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products \
                 (store_id, name, description, price, image_file, image_url, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING {SELECT_COLUMNS}"
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(new.store_id.as_i64())
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.price)
            .bind(&new.image_file)
            .bind(&new.image_url)
            .bind(Utc::now())
            .fetch_one(self.pool)
            .await?;
        Ok(product)
    }

    /// Create a batch of products in one transaction.
    ///
    /// Either every row commits or none does; a failure partway through the
    /// batch discards the whole batch. Returns the number of rows created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert or the commit fails.
    pub async fn create_batch(&self, batch: &[NewProduct]) -> Result<usize, RepositoryError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for new in batch {
            sqlx::query(
                "INSERT INTO products \
                     (store_id, name, description, price, image_file, image_url, created_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(new.store_id.as_i64())
            .bind(&new.name)
            .bind(&new.description)
            .bind(&new.price)
            .bind(&new.image_file)
            .bind(&new.image_url)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(batch.len())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM products WHERE id = ?");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    /// List a store's products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(&self, store_id: StoreId) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM products \
             WHERE store_id = ? ORDER BY created_at DESC, id DESC"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(store_id.as_i64())
            .fetch_all(self.pool)
            .await?;
        Ok(products)
    }

    /// List all products across stores, newest first, with owning-store
    /// summary columns.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all_with_store(&self) -> Result<Vec<ProductWithStore>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductWithStore>(
            "SELECT p.id, p.store_id, p.name, p.description, p.price, \
                    p.image_file, p.image_url, p.created_at, \
                    s.slug AS store_slug, s.name AS store_name, \
                    s.phone AS store_phone, s.instagram AS store_instagram \
             FROM products p \
             JOIN stores s ON s.id = p.store_id \
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Update a product's editable fields.
    ///
    /// The image filename is only replaced when `update.image_file` is set;
    /// an existing external image URL is left untouched (the local file then
    /// wins at resolution time).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE products \
             SET name = ?, description = ?, price = ?, \
                 image_file = COALESCE(?, image_file) \
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.price)
        .bind(&update.image_file)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::stores::{NewStore, StoreRepository};
    use crate::db::test_support;

    async fn seed_store(pool: &SqlitePool, name: &str) -> StoreId {
        let repo = StoreRepository::new(pool);
        let store = repo
            .create(NewStore {
                name: name.to_owned(),
                slug: Slug::from_name(name),
                description: None,
                email: None,
                phone: Some("555-0100".to_owned()),
                instagram: None,
                address: None,
                brand_color: None,
                logo_file: None,
                catalog_file: None,
            })
            .await
            .unwrap();
        store.id
    }

    fn new_product(store_id: StoreId, name: &str) -> NewProduct {
        NewProduct {
            store_id,
            name: name.to_owned(),
            description: None,
            price: Some("10".to_owned()),
            image_file: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = test_support::pool().await;
        let store_id = seed_store(&pool, "Acme Shop").await;
        let repo = ProductRepository::new(&pool);

        let created = repo.create(new_product(store_id, "Widget")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.store_id, store_id);

        assert!(repo.get_by_id(ProductId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_batch() {
        let pool = test_support::pool().await;
        let store_id = seed_store(&pool, "Acme Shop").await;
        let repo = ProductRepository::new(&pool);

        let batch = vec![
            new_product(store_id, "Widget"),
            new_product(store_id, "Gadget"),
            new_product(store_id, "Doohickey"),
        ];
        let count = repo.create_batch(&batch).await.unwrap();
        assert_eq!(count, 3);

        let products = repo.list_for_store(store_id).await.unwrap();
        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_batch_is_zero() {
        let pool = test_support::pool().await;
        let repo = ProductRepository::new(&pool);
        assert_eq!(repo.create_batch(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_for_store_newest_first_and_scoped() {
        let pool = test_support::pool().await;
        let acme = seed_store(&pool, "Acme Shop").await;
        let other = seed_store(&pool, "Other Shop").await;
        let repo = ProductRepository::new(&pool);

        for name in ["Widget", "Gadget"] {
            repo.create(new_product(acme, name)).await.unwrap();
        }
        repo.create(new_product(other, "Elsewhere")).await.unwrap();

        let products = repo.list_for_store(acme).await.unwrap();
        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Gadget", "Widget"]);
    }

    #[tokio::test]
    async fn test_list_all_with_store_carries_contact() {
        let pool = test_support::pool().await;
        let store_id = seed_store(&pool, "Acme Shop").await;
        let repo = ProductRepository::new(&pool);
        repo.create(new_product(store_id, "Widget")).await.unwrap();

        let rows = repo.list_all_with_store().await.unwrap();
        assert_eq!(rows.len(), 1);
        let row = rows.first().unwrap();
        assert_eq!(row.store_slug.as_str(), "acme-shop");
        assert_eq!(row.store_phone.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn test_update() {
        let pool = test_support::pool().await;
        let store_id = seed_store(&pool, "Acme Shop").await;
        let repo = ProductRepository::new(&pool);
        let created = repo.create(new_product(store_id, "Widget")).await.unwrap();

        repo.update(
            created.id,
            ProductUpdate {
                name: "Widget Pro".to_owned(),
                description: Some("Improved".to_owned()),
                price: Some("12".to_owned()),
                image_file: None,
            },
        )
        .await
        .unwrap();

        let updated = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Widget Pro");
        assert_eq!(updated.price.as_deref(), Some("12"));

        let err = repo
            .update(
                ProductId::new(999),
                ProductUpdate {
                    name: "x".to_owned(),
                    description: None,
                    price: None,
                    image_file: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_update_keeps_image_when_not_replaced() {
        let pool = test_support::pool().await;
        let store_id = seed_store(&pool, "Acme Shop").await;
        let repo = ProductRepository::new(&pool);
        let created = repo
            .create(NewProduct {
                image_file: Some("w.png".to_owned()),
                ..new_product(store_id, "Widget")
            })
            .await
            .unwrap();

        repo.update(
            created.id,
            ProductUpdate {
                name: "Widget".to_owned(),
                description: None,
                price: None,
                image_file: None,
            },
        )
        .await
        .unwrap();

        let updated = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.image_file.as_deref(), Some("w.png"));
    }
}
