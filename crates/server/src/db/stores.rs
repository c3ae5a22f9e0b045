//! Store repository for database operations.
//!
//! Queries use the runtime `query_as` API with `FromRow` models; the schema
//! lives in `crates/server/migrations/`.

use chrono::Utc;
use sqlx::SqlitePool;

use bodega_core::{Slug, StoreId};

use super::RepositoryError;
use crate::models::Store;

const SELECT_COLUMNS: &str = "id, name, slug, description, email, phone, instagram, \
     address, brand_color, logo_file, catalog_file, created_at";

/// Fields for a store about to be created.
#[derive(Debug, Clone)]
pub struct NewStore {
    /// Unique human-readable name.
    pub name: String,
    /// Slug assigned by the probe loop (see [`StoreRepository::next_free_slug`]).
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
    /// Optional brand accent color.
    pub brand_color: Option<String>,
    /// Saved logo filename, if a logo was uploaded.
    pub logo_file: Option<String>,
    /// Saved catalog filename, if a catalog was uploaded.
    pub catalog_file: Option<String>,
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the first unused slug for `base`.
    ///
    /// Probes `base`, `base-1`, `base-2`, ... sequentially against existing
    /// rows. Deterministic given the same set of existing stores; the unique
    /// constraint on `stores.slug` remains the final arbiter if a concurrent
    /// creation wins the race between probe and insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a probe query fails.
    pub async fn next_free_slug(&self, base: &Slug) -> Result<Slug, RepositoryError> {
        if !self.slug_exists(base).await? {
            return Ok(base.clone());
        }

        let mut n = 1u32;
        loop {
            let candidate = base.with_suffix(n);
            if !self.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Whether a store with this slug exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn slug_exists(&self, slug: &Slug) -> Result<bool, RepositoryError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM stores WHERE slug = ?")
            .bind(slug.as_str())
            .fetch_optional(self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Create a new store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name or slug is already
    /// taken (including a lost probe/insert race).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: NewStore) -> Result<Store, RepositoryError> {
        let sql = format!(
            "INSERT INTO stores \
                 (name, slug, description, email, phone, instagram, address, \
                  brand_color, logo_file, catalog_file, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {SELECT_COLUMNS}"
        );

        sqlx::query_as::<_, Store>(&sql)
            .bind(&new.name)
            .bind(new.slug.as_str())
            .bind(&new.description)
            .bind(&new.email)
            .bind(&new.phone)
            .bind(&new.instagram)
            .bind(&new.address)
            .bind(&new.brand_color)
            .bind(&new.logo_file)
            .bind(&new.catalog_file)
            .bind(Utc::now())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict(
                        "a store with that name already exists".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })
    }

    /// Get a store by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Store>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM stores WHERE slug = ?");
        let store = sqlx::query_as::<_, Store>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;
        Ok(store)
    }

    /// Get a store by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM stores WHERE id = ?");
        let store = sqlx::query_as::<_, Store>(&sql)
            .bind(id.as_i64())
            .fetch_optional(self.pool)
            .await?;
        Ok(store)
    }

    /// List all stores, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM stores ORDER BY created_at DESC, id DESC"
        );
        let stores = sqlx::query_as::<_, Store>(&sql).fetch_all(self.pool).await?;
        Ok(stores)
    }
}
