//! Seed the database with a demo store and a few products.
//!
//! Useful for exercising the storefront frontend against a fresh database
//! without uploading a real catalog.
//!
//! # Usage
//!
//! ```bash
//! bodega-cli seed
//! bodega-cli seed -n "Corner Bakery"
//! ```

use thiserror::Error;
use tracing::info;

use bodega_core::Slug;
use bodega_server::config::{ConfigError, ServerConfig};
use bodega_server::db::{self, NewProduct, NewStore, ProductRepository, RepositoryError, StoreRepository};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create a demo store named `name` with three products.
///
/// The slug goes through the same probe loop as the API, so seeding twice
/// simply creates `demo-store` and `demo-store-1`.
///
/// # Errors
///
/// Returns `SeedError` if configuration loading or a database write fails.
pub async fn run(name: &str) -> Result<(), SeedError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let stores = StoreRepository::new(&pool);
    let slug = stores.next_free_slug(&Slug::from_name(name)).await?;

    let store = stores
        .create(NewStore {
            name: format!("{name} ({slug})"),
            slug,
            description: Some("Seeded demo store".to_owned()),
            email: None,
            phone: Some("555-0100".to_owned()),
            instagram: Some("demo.store".to_owned()),
            address: None,
            brand_color: Some("#2f6f4f".to_owned()),
            logo_file: None,
            catalog_file: None,
        })
        .await?;

    let products = ProductRepository::new(&pool);
    let batch = [
        ("Hand-thrown Mug", "Stoneware mug, 350 ml", "18"),
        ("Linen Tea Towel", "Washed linen, 50x70 cm", "12"),
        ("Olive Wood Board", "Serving board, one of a kind", "35"),
    ]
    .map(|(name, description, price)| NewProduct {
        store_id: store.id,
        name: name.to_owned(),
        description: Some(description.to_owned()),
        price: Some(price.to_owned()),
        image_file: None,
        image_url: None,
    });

    let created = products.create_batch(&batch).await?;
    info!(store = %store.slug, products = created, "seeded demo store");

    Ok(())
}
