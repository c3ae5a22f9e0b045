//! Catalog ingestion orchestrator.

use thiserror::Error;
use tracing::{info, warn};

use crate::db::{NewProduct, ProductRepository, RepositoryError};
use crate::llm::ChatError;
use crate::models::Store;
use crate::state::AppState;

use super::extract::{self, ExtractError};
use super::parse::{self, ParseError};
use super::prompt::{self, SYSTEM_PROMPT};

/// Outcome of one ingestion run.
///
/// Always produced, never blocking: this is the second, best-effort half of
/// store creation and is reported alongside the (already committed) store
/// result.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestionReport {
    /// Number of products persisted from the catalog.
    pub products_extracted: usize,
}

/// Internal error type for the pipeline stages.
#[derive(Debug, Error)]
enum IngestError {
    /// No model credential is configured; the call was never attempted.
    #[error("no model API credential configured")]
    ModelUnavailable,

    /// Text extraction failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The model call failed.
    #[error(transparent)]
    Chat(#[from] ChatError),

    /// The model response could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Persisting the batch failed.
    #[error(transparent)]
    Database(#[from] RepositoryError),
}

/// Run the full catalog ingestion pipeline for a freshly created store.
///
/// Fire-and-forget relative to store creation: the store row has already
/// committed, and any failure here - extraction, the model call, parsing,
/// the batch insert - is caught, logged, and resolved to zero products.
pub async fn ingest_catalog(state: &AppState, store: &Store) -> IngestionReport {
    match run(state, store).await {
        Ok(products_extracted) => {
            info!(
                store = %store.slug,
                products_extracted,
                "catalog ingestion finished"
            );
            IngestionReport { products_extracted }
        }
        Err(err) => {
            warn!(store = %store.slug, error = %err, "catalog ingestion failed");
            IngestionReport::default()
        }
    }
}

async fn run(state: &AppState, store: &Store) -> Result<usize, IngestError> {
    let Some(catalog_file) = &store.catalog_file else {
        // Nothing to ingest; not a failure.
        return Ok(0);
    };

    // Hard precondition, checked before any work is attempted.
    let client = state.model().ok_or(IngestError::ModelUnavailable)?;

    let path = state
        .config()
        .upload_dir
        .join(store.slug.as_str())
        .join(catalog_file);
    let text = extract::extract_text(&path).await?;

    let catalog_prompt = prompt::build_prompt(&text);
    if catalog_prompt.truncated {
        warn!(store = %store.slug, "catalog text truncated to prompt budget");
    }

    let content = client.complete(SYSTEM_PROMPT, &catalog_prompt.text).await?;
    let records = parse::parse_product_list(&content)?;
    if records.is_empty() {
        return Ok(0);
    }

    let placeholder = state.config().placeholder_image_url.clone();
    let batch: Vec<NewProduct> = records
        .into_iter()
        .map(|record| NewProduct {
            store_id: store.id,
            name: record.name,
            description: record.description,
            price: record.price,
            image_file: None,
            image_url: placeholder.clone(),
        })
        .collect();

    let created = ProductRepository::new(state.pool())
        .create_batch(&batch)
        .await?;
    Ok(created)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use axum::{Json, Router, routing::post};
    use secrecy::SecretString;

    use bodega_core::Slug;

    use super::*;
    use crate::config::{ModelConfig, ServerConfig};
    use crate::db::stores::{NewStore, StoreRepository};
    use crate::db::test_support;

    fn config(upload_dir: PathBuf, model: Option<ModelConfig>) -> ServerConfig {
        ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            upload_dir,
            placeholder_image_url: None,
            model,
            sentry_dsn: None,
        }
    }

    async fn seed_store(state: &AppState, catalog_file: Option<&str>) -> Store {
        StoreRepository::new(state.pool())
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
                catalog_file: catalog_file.map(str::to_owned),
            })
            .await
            .unwrap()
    }

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn model_config(base_url: String) -> ModelConfig {
        ModelConfig {
            api_key: SecretString::from("test-key"),
            model: "gpt-4o-mini".to_owned(),
            base_url,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_store_without_catalog_yields_zero() {
        let pool = test_support::pool().await;
        let state = AppState::new(config(PathBuf::from("uploads"), None), pool);
        let store = seed_store(&state, None).await;

        let report = ingest_catalog(&state, &store).await;
        assert_eq!(report.products_extracted, 0);
    }

    #[tokio::test]
    async fn test_missing_credential_yields_zero_without_failing() {
        let pool = test_support::pool().await;
        let state = AppState::new(config(PathBuf::from("uploads"), None), pool);
        let store = seed_store(&state, Some("catalog.pdf")).await;

        let report = ingest_catalog(&state, &store).await;
        assert_eq!(report.products_extracted, 0);
    }

    #[tokio::test]
    async fn test_extraction_failure_yields_zero_without_failing() {
        // Model is configured (pointing at a mock that would answer), but the
        // catalog file does not exist, so extraction fails first.
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                Json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "[]"}}]
                }))
            }),
        );
        let base_url = spawn_mock(router).await;

        let pool = test_support::pool().await;
        let state = AppState::new(
            config(PathBuf::from("/nonexistent-uploads"), Some(model_config(base_url))),
            pool,
        );
        let store = seed_store(&state, Some("catalog.pdf")).await;

        let report = ingest_catalog(&state, &store).await;
        assert_eq!(report.products_extracted, 0);
    }
}
