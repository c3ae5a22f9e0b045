//! Store route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use bodega_core::{Slug, StoreId};

use crate::catalog;
use crate::db::{NewStore, RepositoryError, StoreRepository};
use crate::error::{AppError, Result};
use crate::models::Store;
use crate::services::uploads::{self, UploadError};
use crate::state::AppState;

use super::{UploadedFile, bad_multipart, non_empty};

/// Minimum accepted store name length.
const MIN_NAME_LENGTH: usize = 2;

/// Full store representation for the detail endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreView {
    pub id: StoreId,
    pub name: String,
    pub slug: Slug,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub address: Option<String>,
    pub brand_color: Option<String>,
    pub logo_url: Option<String>,
    pub catalog_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoreView {
    fn from_store(store: &Store) -> Self {
        Self {
            id: store.id,
            name: store.name.clone(),
            slug: store.slug.clone(),
            description: store.description.clone(),
            email: store.email.clone(),
            phone: store.phone.clone(),
            instagram: store.instagram.clone(),
            address: store.address.clone(),
            brand_color: store.brand_color.clone(),
            logo_url: store.logo_url(),
            catalog_url: store.catalog_url(),
            created_at: store.created_at,
        }
    }
}

/// Compact store representation for the listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub id: StoreId,
    pub name: String,
    pub slug: Slug,
    pub logo_url: Option<String>,
}

/// Response for `POST /stores`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreResponse {
    pub success: bool,
    pub message: String,
    pub slug: Slug,
    pub products_extracted: usize,
}

/// Response for `GET /stores`.
#[derive(Debug, Serialize)]
pub struct StoresResponse {
    pub success: bool,
    pub stores: Vec<StoreSummary>,
}

/// Response for `GET /stores/{slug}`.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub success: bool,
    pub store: StoreView,
}

/// Multipart form accepted by `POST /stores`.
#[derive(Default)]
struct CreateStoreForm {
    name: Option<String>,
    description: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    instagram: Option<String>,
    address: Option<String>,
    brand_color: Option<String>,
    logo: Option<UploadedFile>,
    catalog: Option<UploadedFile>,
}

impl CreateStoreForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "name" => form.name = non_empty(field.text().await.map_err(bad_multipart)?),
                "description" => {
                    form.description = non_empty(field.text().await.map_err(bad_multipart)?);
                }
                "email" => form.email = non_empty(field.text().await.map_err(bad_multipart)?),
                "phone" => form.phone = non_empty(field.text().await.map_err(bad_multipart)?),
                "instagram" => {
                    form.instagram = non_empty(field.text().await.map_err(bad_multipart)?);
                }
                "address" => form.address = non_empty(field.text().await.map_err(bad_multipart)?),
                "brand_color" => {
                    form.brand_color = non_empty(field.text().await.map_err(bad_multipart)?);
                }
                "logo" => form.logo = read_file(field).await?,
                "catalog" => form.catalog = read_file(field).await?,
                // Unknown fields are ignored
                _ => {
                    let _ = field.bytes().await.map_err(bad_multipart)?;
                }
            }
        }

        Ok(form)
    }
}

/// Read a file field; a field without a filename or content counts as absent.
async fn read_file(field: axum::extract::multipart::Field<'_>) -> Result<Option<UploadedFile>> {
    let filename = field.file_name().map(str::to_owned);
    let data = field.bytes().await.map_err(bad_multipart)?;

    Ok(filename
        .filter(|f| !f.is_empty())
        .filter(|_| !data.is_empty())
        .map(|filename| UploadedFile { filename, data }))
}

/// `POST /stores` - create a store, then run best-effort catalog ingestion.
///
/// The store commit and the ingestion run are two independent outcomes: once
/// the store row is durable, no ingestion failure can turn this response into
/// an error; it only drives `productsExtracted` to zero.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CreateStoreResponse>> {
    let form = CreateStoreForm::from_multipart(multipart).await?;

    let name = form
        .name
        .ok_or_else(|| AppError::BadRequest("store name is required".to_owned()))?;
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "store name must be at least {MIN_NAME_LENGTH} characters"
        )));
    }

    let repo = StoreRepository::new(state.pool());
    let slug = repo.next_free_slug(&Slug::from_name(&name)).await?;

    // Save uploads before the insert (their filenames go into the row). If
    // anything after this point fails the request, the fresh asset directory
    // is removed again.
    let upload_root = state.config().upload_dir.clone();
    let mut logo_file = None;
    let mut catalog_file = None;

    for (upload, target, label) in [
        (&form.logo, &mut logo_file, "logo"),
        (&form.catalog, &mut catalog_file, "catalog"),
    ] {
        if let Some(file) = upload {
            match uploads::save_upload(&upload_root, &slug, &file.filename, &file.data).await {
                Ok(stored) => *target = Some(stored),
                Err(UploadError::InvalidFilename(_)) => {
                    uploads::remove_store_dir(&upload_root, &slug).await;
                    return Err(AppError::BadRequest(format!("{label} filename is invalid")));
                }
                Err(UploadError::Io(err)) => {
                    uploads::remove_store_dir(&upload_root, &slug).await;
                    return Err(AppError::Internal(format!("failed to save {label}: {err}")));
                }
            }
        }
    }

    let store = match repo
        .create(NewStore {
            name,
            slug: slug.clone(),
            description: form.description,
            email: form.email,
            phone: form.phone,
            instagram: form.instagram,
            address: form.address,
            brand_color: form.brand_color,
            logo_file,
            catalog_file,
        })
        .await
    {
        Ok(store) => store,
        Err(err) => {
            uploads::remove_store_dir(&upload_root, &slug).await;
            return Err(match err {
                RepositoryError::Conflict(msg) => AppError::Conflict(msg),
                other => AppError::Database(other),
            });
        }
    };

    // Best-effort from here on: the store is committed.
    let report = catalog::ingest_catalog(&state, &store).await;

    Ok(Json(CreateStoreResponse {
        success: true,
        message: "store created".to_owned(),
        slug: store.slug,
        products_extracted: report.products_extracted,
    }))
}

/// `GET /stores` - list all stores, newest first.
pub async fn index(State(state): State<AppState>) -> Result<Json<StoresResponse>> {
    let stores = StoreRepository::new(state.pool()).list_all().await?;

    let summaries = stores
        .iter()
        .map(|store| StoreSummary {
            id: store.id,
            name: store.name.clone(),
            slug: store.slug.clone(),
            logo_url: store.logo_url(),
        })
        .collect();

    Ok(Json(StoresResponse {
        success: true,
        stores: summaries,
    }))
}

/// `GET /stores/{slug}` - fetch one store.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<StoreResponse>> {
    let store = StoreRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("store not found".to_owned()))?;

    Ok(Json(StoreResponse {
        success: true,
        store: StoreView::from_store(&store),
    }))
}
