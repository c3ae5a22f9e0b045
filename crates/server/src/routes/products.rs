//! Product route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;

use bodega_core::{ImageRef, ProductId, Slug, StoreId};

use crate::db::{NewProduct, ProductRepository, ProductUpdate, StoreRepository};
use crate::error::{AppError, Result};
use crate::models::{Product, Store};
use crate::services::uploads::{self, UploadError};
use crate::state::AppState;

use super::{UploadedFile, bad_multipart, non_empty};

/// Product representation for store-scoped listings.
///
/// Carries the owning store's contact details so a storefront can render
/// "message the seller" links without a second request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub store_id: StoreId,
    pub phone: Option<String>,
    pub instagram: Option<String>,
}

/// Product representation for the cross-store listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalProductView {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub slug: Slug,
    pub store_id: StoreId,
    pub phone: Option<String>,
    pub instagram: Option<String>,
}

/// Owning-store summary embedded in the product detail.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreContact {
    pub id: StoreId,
    pub name: String,
    pub slug: Slug,
    pub phone: Option<String>,
    pub instagram: Option<String>,
}

/// Product detail with its owning store.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub store: StoreContact,
}

/// Response for `GET /stores/{slug}/products` and `GET /products`.
#[derive(Debug, Serialize)]
pub struct ProductsResponse<T> {
    pub success: bool,
    pub products: Vec<T>,
}

/// Response for `GET /products/{id}`.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: ProductDetail,
}

/// Response for `POST /products`.
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub success: bool,
    pub message: String,
    pub id: ProductId,
}

/// Response for `PUT /products/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateProductResponse {
    pub success: bool,
    pub message: String,
}

fn product_view(product: &Product, store: &Store) -> ProductView {
    ProductView {
        id: product.id,
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price.clone(),
        image_url: product.resolved_image_url(&store.slug),
        store_id: product.store_id,
        phone: store.phone.clone(),
        instagram: store.instagram.clone(),
    }
}

/// `GET /stores/{slug}/products` - list a store's products, newest first.
pub async fn for_store(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductsResponse<ProductView>>> {
    let store = StoreRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("store not found".to_owned()))?;

    let products = ProductRepository::new(state.pool())
        .list_for_store(store.id)
        .await?;

    Ok(Json(ProductsResponse {
        success: true,
        products: products.iter().map(|p| product_view(p, &store)).collect(),
    }))
}

/// `GET /products` - list all products across stores, newest first.
pub async fn index(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse<GlobalProductView>>> {
    let rows = ProductRepository::new(state.pool())
        .list_all_with_store()
        .await?;

    let products = rows
        .into_iter()
        .map(|row| GlobalProductView {
            image_url: row.product.resolved_image_url(&row.store_slug),
            id: row.product.id,
            name: row.product.name,
            description: row.product.description,
            price: row.product.price,
            slug: row.store_slug,
            store_id: row.product.store_id,
            phone: row.store_phone,
            instagram: row.store_instagram,
        })
        .collect();

    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}

/// `GET /products/{id}` - fetch one product with its owning-store summary.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    let store = owning_store(&state, &product).await?;

    Ok(Json(ProductResponse {
        success: true,
        product: ProductDetail {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image_url: product.resolved_image_url(&store.slug),
            store: StoreContact {
                id: store.id,
                name: store.name,
                slug: store.slug,
                phone: store.phone,
                instagram: store.instagram,
            },
        },
    }))
}

/// Multipart form accepted by `POST /products` and `PUT /products/{id}`.
#[derive(Default)]
struct ProductForm {
    slug: Option<String>,
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    image_url: Option<String>,
    image: Option<UploadedFile>,
}

impl ProductForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let name = field.name().unwrap_or_default().to_owned();
            match name.as_str() {
                "slug" => form.slug = non_empty(field.text().await.map_err(bad_multipart)?),
                "name" => form.name = non_empty(field.text().await.map_err(bad_multipart)?),
                "description" => {
                    form.description = non_empty(field.text().await.map_err(bad_multipart)?);
                }
                "price" => form.price = non_empty(field.text().await.map_err(bad_multipart)?),
                "image_url" => {
                    form.image_url = non_empty(field.text().await.map_err(bad_multipart)?);
                }
                "image" => {
                    let filename = field.file_name().map(str::to_owned);
                    let data = field.bytes().await.map_err(bad_multipart)?;
                    form.image = filename
                        .filter(|f| !f.is_empty())
                        .filter(|_| !data.is_empty())
                        .map(|filename| UploadedFile { filename, data });
                }
                _ => {
                    let _ = field.bytes().await.map_err(bad_multipart)?;
                }
            }
        }

        Ok(form)
    }

    fn required_name(&self) -> Result<String> {
        self.name
            .clone()
            .ok_or_else(|| AppError::BadRequest("product name is required".to_owned()))
    }
}

/// Save a product image into the owning store's asset directory.
async fn save_image(state: &AppState, slug: &Slug, file: &UploadedFile) -> Result<String> {
    uploads::save_upload(&state.config().upload_dir, slug, &file.filename, &file.data)
        .await
        .map_err(|err| match err {
            UploadError::InvalidFilename(_) => {
                AppError::BadRequest("image filename is invalid".to_owned())
            }
            UploadError::Io(e) => AppError::Internal(format!("failed to save image: {e}")),
        })
}

/// `POST /products` - create a product manually for an existing store.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CreateProductResponse>> {
    let form = ProductForm::from_multipart(multipart).await?;

    let slug = form
        .slug
        .clone()
        .ok_or_else(|| AppError::BadRequest("store slug is required".to_owned()))?;
    let name = form.required_name()?;

    if let Some(url) = &form.image_url
        && !ImageRef::is_external_url(url)
    {
        return Err(AppError::BadRequest(
            "image_url must be an absolute http(s) URL".to_owned(),
        ));
    }

    let store = StoreRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("store not found".to_owned()))?;

    let image_file = match &form.image {
        Some(file) => Some(save_image(&state, &store.slug, file).await?),
        None => None,
    };

    let product = ProductRepository::new(state.pool())
        .create(NewProduct {
            store_id: store.id,
            name,
            description: form.description,
            price: form.price,
            image_file,
            image_url: form.image_url,
        })
        .await?;

    Ok(Json(CreateProductResponse {
        success: true,
        message: "product created".to_owned(),
        id: product.id,
    }))
}

/// `PUT /products/{id}` - edit a product, optionally replacing its image.
///
/// The owning store (and thus the image directory) is derived from the
/// product row itself; the client does not get to pick the target directory.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<UpdateProductResponse>> {
    let form = ProductForm::from_multipart(multipart).await?;
    let name = form.required_name()?;

    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    let store = owning_store(&state, &product).await?;

    let image_file = match &form.image {
        Some(file) => Some(save_image(&state, &store.slug, file).await?),
        None => None,
    };

    repo.update(
        product.id,
        ProductUpdate {
            name,
            description: form.description,
            price: form.price,
            image_file,
        },
    )
    .await?;

    Ok(Json(UpdateProductResponse {
        success: true,
        message: "product updated".to_owned(),
    }))
}

/// Fetch the store owning `product`; its absence is a data invariant break.
async fn owning_store(state: &AppState, product: &Product) -> Result<Store> {
    StoreRepository::new(state.pool())
        .get_by_id(product.store_id)
        .await?
        .ok_or_else(|| {
            AppError::Internal(format!(
                "store {} missing for product {}",
                product.store_id, product.id
            ))
        })
}
