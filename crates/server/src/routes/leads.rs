//! Lead route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use bodega_core::{LeadId, ProductId, StoreId};

use crate::db::{LeadRepository, ProductRepository, StoreRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Request body for `POST /leads`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub product_id: Option<ProductId>,
    pub store_id: Option<StoreId>,
}

/// Response for `POST /leads`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadResponse {
    pub success: bool,
    pub message: String,
    pub lead_id: LeadId,
}

/// Response for `GET /stores/{slug}/leads`.
#[derive(Debug, Serialize)]
pub struct LeadCountResponse {
    pub success: bool,
    pub count: i64,
}

/// `POST /leads` - record a buyer's interest in a product.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<CreateLeadResponse>)> {
    let (Some(product_id), Some(store_id)) = (request.product_id, request.store_id) else {
        return Err(AppError::BadRequest(
            "productId and storeId are required".to_owned(),
        ));
    };

    let product = ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;

    let store = StoreRepository::new(state.pool())
        .get_by_id(store_id)
        .await?
        .ok_or_else(|| AppError::NotFound("store not found".to_owned()))?;

    if product.store_id != store.id {
        return Err(AppError::BadRequest(
            "product does not belong to the specified store".to_owned(),
        ));
    }

    let lead = LeadRepository::new(state.pool())
        .create(product.id, store.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLeadResponse {
            success: true,
            message: "lead recorded".to_owned(),
            lead_id: lead.id,
        }),
    ))
}

/// `GET /stores/{slug}/leads` - lead count for a store.
pub async fn count_for_store(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LeadCountResponse>> {
    let store = StoreRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("store not found".to_owned()))?;

    let count = LeadRepository::new(state.pool())
        .count_for_store(store.id)
        .await?;

    Ok(Json(LeadCountResponse {
        success: true,
        count,
    }))
}
