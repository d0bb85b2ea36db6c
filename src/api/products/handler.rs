//! Catalog handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::AppJson;
use crate::auth::{CurrentUser, ensure_admin};
use crate::core::ServerState;
use crate::db::models::{Category, PetType, Product, ProductCreate, ProductUpdate};
use crate::db::repository::{ProductRepository, product::ProductFilter};
use crate::utils::{AppError, AppResult};

/// Browse filters; an unrecognized enum value rejects the request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub pet_type: Option<PetType>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

/// GET /api/products - browse the catalog (public)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo
        .find_filtered(ProductFilter {
            category: query.category,
            pet_type: query.pet_type,
            featured: query.featured,
            search: query.search,
        })
        .await?;
    Ok(Json(products))
}

/// GET /api/products/{id} - single product (public)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", id)))?;
    Ok(Json(product))
}

/// POST /api/products - add a product (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(data): AppJson<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    ensure_admin(&user)?;
    data.validate()?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(data).await?;
    tracing::info!(name = %product.name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/products/{id} - partial update (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(data): AppJson<ProductUpdate>,
) -> AppResult<Json<Product>> {
    ensure_admin(&user)?;
    data.validate()?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, data).await?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} - remove a product (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    ensure_admin(&user)?;

    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await?;
    Ok(Json(serde_json::json!({ "message": "Product deleted" })))
}
