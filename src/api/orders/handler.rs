//! Order handlers
//!
//! Placement delegates to the order engine and the transactional repository;
//! the handler only shapes the request and the response.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{AppJson, caller_record};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Address, Order};
use crate::db::repository::OrderRepository;
use crate::orders::CartLine;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<OrderLine>,
    pub shipping_address: Address,
}

/// One requested cart line; price and name are never taken from the client
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product: String,
    pub quantity: u32,
}

/// GET /api/orders - the caller's orders, newest first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_by_user(caller_record(&user)).await?;
    Ok(Json(orders))
}

/// POST /api/orders - place an order
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(req): AppJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let lines: Vec<CartLine> = req
        .items
        .into_iter()
        .map(|line| CartLine {
            product_id: line.product,
            quantity: line.quantity,
        })
        .collect();

    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .place(caller_record(&user), lines, req.shipping_address)
        .await?;

    tracing::info!(user_id = %user.id, total = %order.total_amount, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id} - single order, owner or admin only
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", id)))?;

    // The order exists, so a foreign caller gets a 403 rather than a 404
    if order.user != caller_record(&user) && !user.is_admin() {
        return Err(AppError::forbidden("Not your order"));
    }

    Ok(Json(order))
}
