//! Back-office handlers
//!
//! Revenue rollups exclude cancelled orders: a cancelled order represents
//! money that was never collected.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::AppJson;
use crate::auth::{CurrentUser, ensure_admin};
use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus, UserPublic};
use crate::db::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::utils::AppResult;

/// Order customer, resolved for back-office display
#[derive(Debug, Serialize)]
pub struct CustomerInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrdersResponse {
    pub orders: Vec<AdminOrder>,
    pub total_revenue: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub users: u64,
    pub products: u64,
    pub orders: u64,
    pub total_revenue: Decimal,
}

fn revenue(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total_amount)
        .sum()
}

/// GET /api/admin/orders - every order plus the revenue rollup
pub async fn list_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AdminOrdersResponse>> {
    ensure_admin(&user)?;

    let orders = OrderRepository::new(state.get_db()).find_all().await?;
    let users = UserRepository::new(state.get_db()).find_all().await?;

    let by_id: HashMap<String, (String, String)> = users
        .into_iter()
        .filter_map(|u| {
            let id = u.id.as_ref().map(|id| id.to_string())?;
            Some((id, (u.name, u.email)))
        })
        .collect();

    let total_revenue = revenue(&orders);
    let orders = orders
        .into_iter()
        .map(|order| {
            let customer = by_id.get(&order.user.to_string()).map(|(name, email)| {
                CustomerInfo {
                    id: order.user.to_string(),
                    name: name.clone(),
                    email: email.clone(),
                }
            });
            AdminOrder { order, customer }
        })
        .collect();

    Ok(Json(AdminOrdersResponse {
        orders,
        total_revenue,
    }))
}

/// PATCH /api/admin/orders/{id} - advance an order through its lifecycle
pub async fn update_order_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(req): AppJson<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    ensure_admin(&user)?;

    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .update_status(&id, req.status, req.tracking_number)
        .await?;
    tracing::info!(order_id = %id, status = %order.status, "order status updated");
    Ok(Json(order))
}

/// GET /api/admin/users - all accounts, credential hashes stripped
pub async fn list_users(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<UserPublic>>> {
    ensure_admin(&user)?;

    let users = UserRepository::new(state.get_db()).find_all().await?;
    Ok(Json(users.into_iter().map(|u| u.public()).collect()))
}

/// GET /api/admin/stats - entity counts and the revenue rollup
pub async fn stats(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<StatsResponse>> {
    ensure_admin(&user)?;

    let db = state.get_db();
    let users = UserRepository::new(db.clone()).count().await?;
    let products = ProductRepository::new(db.clone()).count().await?;
    let order_repo = OrderRepository::new(db);
    let order_count = order_repo.count().await?;
    let orders = order_repo.find_all().await?;

    Ok(Json(StatsResponse {
        users,
        products,
        orders: order_count,
        total_revenue: revenue(&orders),
    }))
}
