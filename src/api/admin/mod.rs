//! Back-office routes (admin only)

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/orders", get(handler::list_orders))
        .route("/api/admin/orders/{id}", patch(handler::update_order_status))
        .route("/api/admin/users", get(handler::list_users))
        .route("/api/admin/stats", get(handler::stats))
}
