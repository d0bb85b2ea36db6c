//! Order routes (authenticated)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list).post(handler::place))
        .route("/api/orders/{id}", get(handler::get_by_id))
}
