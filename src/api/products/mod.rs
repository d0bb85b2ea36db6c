//! Catalog routes
//!
//! Browsing is public; mutations are admin-only (enforced in the handlers).

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/products",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/products/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
