//! Pet profile routes (authenticated, owner-scoped)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/pets", get(handler::list).post(handler::create))
        .route(
            "/api/pets/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
