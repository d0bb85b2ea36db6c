//! Authentication routes
//!
//! Both routes are public; everything else on the API resolves the caller
//! through the bearer-token extractor.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
}
