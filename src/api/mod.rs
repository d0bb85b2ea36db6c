//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - register / login
//! - [`products`] - catalog browse + admin CRUD
//! - [`orders`] - order placement and listing
//! - [`subscriptions`] - subscription box management
//! - [`pets`] - pet profiles
//! - [`admin`] - back-office aggregation

pub mod admin;
pub mod auth;
pub mod health;
pub mod orders;
pub mod pets;
pub mod products;
pub mod subscriptions;

use axum::Router;
use axum::extract::FromRequest;
use http::{HeaderName, HeaderValue};
use surrealdb::RecordId;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// JSON body extractor whose rejection is an [`AppError`]
///
/// Malformed bodies, including unknown enum values, come back as a 400 in
/// the standard error envelope instead of axum's bare 422.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// The caller's `user` record reference
pub(crate) fn caller_record(user: &CurrentUser) -> RecordId {
    crate::db::repository::record_id("user", &user.id)
}

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(subscriptions::router())
        .merge(pets::router())
        .merge(admin::router())
        .merge(health::router())
}

/// Build the fully configured application, still awaiting state
///
/// Used by both the HTTP server and the integration tests.
pub fn build_app() -> Router<ServerState> {
    build_router()
        // CORS - the storefront is served from another origin
        .layer(CorsLayer::permissive())
        // Trace - request spans at INFO level
        .layer(TraceLayer::new_for_http())
        // Request ID - generate and propagate x-request-id
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
