//! Subscription handlers
//!
//! Every single-record route is owner-scoped: absent and not-owned records
//! are indistinguishable to the caller (both 404).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{AppJson, caller_record};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Subscription, SubscriptionCreate, SubscriptionUpdate};
use crate::db::repository::SubscriptionRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/subscriptions - the caller's subscriptions
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Subscription>>> {
    let repo = SubscriptionRepository::new(state.get_db());
    let subscriptions = repo.find_by_user(caller_record(&user)).await?;
    Ok(Json(subscriptions))
}

/// POST /api/subscriptions - start a subscription
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(data): AppJson<SubscriptionCreate>,
) -> AppResult<(StatusCode, Json<Subscription>)> {
    if data.plan_name.trim().is_empty() {
        return Err(AppError::validation("Plan name must not be empty"));
    }
    if data.price.is_sign_negative() || data.price.is_zero() {
        return Err(AppError::validation("Price must be positive"));
    }

    let repo = SubscriptionRepository::new(state.get_db());
    let subscription = repo.create(caller_record(&user), data).await?;
    tracing::info!(user_id = %user.id, plan = %subscription.plan_name, "subscription created");
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// GET /api/subscriptions/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Subscription>> {
    let repo = SubscriptionRepository::new(state.get_db());
    let subscription = repo
        .find_owned(&id, caller_record(&user))
        .await?
        .ok_or_else(|| AppError::not_found(format!("Subscription {}", id)))?;
    Ok(Json(subscription))
}

/// PATCH /api/subscriptions/{id} - partial update, status machine enforced
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(data): AppJson<SubscriptionUpdate>,
) -> AppResult<Json<Subscription>> {
    if let Some(price) = data.price {
        if price.is_sign_negative() || price.is_zero() {
            return Err(AppError::validation("Price must be positive"));
        }
    }

    let repo = SubscriptionRepository::new(state.get_db());
    let subscription = repo.update_owned(&id, caller_record(&user), data).await?;
    Ok(Json(subscription))
}

/// DELETE /api/subscriptions/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = SubscriptionRepository::new(state.get_db());
    repo.delete_owned(&id, caller_record(&user)).await?;
    Ok(Json(serde_json::json!({ "message": "Subscription deleted" })))
}
