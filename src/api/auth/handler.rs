//! Authentication handlers

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::AppJson;
use crate::core::ServerState;
use crate::db::models::{Address, Role, User, UserPublic};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Fixed delay on credential checks to blunt timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

/// POST /api/auth/register - create a customer account
pub async fn register(
    State(state): State<ServerState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(req.name, req.email, hash, req.phone, req.address, Role::Customer)
        .await?;

    let token = issue_token(&state, &user)?;
    tracing::info!(email = %user.email, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.public(),
        }),
    ))
}

/// POST /api/auth/login - exchange credentials for a token
pub async fn login(
    State(state): State<ServerState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error for unknown email and wrong password alike
    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!(email = %req.email, "login failed: unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    let valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        tracing::warn!(email = %req.email, "login failed: bad password");
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(&state, &user)?;

    Ok(Json(AuthResponse {
        token,
        user: user.public(),
    }))
}

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    let user_id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    state
        .jwt_service
        .generate_token(&user_id, &user.email, user.role.as_str())
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))
}
