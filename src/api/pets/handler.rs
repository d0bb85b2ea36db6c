//! Pet profile handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{AppJson, caller_record};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{PetCreate, PetProfile, PetUpdate};
use crate::db::repository::PetRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/pets - the caller's pet profiles
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<PetProfile>>> {
    let repo = PetRepository::new(state.get_db());
    let pets = repo.find_by_user(caller_record(&user)).await?;
    Ok(Json(pets))
}

/// POST /api/pets - add a pet profile
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(data): AppJson<PetCreate>,
) -> AppResult<(StatusCode, Json<PetProfile>)> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Pet name must not be empty"));
    }

    let repo = PetRepository::new(state.get_db());
    let pet = repo.create(caller_record(&user), data).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// GET /api/pets/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<PetProfile>> {
    let repo = PetRepository::new(state.get_db());
    let pet = repo
        .find_owned(&id, caller_record(&user))
        .await?
        .ok_or_else(|| AppError::not_found(format!("Pet profile {}", id)))?;
    Ok(Json(pet))
}

/// PATCH /api/pets/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(data): AppJson<PetUpdate>,
) -> AppResult<Json<PetProfile>> {
    let repo = PetRepository::new(state.get_db());
    let pet = repo.update_owned(&id, caller_record(&user), data).await?;
    Ok(Json(pet))
}

/// DELETE /api/pets/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = PetRepository::new(state.get_db());
    repo.delete_owned(&id, caller_record(&user)).await?;
    Ok(Json(serde_json::json!({ "message": "Pet profile deleted" })))
}
