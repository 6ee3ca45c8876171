//! User listing and profile endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::db::repos::UserRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{validate_avatar_url, UpdateProfileRequest, User};

/// GET /users - list all users
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepo::new(&state.db).list().await?;
    Ok(Json(users))
}

/// GET /api/v1/users/{user_id} - fetch one profile
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(&state.db).get(user_id).await?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{user_id} - partial profile update
///
/// Avatar payloads are validated before any database work happens.
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    if let Some(avatar) = req.avatar_url.as_deref() {
        validate_avatar_url(avatar)?;
    }

    let user = UserRepo::new(&state.db).update(user_id, req).await?;
    Ok(Json(user))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/api/v1/users/{user_id}", get(get_user).put(update_user))
}
