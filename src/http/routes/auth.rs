//! Registration and login endpoints

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::db::repos::UserRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{LoginRequest, RegisterRequest, User};

/// POST /auth/register - create an account
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(&state.db).register(req).await?;
    Ok(Json(user))
}

/// POST /auth/login - check credentials, return the account
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(&state.db)
        .login(&req.login, &req.password)
        .await?;
    Ok(Json(user))
}

/// Auth routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}
