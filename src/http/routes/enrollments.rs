//! Enrollment endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::EnrollmentRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::CourseSummary;

/// Payload for `POST /api/v1/enroll`
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub user_id: i32,
    pub course_id: i32,
}

/// Enrollment acknowledgement
#[derive(Serialize)]
pub struct EnrollResponse {
    pub message: &'static str,
}

/// POST /api/v1/enroll - enroll a user in a course (idempotent)
async fn enroll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnrollRequest>,
) -> Result<Json<EnrollResponse>, ApiError> {
    EnrollmentRepo::new(&state.db)
        .enroll(req.user_id, req.course_id)
        .await?;

    Ok(Json(EnrollResponse {
        message: "Enrolled successfully",
    }))
}

/// GET /api/v1/users/{user_id}/courses - courses the user is enrolled in
async fn user_courses(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<CourseSummary>>, ApiError> {
    let courses = EnrollmentRepo::new(&state.db)
        .list_courses_for_user(user_id)
        .await?;
    Ok(Json(courses))
}

/// Enrollment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/enroll", post(enroll))
        .route("/api/v1/users/{user_id}/courses", get(user_courses))
}
