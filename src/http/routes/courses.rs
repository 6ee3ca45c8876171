//! Course catalog endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::CourseRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{Course, CourseDetail, CourseSummary, CreateCourseRequest};

/// Query parameters for the catalog listing.
///
/// The frontend appends a `_t` cache-buster; unknown parameters are
/// simply ignored.
#[derive(Debug, Deserialize)]
struct CourseListParams {
    q: Option<String>,
}

/// GET /api/v1/courses - list the catalog, optionally filtered by `q`
async fn list_courses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CourseListParams>,
) -> Result<Json<Vec<CourseSummary>>, ApiError> {
    let courses = CourseRepo::new(&state.db).list(params.q.as_deref()).await?;
    Ok(Json(courses))
}

/// POST /api/v1/courses - create a course with its quiz
async fn create_course(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<Json<Course>, ApiError> {
    let course = CourseRepo::new(&state.db).create(req).await?;
    Ok(Json(course))
}

/// GET /api/v1/course/{course_id} - course with nested questions/answers
///
/// The detail path is singular, matching what the deployed frontend calls.
async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<i32>,
) -> Result<Json<CourseDetail>, ApiError> {
    let detail = CourseRepo::new(&state.db).get_detail(course_id).await?;
    Ok(Json(detail))
}

/// Course routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/courses", get(list_courses).post(create_course))
        .route("/api/v1/course/{course_id}", get(get_course))
}
