//! Router tests that run without a database
//!
//! Only paths that fail (or answer) before any connection is opened are
//! exercised here; everything that touches Postgres lives in
//! repo_properties.rs behind `--ignored`.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use base64::Engine;
use tower::ServiceExt;

use learnhub_server::db::{Db, DbConfig};
use learnhub_server::http::{build_router, AppState};
use learnhub_server::models::MAX_AVATAR_BYTES;

/// Router whose database points at a closed port, so an accidental
/// connection attempt fails fast instead of retrying for ten seconds.
fn test_router() -> axum::Router {
    let config = DbConfig {
        host: "127.0.0.1".to_owned(),
        port: 1,
        connect_retries: 1,
        retry_wait: Duration::from_millis(1),
        ..DbConfig::default()
    };
    build_router(
        AppState {
            db: Db::new(config),
        },
        false,
    )
}

#[tokio::test]
async fn health_works_without_database() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/not-a-route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_avatar_is_rejected_before_any_database_access() {
    let raw = vec![0u8; MAX_AVATAR_BYTES + 1];
    let payload = base64::engine::general_purpose::STANDARD.encode(&raw);
    let body = serde_json::json!({
        "avatar_url": format!("data:image/png;base64,{payload}"),
    });

    let response = test_router()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/users/1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn malformed_avatar_base64_is_rejected() {
    let body = serde_json::json!({
        "avatar_url": "data:image/png;base64,@@not-base64@@",
    });

    let response = test_router()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/users/1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "validation_error");
}
