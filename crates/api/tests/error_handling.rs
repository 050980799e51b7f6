//! Tests for `AppError` → HTTP response mapping.
//!
//! Most call `IntoResponse` directly. The ones at the end send malformed
//! requests through the router to check that extractor rejections use the
//! same JSON shape.

mod common;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use thoughtcache_api::error::AppError;
use thoughtcache_core::error::CoreError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Item",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Item with id 42 not found");
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Title must not be empty".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Title must not be empty");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("One or more tags do not exist".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let err = AppError::Core(CoreError::Conflict("duplicate name".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "duplicate name");
}

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn internal_error_hides_detail() {
    let err = AppError::InternalError("token signing failed".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_error_attaches_message() {
    let err = AppError::Database(sqlx::Error::Protocol("connection reset".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Database operation failed");
    assert!(json["message"]
        .as_str()
        .is_some_and(|m| m.contains("connection reset")));
}

// ---------------------------------------------------------------------------
// Extractor rejections
// ---------------------------------------------------------------------------

async fn assert_bad_request_json(response: axum::http::Response<axum::body::Body>) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_numeric_item_id_is_400_json(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let app = common::build_test_app(pool);

    let response = common::get_auth(app, "/api/v1/items/abc", &token).await;
    assert_bad_request_json(response).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrongly_typed_field_is_400_json(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let app = common::build_test_app(pool);

    let response =
        common::put_json_auth(app, "/api/v1/profile", json!({ "display_name": 5 }), &token).await;
    assert_bad_request_json(response).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparseable_body_is_400_json(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let app = common::build_test_app(pool);

    let response = common::send_raw(
        app,
        Method::POST,
        "/api/v1/tags",
        &token,
        Some("application/json"),
        "{not json",
    )
    .await;
    assert_bad_request_json(response).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_content_type_is_400_json(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let app = common::build_test_app(pool);

    let response = common::send_raw(
        app,
        Method::POST,
        "/api/v1/tags",
        &token,
        None,
        r#"{"name":"rust"}"#,
    )
    .await;
    assert_bad_request_json(response).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_share_body_is_400_json(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let item_id = common::create_item(&pool, &token, json!({ "title": "t" })).await;
    let app = common::build_test_app(pool);

    let response = common::send_raw(
        app,
        Method::PUT,
        &format!("/api/v1/items/{item_id}/share"),
        &token,
        Some("application/json"),
        "{\"is_public\": \"yes\"}",
    )
    .await;
    assert_bad_request_json(response).await;
}
