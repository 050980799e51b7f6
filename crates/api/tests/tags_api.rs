//! Integration tests for the `/tags` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_trims_name_and_lists_sorted(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "name": "  zebra ", "color": "#FF5733" });
    let response = post_json_auth(app, "/api/v1/tags", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "zebra");
    assert_eq!(json["data"]["color"], "#FF5733");

    common::create_tag(&pool, &token, "Apple").await;

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/tags", &token).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Apple", "zebra"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_name_is_400(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/tags", json!({ "name": "   " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_color_is_400(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let app = common::build_test_app(pool);

    let body = json!({ "name": "red", "color": "red" });
    let response = post_json_auth(app, "/api/v1/tags", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_ignoring_case_is_409(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    common::create_tag(&pool, &token, "Rust").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/tags", json!({ "name": "rust" }), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "A tag with this name already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_name_for_another_user_is_allowed(pool: PgPool) {
    let (_, alice) = common::create_user_with_token(&pool, "a@example.com").await;
    let (_, bob) = common::create_user_with_token(&pool, "b@example.com").await;
    common::create_tag(&pool, &alice, "Rust").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/tags", json!({ "name": "Rust" }), &bob).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_renames_and_clears_color(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "name": "wip", "color": "#abc" });
    let response = post_json_auth(app, "/api/v1/tags", body, &token).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = json!({ "name": "done", "color": "" });
    let response = put_json_auth(app, &format!("/api/v1/tags/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "done");
    assert!(json["data"]["color"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rename_into_existing_name_is_409(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    common::create_tag(&pool, &token, "alpha").await;
    let beta = common::create_tag(&pool, &token, "beta").await;

    let app = common::build_test_app(pool);
    let body = json!({ "name": "ALPHA" });
    let response = put_json_auth(app, &format!("/api/v1/tags/{beta}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_tag_detaches_it_from_items(pool: PgPool) {
    let (_, token) = common::create_user_with_token(&pool, "a@example.com").await;
    let tag = common::create_tag(&pool, &token, "temp").await;
    let item = common::create_item(&pool, &token, json!({ "title": "t", "tag_ids": [tag] })).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/tags/{tag}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &format!("/api/v1/items/{item}"), &token).await).await;
    assert_eq!(json["data"]["tags"], json!([]));
}
