//! Content editor endpoints and the matching public page.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_with_empty_title_is_rejected(pool: PgPool) {
    let (_editor, token) = common::login_as(&pool, "editor@example.com", "editor").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/admin/content/home_intro",
        &token,
        json!({ "title": "   ", "text": "Welcome" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_system_name_is_rejected(pool: PgPool) {
    let (_editor, token) = common::login_as(&pool, "editor@example.com", "editor").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/admin/content/Not%20Valid",
        &token,
        json!({ "title": "Title", "text": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_load_unsaved_block_is_empty(pool: PgPool) {
    let (_editor, token) = common::login_as(&pool, "editor@example.com", "editor").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/content/home_intro", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["id"].is_null());
    assert_eq!(json["data"]["system_name"], "home_intro");
    assert_eq!(json["data"]["title"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_then_load_and_publish(pool: PgPool) {
    let (_editor, token) = common::login_as(&pool, "editor@example.com", "editor").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/admin/content/home_intro",
        &token,
        json!({ "title": "Welcome", "text": "<p>Season opens in April</p>" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;
    assert!(saved["data"]["id"].is_number());

    // Saving again updates the same block.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/admin/content/home_intro",
        &token,
        json!({ "title": "Welcome back", "text": "" }),
    )
    .await;
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["id"], saved["data"]["id"]);

    let (site, _cache) = common::build_test_site(pool);
    let response = get(site, "/api/v1/content/home_intro").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Welcome back");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_missing_content_is_404(pool: PgPool) {
    let (site, cache) = common::build_test_site(pool);

    let response = get(site, "/api/v1/content/nothing_here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    // Errors are never cached.
    assert!(cache.is_empty().await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_content(pool: PgPool) {
    let (_editor, token) = common::login_as(&pool, "editor@example.com", "editor").await;

    let app = common::build_test_app(pool.clone());
    put_json_auth(
        app,
        "/api/v1/admin/content/footer",
        &token,
        json!({ "title": "Footer", "text": "" }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/admin/content/footer", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/admin/content/footer", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
