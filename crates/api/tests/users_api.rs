//! Admin user management, the dashboard summary and the membership list.

mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use common::{body_json, delete_auth, get_auth, post_json, put_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

/// Log in through the API and return the refresh token.
async fn refresh_token_for(pool: &PgPool, email: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["refresh_token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_change_applies_and_revokes_sessions(pool: PgPool) {
    let (_admin, admin_token) = common::login_as(&pool, "admin@example.com", "admin").await;
    let editor = common::create_user(&pool, "editor@example.com", "editor").await;
    let refresh_token = refresh_token_for(&pool, "editor@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}", editor.id),
        &admin_token,
        json!({ "role": "admin", "name": "Promoted Editor" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["name"], "Promoted Editor");
    assert_eq!(json["data"]["is_active"], true);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_keeps_sessions(pool: PgPool) {
    let (_admin, admin_token) = common::login_as(&pool, "admin@example.com", "admin").await;
    let editor = common::create_user(&pool, "editor@example.com", "editor").await;
    let refresh_token = refresh_token_for(&pool, "editor@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}", editor.id),
        &admin_token,
        json!({ "name": "Renamed Editor" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_role_is_rejected(pool: PgPool) {
    let (_admin, admin_token) = common::login_as(&pool, "admin@example.com", "admin").await;
    let editor = common::create_user(&pool, "editor@example.com", "editor").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/users/{}", editor.id),
        &admin_token,
        json!({ "role": "superuser" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deactivation_is_idempotent(pool: PgPool) {
    let (_admin, admin_token) = common::login_as(&pool, "admin@example.com", "admin").await;
    let editor = common::create_user(&pool, "editor@example.com", "editor").await;
    let uri = format!("/api/v1/admin/users/{}", editor.id);

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = delete_auth(app, &uri, &admin_token).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &uri, &admin_token).await;
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/admin/users/999999", &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_counts(pool: PgPool) {
    let (_editor, token) = common::login_as(&pool, "editor@example.com", "editor").await;
    let this_year = Utc::now().year();
    let ale = common::create_club(&pool, "Ale GK", "ale-gk").await;
    let bro = common::create_club(&pool, "Bro GK", "bro-gk").await;
    common::create_membership(&pool, ale, this_year, "cs_now_1").await;
    common::create_membership(&pool, bro, this_year - 1, "cs_last_year").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["clubs"], 2);
    assert_eq!(json["data"]["tournaments"], 0);
    assert_eq!(json["data"]["documents"], 0);
    assert_eq!(json["data"]["photos"], 0);
    assert_eq!(json["data"]["pending_invitations"], 0);
    assert_eq!(json["data"]["memberships_this_year"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_memberships_filter_by_year(pool: PgPool) {
    let (_admin, token) = common::login_as(&pool, "admin@example.com", "admin").await;
    let ale = common::create_club(&pool, "Ale GK", "ale-gk").await;
    common::create_membership(&pool, ale, 2025, "cs_2025").await;
    common::create_membership(&pool, ale, 2026, "cs_2026").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/memberships?year=2026", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["payment_reference"], "cs_2026");
    assert_eq!(rows[0]["club_name"], "Ale GK");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/memberships", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_memberships_are_admin_only(pool: PgPool) {
    let (_editor, token) = common::login_as(&pool, "editor@example.com", "editor").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/memberships", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
