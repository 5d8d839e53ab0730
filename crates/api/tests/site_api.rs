//! Public site: cached pages, the revalidation receiver and the contact form.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_raw, REVALIDATE_SECRET};
use serde_json::json;
use sqlx::PgPool;

async fn revalidate(app: axum::Router, secret: Option<&str>, body: serde_json::Value) -> axum::http::Response<axum::body::Body> {
    let headers: Vec<(&str, &str)> = secret
        .map(|s| vec![("x-revalidate-secret", s)])
        .unwrap_or_default();
    post_raw(app, "/api/revalidate", &headers, body.to_string()).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pages_are_served_from_cache_until_revalidated(pool: PgPool) {
    common::create_club(&pool, "Bro GK", "bro-gk").await;
    let (site, cache) = common::build_test_site(pool.clone());

    let response = get(site.clone(), "/api/v1/clubs").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
    assert_eq!(cache.len().await, 1);

    // A change the site has not been told about stays invisible.
    common::create_club(&pool, "Ale GK", "ale-gk").await;
    let response = get(site.clone(), "/api/v1/clubs").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = revalidate(
        site.clone(),
        Some(REVALIDATE_SECRET),
        json!({ "paths": [{ "path": "/clubs", "kind": "page" }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["revalidated"], true);
    assert_eq!(json["evicted"], 1);
    assert!(json["now"].is_number());

    let response = get(site, "/api/v1/clubs").await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_layout_revalidation_evicts_nested_pages(pool: PgPool) {
    common::create_club(&pool, "Bro GK", "bro-gk").await;
    let (site, cache) = common::build_test_site(pool);

    get(site.clone(), "/api/v1/clubs").await;
    get(site.clone(), "/api/v1/clubs/bro-gk").await;
    get(site.clone(), "/api/v1/courses").await;
    assert_eq!(cache.len().await, 3);

    let response = revalidate(
        site,
        Some(REVALIDATE_SECRET),
        json!({ "paths": [{ "path": "/clubs", "kind": "layout" }] }),
    )
    .await;
    assert_eq!(body_json(response).await["evicted"], 2);
    assert_eq!(cache.len().await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_secret_is_rejected(pool: PgPool) {
    let (site, _cache) = common::build_test_site(pool);

    let body = json!({ "paths": [{ "path": "/", "kind": "layout" }] });
    let response = revalidate(site.clone(), Some("guess"), body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid secret");

    let response = revalidate(site, None, body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revalidate_rejects_empty_and_invalid_paths(pool: PgPool) {
    let (site, _cache) = common::build_test_site(pool);

    let response = revalidate(site.clone(), Some(REVALIDATE_SECRET), json!({ "paths": [] })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = revalidate(
        site,
        Some(REVALIDATE_SECRET),
        json!({ "paths": [{ "path": "clubs", "kind": "page" }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_club_page_is_404(pool: PgPool) {
    let id = common::create_club(&pool, "Closed GK", "closed-gk").await;
    sqlx::query("UPDATE clubs SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();
    let (site, _cache) = common::build_test_site(pool);

    let response = get(site, "/api/v1/clubs/closed-gk").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_honeypot_is_silently_accepted(pool: PgPool) {
    let (site, _cache) = common::build_test_site(pool);

    let response = post_json(
        site,
        "/api/v1/contact",
        json!({
            "name": "Bot",
            "email": "bot@example.com",
            "message": "Buy now",
            "website": "http://spam.example"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_validates_before_sending(pool: PgPool) {
    let (site, _cache) = common::build_test_site(pool);

    let response = post_json(
        site,
        "/api/v1/contact",
        json!({ "name": "Anna", "email": "not-an-email", "message": "Hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contact_without_email_setup_is_502(pool: PgPool) {
    let (site, _cache) = common::build_test_site(pool);

    let response = post_json(
        site,
        "/api/v1/contact",
        json!({ "name": "Anna", "email": "anna@example.com", "message": "Tee times?" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to send message");
}
