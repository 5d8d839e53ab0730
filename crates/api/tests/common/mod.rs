//! Shared helpers for the HTTP integration tests.
//!
//! Both apps are built through the production router builders, with
//! in-memory object storage, no SMTP and no revalidation client.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use clubhouse_api::auth::jwt::{generate_access_token, JwtConfig};
use clubhouse_api::auth::password::hash_password;
use clubhouse_api::cache::PageCache;
use clubhouse_api::config::{ServerConfig, SiteConfig};
use clubhouse_api::router::{build_app_router, build_site_router};
use clubhouse_api::state::{AppState, SiteState};
use clubhouse_db::models::user::{CreateUser, User};
use clubhouse_db::repositories::{AccountRepo, RoleRepo, UserRepo};
use clubhouse_storage::MemoryStorage;

pub const TEST_PASSWORD: &str = "correct-horse-battery";
pub const REVALIDATE_SECRET: &str = "test-revalidate-secret";
pub const WEBHOOK_SECRET: &str = "whsec_test";
pub const STORAGE_BASE_URL: &str = "http://files.test";

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-jwt-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        admin_base_url: "http://admin.test".to_string(),
        invitation_expiry_days: 7,
    }
}

pub fn test_site_config() -> SiteConfig {
    SiteConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        page_cache_ttl_secs: 3600,
        revalidate_secret: Some(REVALIDATE_SECRET.to_string()),
        payment_webhook_secret: WEBHOOK_SECRET.to_string(),
        contact_recipient: None,
    }
}

/// Build the admin app with a fresh in-memory storage.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_storage(pool, Arc::new(MemoryStorage::new(STORAGE_BASE_URL)))
}

/// Build the admin app around `storage`, so tests can inspect stored objects.
pub fn build_test_app_with_storage(pool: PgPool, storage: Arc<MemoryStorage>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        email: None,
        revalidation: None,
    };
    build_app_router(state, &config)
}

/// Build the public site app. The returned cache is the one the app serves
/// from.
pub fn build_test_site(pool: PgPool) -> (Router, Arc<PageCache>) {
    let config = test_site_config();
    let cache = Arc::new(PageCache::new(Duration::from_secs(config.page_cache_ttl_secs)));
    let state = SiteState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::new(MemoryStorage::new(STORAGE_BASE_URL)),
        email: None,
        cache: Arc::clone(&cache),
    };
    (build_site_router(state, &config), cache)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert an active user with a credential account using [`TEST_PASSWORD`].
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let role = RoleRepo::find_by_name(pool, role)
        .await
        .unwrap()
        .expect("role should be seeded");
    let hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");

    let mut conn = pool.acquire().await.unwrap();
    let user = UserRepo::create(
        &mut conn,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            role_id: role.id,
            email_verified: true,
        },
    )
    .await
    .expect("user creation should succeed");
    AccountRepo::create_credential(&mut conn, user.id, &hash)
        .await
        .expect("credential creation should succeed");
    user
}

/// A valid access token for `user`.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).unwrap()
}

/// Create a user with `role` and return an access token for it.
pub async fn login_as(pool: &PgPool, email: &str, role: &str) -> (User, String) {
    let user = create_user(pool, email, role).await;
    let token = token_for(&user);
    (user, token)
}

/// Insert an active club and return its id.
pub async fn create_club(pool: &PgPool, name: &str, slug: &str) -> i64 {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO clubs (name, slug) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
            .unwrap();
    id
}

/// Record a paid membership directly, as the payment webhook would.
pub async fn create_membership(pool: &PgPool, club_id: i64, year: i32, reference: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO memberships (club_id, year, amount_cents, currency, payment_reference)
         VALUES ($1, $2, 25000, 'sek', $3)
         RETURNING id",
    )
    .bind(club_id)
    .bind(year)
    .bind(reference)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a raw body with extra headers (webhooks, revalidation).
pub async fn post_raw(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
    body: impl Into<Body>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(body.into()).unwrap()).await
}

/// POST a multipart form with text `fields` and one `file` part.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: (&str, &str, &[u8]),
) -> Response<Body> {
    multipart_auth(app, Method::POST, uri, token, fields, file).await
}

/// PUT a multipart form, as the file-replacement endpoints expect.
pub async fn put_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    file: (&str, &str, &[u8]),
) -> Response<Body> {
    multipart_auth(app, Method::PUT, uri, token, &[], file).await
}

async fn multipart_auth(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    file: (&str, &str, &[u8]),
) -> Response<Body> {
    const BOUNDARY: &str = "clubhouse-test-boundary";
    let (file_name, content_type, data) = file;

    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
