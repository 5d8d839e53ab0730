//! Signed payment webhooks creating memberships.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use clubhouse_core::membership::compute_signature;
use common::{body_json, get, post_raw, WEBHOOK_SECRET};
use serde_json::{json, Value};
use sqlx::PgPool;

fn checkout_event(session_id: &str, club_id: i64) -> Value {
    json!({
        "id": format!("evt_{session_id}"),
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": session_id,
            "amount_total": 150000,
            "currency": "SEK",
            "payment_intent": "pi_123",
            "metadata": { "club_id": club_id.to_string(), "year": "2026" },
            "customer_details": { "email": "treasurer@brogk.se" }
        }}
    })
}

fn signature_for(payload: &[u8]) -> String {
    let now = Utc::now().timestamp();
    format!("t={now},v1={}", compute_signature(WEBHOOK_SECRET, now, payload))
}

async fn deliver(pool: &PgPool, event: &Value) -> (StatusCode, Value) {
    let payload = event.to_string();
    let signature = signature_for(payload.as_bytes());
    let (site, _cache) = common::build_test_site(pool.clone());
    let response = post_raw(
        site,
        "/api/v1/webhooks/payment",
        &[("payment-signature", signature.as_str())],
        payload,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

async fn membership_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM memberships")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checkout_creates_membership(pool: PgPool) {
    let club_id = common::create_club(&pool, "Bro GK", "bro-gk").await;

    let (status, json) = deliver(&pool, &checkout_event("cs_1", club_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["received"], true);
    assert_eq!(json["handled"], true);

    let (currency, amount, email): (String, i64, Option<String>) = sqlx::query_as(
        "SELECT currency, amount_cents, payer_email FROM memberships WHERE payment_reference = 'cs_1'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(currency, "sek");
    assert_eq!(amount, 150000);
    assert_eq!(email.as_deref(), Some("treasurer@brogk.se"));

    let (site, _cache) = common::build_test_site(pool);
    let response = get(site, "/api/v1/members?year=2026").await;
    let members = body_json(response).await;
    assert_eq!(members["data"][0]["slug"], "bro-gk");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_event_creates_one_row(pool: PgPool) {
    let club_id = common::create_club(&pool, "Bro GK", "bro-gk").await;
    let event = checkout_event("cs_dup", club_id);

    let (status, _) = deliver(&pool, &event).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = deliver(&pool, &event).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["duplicate"], true);

    assert_eq!(membership_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bad_signature_is_rejected(pool: PgPool) {
    let club_id = common::create_club(&pool, "Bro GK", "bro-gk").await;
    let payload = checkout_event("cs_forged", club_id).to_string();
    let now = Utc::now().timestamp();
    let forged = format!("t={now},v1={}", compute_signature("wrong-secret", now, payload.as_bytes()));

    let (site, _cache) = common::build_test_site(pool.clone());
    let response = post_raw(
        site,
        "/api/v1/webhooks/payment",
        &[("payment-signature", forged.as_str())],
        payload,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid signature");

    assert_eq!(membership_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_signature_is_rejected(pool: PgPool) {
    let (site, _cache) = common::build_test_site(pool);
    let response = post_raw(site, "/api/v1/webhooks/payment", &[], "{}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_event_types_are_acknowledged(pool: PgPool) {
    let event = json!({ "id": "evt_x", "type": "invoice.paid", "data": { "object": {} } });

    let (status, json) = deliver(&pool, &event).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["received"], true);
    assert_eq!(json["handled"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_metadata_is_400(pool: PgPool) {
    let event = json!({
        "id": "evt_y",
        "type": "checkout.session.completed",
        "data": { "object": { "id": "cs_nometa", "amount_total": 100, "currency": "sek" } }
    });

    let (status, json) = deliver(&pool, &event).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(membership_count(&pool).await, 0);
}
