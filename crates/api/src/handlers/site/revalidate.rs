//! Revalidation receiver: the admin app names stale pages, we drop them.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use clubhouse_core::error::CoreError;
use clubhouse_core::revalidation::{validate_path, RevalidatePath};
use clubhouse_events::revalidation::SECRET_HEADER;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::SiteState;

#[derive(Debug, Deserialize)]
pub struct RevalidateRequest {
    pub paths: Vec<RevalidatePath>,
}

#[derive(Debug, Serialize)]
pub struct RevalidateResponse {
    pub revalidated: bool,
    pub evicted: usize,
    /// Unix time in milliseconds.
    pub now: i64,
}

/// POST /api/revalidate
///
/// The secret is checked before the body is parsed, so unauthenticated
/// callers always get a 401.
pub async fn revalidate(
    State(state): State<SiteState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<RevalidateResponse>> {
    let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    let authorized = match (state.config.revalidate_secret.as_deref(), provided) {
        (Some(expected), Some(provided)) => secrets_match(expected, provided),
        _ => false,
    };
    if !authorized {
        tracing::warn!("Rejected revalidation request");
        return Err(CoreError::Unauthorized("Invalid secret".into()).into());
    }

    let input: RevalidateRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed revalidation request: {e}")))?;
    if input.paths.is_empty() {
        return Err(AppError::BadRequest("At least one path is required".into()));
    }
    for path in &input.paths {
        validate_path(&path.path)?;
    }

    let evicted = state.cache.evict(&input.paths).await;
    tracing::info!(paths = input.paths.len(), evicted, "Pages revalidated");

    Ok(Json(RevalidateResponse {
        revalidated: true,
        evicted,
        now: Utc::now().timestamp_millis(),
    }))
}

/// Compare without short-circuiting on the first differing byte.
fn secrets_match(expected: &str, provided: &str) -> bool {
    let (a, b) = (expected.as_bytes(), provided.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
