//! Client side of the revalidation bridge.
//!
//! After a mutation the admin app POSTs the affected public paths to the
//! public site's `/api/revalidate` endpoint. Single attempt, fixed timeout.

use std::time::Duration;

use clubhouse_core::revalidation::RevalidatePath;
use serde::Serialize;

/// HTTP request timeout for a revalidation call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Header carrying the shared secret.
pub const SECRET_HEADER: &str = "x-revalidate-secret";

/// Path of the receiving endpoint on the public site.
const ENDPOINT_PATH: &str = "/api/revalidate";

/// Error type for revalidation failures.
#[derive(Debug, thiserror::Error)]
pub enum RevalidationError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The public site returned a non-2xx status code.
    #[error("Revalidation endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

/// Where and how to reach the public site.
#[derive(Debug, Clone)]
pub struct RevalidationConfig {
    pub site_url: String,
    pub secret: String,
}

impl RevalidationConfig {
    /// Load from `SITE_URL` and `REVALIDATE_SECRET`.
    ///
    /// Returns `None` unless both are set; revalidation is then disabled.
    pub fn from_env() -> Option<Self> {
        let site_url = std::env::var("SITE_URL").ok().filter(|s| !s.is_empty())?;
        let secret = std::env::var("REVALIDATE_SECRET")
            .ok()
            .filter(|s| !s.is_empty())?;
        Some(Self { site_url, secret })
    }

    /// Full URL of the receiving endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{ENDPOINT_PATH}", self.site_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct RevalidateBody<'a> {
    paths: &'a [RevalidatePath],
}

/// Sends revalidation requests to the public site.
pub struct RevalidationClient {
    client: reqwest::Client,
    config: RevalidationConfig,
}

impl RevalidationClient {
    pub fn new(config: RevalidationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// POST `paths` to the public site. One attempt, no retry.
    pub async fn revalidate(&self, paths: &[RevalidatePath]) -> Result<(), RevalidationError> {
        let response = self
            .client
            .post(self.config.endpoint())
            .header(SECRET_HEADER, &self.config.secret)
            .json(&RevalidateBody { paths })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RevalidationError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// [`revalidate`](Self::revalidate), logging instead of returning failures.
    pub async fn revalidate_best_effort(&self, paths: &[RevalidatePath]) {
        if paths.is_empty() {
            return;
        }
        match self.revalidate(paths).await {
            Ok(()) => tracing::debug!(count = paths.len(), "Public paths revalidated"),
            Err(e) => tracing::warn!(error = %e, count = paths.len(), "Revalidation failed"),
        }
    }
}
