use std::sync::Arc;

use axum::extract::FromRef;
use clubhouse_core::revalidation::{paths_for, Target};
use clubhouse_db::DbPool;
use clubhouse_events::{EmailDelivery, RevalidationClient};
use clubhouse_storage::ObjectStorage;

use crate::cache::PageCache;
use crate::config::{ServerConfig, SiteConfig};

/// Shared state of the admin app, available via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    /// Where uploaded documents and photos are stored.
    pub storage: Arc<dyn ObjectStorage>,
    /// SMTP delivery. `None` when `SMTP_HOST` is unset.
    pub email: Option<Arc<EmailDelivery>>,
    /// Revalidation bridge to the public site. `None` when `SITE_URL` is unset.
    pub revalidation: Option<Arc<RevalidationClient>>,
}

impl AppState {
    /// Tell the public site which pages `target` made stale.
    ///
    /// Best-effort: failures are logged by the client and never reach the
    /// caller. Call only after the mutation has been committed.
    pub async fn revalidate(&self, target: Target<'_>) {
        let paths = paths_for(target);
        match &self.revalidation {
            Some(client) => client.revalidate_best_effort(&paths).await,
            None => tracing::debug!(
                paths = paths.len(),
                "Revalidation not configured, skipping"
            ),
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Shared state of the public site.
#[derive(Clone)]
pub struct SiteState {
    pub pool: DbPool,
    pub config: Arc<SiteConfig>,
    pub storage: Arc<dyn ObjectStorage>,
    pub email: Option<Arc<EmailDelivery>>,
    /// Cached page payloads, evicted by `POST /api/revalidate`.
    pub cache: Arc<PageCache>,
}

impl FromRef<SiteState> for DbPool {
    fn from_ref(state: &SiteState) -> Self {
        state.pool.clone()
    }
}
