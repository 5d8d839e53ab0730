//! In-memory cache of public page payloads.
//!
//! Keys are public paths including the query string (`/photos?club_id=3`).
//! Entries expire after a TTL and are evicted early by revalidation:
//! a `page` path drops that path and its query variants, a `layout` path
//! drops the path and everything nested below it.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use axum::http::Uri;
use clubhouse_core::revalidation::{PathKind, RevalidatePath};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// Upper bound on cached entries; arbitrary query strings must not grow the map forever.
const MAX_ENTRIES: usize = 1024;

struct CachedPage {
    payload: Value,
    cached_at: Instant,
}

pub struct PageCache {
    entries: RwLock<HashMap<String, CachedPage>>,
    ttl: Duration,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// A fresh cached payload, or `None` on a miss or an expired entry.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|page| page.cached_at.elapsed() < self.ttl)
            .map(|page| page.payload.clone())
    }

    pub async fn insert(&self, key: &str, payload: Value) {
        let mut entries = self.entries.write().await;
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(key) {
            let ttl = self.ttl;
            entries.retain(|_, page| page.cached_at.elapsed() < ttl);
            if entries.len() >= MAX_ENTRIES {
                tracing::warn!(key, "Page cache full, not caching");
                return;
            }
        }
        entries.insert(
            key.to_string(),
            CachedPage {
                payload,
                cached_at: Instant::now(),
            },
        );
    }

    /// Serve `key` from the cache or run `load` and cache its result.
    ///
    /// Errors are returned as-is and never cached.
    pub async fn get_or_load<F, Fut>(&self, key: &str, load: F) -> AppResult<Value>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Value>>,
    {
        if let Some(payload) = self.get(key).await {
            tracing::debug!(key, "Page cache hit");
            return Ok(payload);
        }
        let payload = load().await?;
        self.insert(key, payload.clone()).await;
        Ok(payload)
    }

    /// Drop every entry matched by `paths`. Returns how many were dropped.
    pub async fn evict(&self, paths: &[RevalidatePath]) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !paths.iter().any(|target| matches(key, target)));
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Cache key for a request: its path and query as seen inside `/api/v1`.
pub fn page_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string())
}

/// Serialize a page body for caching.
pub fn to_payload<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize page: {e}")))
}

fn key_path(key: &str) -> &str {
    key.split_once('?').map_or(key, |(path, _)| path)
}

fn matches(key: &str, target: &RevalidatePath) -> bool {
    let path = key_path(key);
    match target.kind {
        PathKind::Page => path == target.path,
        PathKind::Layout => {
            let prefix = target.path.trim_end_matches('/');
            prefix.is_empty()
                || path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn cache_with(keys: &[&str]) -> PageCache {
        let cache = PageCache::new(Duration::from_secs(60));
        for key in keys {
            cache.insert(key, json!({ "key": key })).await;
        }
        cache
    }

    #[tokio::test]
    async fn page_evicts_exact_path_and_query_variants() {
        let cache = cache_with(&["/clubs", "/clubs?page=2", "/clubs/links-gk", "/clubsx"]).await;

        let evicted = cache.evict(&[RevalidatePath::page("/clubs")]).await;

        assert_eq!(evicted, 2);
        assert!(cache.get("/clubs").await.is_none());
        assert!(cache.get("/clubs/links-gk").await.is_some());
        assert!(cache.get("/clubsx").await.is_some());
    }

    #[tokio::test]
    async fn layout_evicts_nested_paths() {
        let cache = cache_with(&["/clubs", "/clubs/links-gk", "/clubs/links-gk?x=1", "/courses"]).await;

        let evicted = cache.evict(&[RevalidatePath::layout("/clubs")]).await;

        assert_eq!(evicted, 3);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("/courses").await.is_some());
    }

    #[tokio::test]
    async fn root_layout_evicts_everything() {
        let cache = cache_with(&["/content/home_intro", "/members?year=2026", "/"]).await;
        assert_eq!(cache.evict(&[RevalidatePath::layout("/")]).await, 3);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn expired_entries_are_misses() {
        let cache = PageCache::new(Duration::ZERO);
        cache.insert("/clubs", json!([])).await;
        assert!(cache.get("/clubs").await.is_none());
    }

    #[tokio::test]
    async fn get_or_load_caches_successes_only() {
        let cache = PageCache::new(Duration::from_secs(60));

        let first = cache
            .get_or_load("/members", || async { Ok(json!([1])) })
            .await
            .unwrap();
        let second = cache
            .get_or_load("/members", || async { Ok(json!([2])) })
            .await
            .unwrap();
        assert_eq!(first, second);

        let err = cache
            .get_or_load("/clubs/none", || async {
                Err(crate::error::AppError::BadRequest("nope".into()))
            })
            .await;
        assert!(err.is_err());
        assert!(cache.get("/clubs/none").await.is_none());
    }

    #[test]
    fn page_key_keeps_query() {
        let uri: Uri = "/photos?club_id=3".parse().unwrap();
        assert_eq!(page_key(&uri), "/photos?club_id=3");
        let uri: Uri = "/clubs".parse().unwrap();
        assert_eq!(page_key(&uri), "/clubs");
    }
}
