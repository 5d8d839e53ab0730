//! Object storage for uploaded documents and photos.
//!
//! Handlers talk to an [`ObjectStorage`] trait object. Two backends exist:
//! [`S3Storage`] for any S3-compatible service and [`MemoryStorage`] for
//! local development and tests.

pub mod config;
pub mod memory;
pub mod s3;

use std::sync::Arc;

use async_trait::async_trait;

pub use config::{S3Config, StorageBackend, StorageConfig};
pub use memory::MemoryStorage;
pub use s3::S3Storage;

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage configuration error: {0}")]
    Config(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A flat key/value object store.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Remove the object at `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// The URL the public site links to for `key`.
    fn public_url(&self, key: &str) -> String;
}

/// Build the configured backend.
pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    match &config.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory object storage; uploads are lost on restart");
            Ok(Arc::new(MemoryStorage::new(&config.public_base_url)))
        }
        StorageBackend::S3(s3) => {
            let storage = S3Storage::connect(s3, &config.public_base_url).await?;
            tracing::info!(bucket = %s3.bucket, region = %s3.region, "S3 object storage ready");
            Ok(Arc::new(storage))
        }
    }
}

/// Join a public base URL and an object key.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
