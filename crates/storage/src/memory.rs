use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{join_url, ObjectStorage, StorageError};

/// An object held by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Process-local object store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, StoredObject>>,
    public_base_url: String,
}

impl MemoryStorage {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base_url: public_base_url.to_string(),
        }
    }

    /// Fetch a stored object.
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let storage = MemoryStorage::new("http://files.local/");
        storage
            .put("documents/a.pdf", b"%PDF".to_vec(), "application/pdf")
            .await
            .unwrap();

        let object = storage.get("documents/a.pdf").await.unwrap();
        assert_eq!(object.data, b"%PDF");
        assert_eq!(object.content_type, "application/pdf");
        assert_eq!(storage.len().await, 1);

        storage.delete("documents/a.pdf").await.unwrap();
        assert!(storage.is_empty().await);

        // Deleting again is fine.
        storage.delete("documents/a.pdf").await.unwrap();
    }

    #[test]
    fn public_url_joins_cleanly() {
        let storage = MemoryStorage::new("http://files.local/");
        assert_eq!(
            storage.public_url("/photos/x.jpg"),
            "http://files.local/photos/x.jpg"
        );
    }
}
