//! Process-local secure storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use nimble_application::ports::{SecureStorage, StorageError};
use tokio::sync::RwLock;

/// [`SecureStorage`] that lives only as long as the process.
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemorySecureStorage {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemorySecureStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecureStorage for MemorySecureStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_clear() {
        let storage = MemorySecureStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);

        storage.set("k", b"one").await.unwrap();
        storage.set("k", b"two").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some(b"two".to_vec()));

        storage.clear("k").await.unwrap();
        storage.clear("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }
}
