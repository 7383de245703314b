//! Secure storage port
//!
//! A keyed blob store supplied by the host, e.g. an OS keychain or an
//! owner-only file.

use std::sync::Arc;

use async_trait::async_trait;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing store cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Keyed persistence for small secret blobs.
#[async_trait]
pub trait SecureStorage: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Removes the blob stored under `key`. Removing a missing key succeeds.
    async fn clear(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: SecureStorage + ?Sized> SecureStorage for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        (**self).clear(key).await
    }
}
