//! Token store port

use async_trait::async_trait;
use nimble_domain::AuthToken;

use super::StorageError;

/// A single persistence slot for the current token.
///
/// The store never judges freshness. It only remembers the last token
/// it was given.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored token.
    ///
    /// Missing, unreadable or undecodable data all load as `None`.
    async fn load(&self) -> Option<AuthToken>;

    /// Persists `token`, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    async fn save(&self, token: &AuthToken) -> Result<(), StorageError>;

    /// Clears the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the removal.
    async fn delete(&self) -> Result<(), StorageError>;
}
