//! Token store over a keyed secure storage.

use async_trait::async_trait;
use nimble_application::ports::{SecureStorage, StorageError, TokenStore};
use nimble_domain::AuthToken;
use tracing::{info, warn};

use crate::serialization::{from_file_bytes, to_file_bytes};

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "NimbleAuthToken";

/// [`TokenStore`] that keeps the JSON-encoded token in a [`SecureStorage`].
///
/// Data that cannot be read or decoded loads as no token.
#[derive(Debug, Clone)]
pub struct SecureTokenStore<S> {
    storage: S,
    key: String,
}

impl<S: SecureStorage> SecureTokenStore<S> {
    /// Create a store using [`TOKEN_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TOKEN_KEY)
    }

    /// Create a store using a custom key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait]
impl<S: SecureStorage> TokenStore for SecureTokenStore<S> {
    async fn load(&self) -> Option<AuthToken> {
        let bytes = match self.storage.get(&self.key).await {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored token");
                return None;
            }
        };
        match from_file_bytes(&bytes) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Ignoring undecodable stored token");
                None
            }
        }
    }

    async fn save(&self, token: &AuthToken) -> Result<(), StorageError> {
        let bytes =
            to_file_bytes(token).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &bytes).await?;
        info!(
            access_token = %AuthToken::preview(&token.access_token),
            "Saved auth token"
        );
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        self.storage.clear(&self.key).await?;
        info!("Cleared auth token");
        Ok(())
    }
}
