//! In-memory token storage.

use std::sync::Arc;

use async_trait::async_trait;
use nimble_domain::AuthToken;
use tokio::sync::RwLock;

use crate::ports::{StorageError, TokenStore};

/// Thread-safe in-memory token store.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    token: Arc<RwLock<Option<AuthToken>>>,
}

impl InMemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token))),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Option<AuthToken> {
        self.token.read().await.clone()
    }

    async fn save(&self, token: &AuthToken) -> Result<(), StorageError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        self.token.write().await.take();
        Ok(())
    }
}
