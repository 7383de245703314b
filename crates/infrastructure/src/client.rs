//! Composition root.

use std::fmt;
use std::sync::Arc;

use nimble_application::ports::{SecureStorage, TransportError};
use nimble_application::{AuthServiceWithStore, SurveyLoaderWithAuth};
use tracing::info;

use crate::adapters::{ReqwestTransport, SystemClock};
use crate::auth::RemoteAuthService;
use crate::config::{ClientConfig, ConfigError};
use crate::persistence::{FileSecureStorage, MemorySecureStorage, SecureTokenStore};
use crate::survey::RemoteSurveyLoader;

/// Auth gateway as wired by [`NimbleClient`].
pub type Gateway = AuthServiceWithStore<
    RemoteAuthService<ReqwestTransport>,
    SecureTokenStore<Arc<dyn SecureStorage>>,
>;

/// Authenticated survey loader as wired by [`NimbleClient`].
pub type AuthenticatedSurveys =
    SurveyLoaderWithAuth<RemoteSurveyLoader<ReqwestTransport>, Gateway, SystemClock>;

/// Errors raised while assembling a [`NimbleClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Transport(#[from] TransportError),
}

/// A ready-to-use survey client.
///
/// `auth()` handles login, registration, logout and password reset and
/// keeps the stored token current. `surveys()` fetches surveys with the
/// stored token, refreshing it when it has expired.
pub struct NimbleClient {
    auth: Arc<Gateway>,
    surveys: AuthenticatedSurveys,
}

impl NimbleClient {
    /// Builds a client from `config`. No network call is made.
    ///
    /// Tokens go to `config.token_storage_path` when set, otherwise they
    /// are kept in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let storage: Arc<dyn SecureStorage> = match &config.token_storage_path {
            Some(path) => Arc::new(FileSecureStorage::new(path.clone())),
            None => Arc::new(MemorySecureStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Builds a client that keeps its token in `storage`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_config`].
    pub fn with_storage(
        config: &ClientConfig,
        storage: Arc<dyn SecureStorage>,
    ) -> Result<Self, ClientError> {
        let config = config.clone().normalized()?;
        let transport = Arc::new(ReqwestTransport::with_options(
            &config.user_agent,
            config.request_timeout(),
        )?);

        let service = RemoteAuthService::new(
            Arc::clone(&transport),
            &config.base_url,
            config.client_id.as_str(),
            config.client_secret.as_str(),
        );
        let auth = Arc::new(AuthServiceWithStore::new(
            service,
            SecureTokenStore::new(storage),
        ));
        let loader = Arc::new(RemoteSurveyLoader::new(transport, &config.base_url));
        let surveys = SurveyLoaderWithAuth::new(loader, Arc::clone(&auth), SystemClock::new());

        info!(base_url = %config.base_url, "Survey client ready");
        Ok(Self { auth, surveys })
    }

    /// Auth operations backed by the token store.
    #[must_use]
    pub fn auth(&self) -> &Gateway {
        &self.auth
    }

    /// Survey operations that supply the stored token.
    #[must_use]
    pub const fn surveys(&self) -> &AuthenticatedSurveys {
        &self.surveys
    }
}

impl fmt::Debug for NimbleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NimbleClient").finish_non_exhaustive()
    }
}
