//! Auth client for the survey backend's `OAuth` and account endpoints.
//!
//! Every call is a JSON `POST`; token responses arrive in a JSON:API
//! envelope with the token under `data.attributes`.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use nimble_application::ports::{AuthService, Transport};
use nimble_application::AuthError;
use nimble_domain::{AuthToken, TransportRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TOKEN_PATH: &str = "/api/v1/oauth/token";
const REVOKE_PATH: &str = "/api/v1/oauth/revoke";
const REGISTRATIONS_PATH: &str = "/api/v1/registrations";
const PASSWORDS_PATH: &str = "/api/v1/passwords";

#[derive(Debug, Serialize)]
struct ClientCredentials<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    grant_type: &'static str,
    email: &'a str,
    password: &'a str,
    #[serde(flatten)]
    client: ClientCredentials<'a>,
}

#[derive(Debug, Serialize)]
struct RefreshTokenGrant<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
    #[serde(flatten)]
    client: ClientCredentials<'a>,
}

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    email: &'a str,
    password: &'a str,
    password_confirmation: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordResetUser<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct UserRequest<'a, U> {
    user: U,
    #[serde(flatten)]
    client: ClientCredentials<'a>,
}

#[derive(Debug, Serialize)]
struct RevokeRequest<'a> {
    token: &'a str,
    #[serde(flatten)]
    client: ClientCredentials<'a>,
}

/// `data.id` of a token resource; the backend has sent both forms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResource {
    id: ResourceId,
    #[serde(rename = "type")]
    kind: String,
    attributes: AuthToken,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    data: TokenResource,
}

#[derive(Debug, Deserialize)]
struct MessageMeta {
    message: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    meta: MessageMeta,
}

/// [`AuthService`] that talks to the survey backend over a [`Transport`].
pub struct RemoteAuthService<T> {
    transport: Arc<T>,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl<T: Transport> RemoteAuthService<T> {
    /// Create a new auth client.
    ///
    /// A trailing `/` on `base_url` is ignored.
    #[must_use]
    pub fn new(
        transport: Arc<T>,
        base_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    fn credentials(&self) -> ClientCredentials<'_> {
        ClientCredentials {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        }
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Vec<u8>, AuthError> {
        let payload =
            serde_json::to_vec(body).map_err(|e| AuthError::InvalidData(e.to_string()))?;
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "Posting auth request");
        Ok(self
            .transport
            .send(TransportRequest::post_json(url, payload))
            .await?)
    }

    fn decode<R: DeserializeOwned>(bytes: &[u8]) -> Result<R, AuthError> {
        serde_json::from_slice(bytes).map_err(|e| AuthError::InvalidData(e.to_string()))
    }

    fn decode_token(bytes: &[u8]) -> Result<AuthToken, AuthError> {
        let response: TokenResponse = Self::decode(bytes)?;
        debug!(
            id = %response.data.id,
            kind = %response.data.kind,
            access_token = %AuthToken::preview(&response.data.attributes.access_token),
            "Decoded token"
        );
        Ok(response.data.attributes)
    }
}

impl<T> fmt::Debug for RemoteAuthService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteAuthService")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Transport> AuthService for RemoteAuthService<T> {
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        let grant = PasswordGrant {
            grant_type: "password",
            email,
            password,
            client: self.credentials(),
        };
        let body = self.post(TOKEN_PATH, &grant).await?;
        Self::decode_token(&body)
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<(), AuthError> {
        let request = UserRequest {
            user: NewUser {
                email,
                password,
                password_confirmation,
            },
            client: self.credentials(),
        };
        self.post(REGISTRATIONS_PATH, &request).await.map(|_| ())
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let request = RevokeRequest {
            token,
            client: self.credentials(),
        };
        self.post(REVOKE_PATH, &request).await.map(|_| ())
    }

    async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        let request = UserRequest {
            user: PasswordResetUser { email },
            client: self.credentials(),
        };
        let body = self.post(PASSWORDS_PATH, &request).await?;
        let response: MessageResponse = Self::decode(&body)?;
        Ok(response.meta.message)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthToken, AuthError> {
        let grant = RefreshTokenGrant {
            grant_type: "refresh_token",
            refresh_token,
            client: self.credentials(),
        };
        let body = self.post(TOKEN_PATH, &grant).await?;
        Self::decode_token(&body)
    }
}
