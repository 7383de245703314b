//! Nimble Application - Use cases and ports
//!
//! This crate contains the application logic of the Nimble Survey client:
//!
//! - **Ports**: traits implemented by infrastructure adapters
//! - **Auth gateway**: keeps the token store in step with the auth service
//! - **Authenticated loading**: token freshness check, refresh, then retry

pub mod auth;
pub mod error;
pub mod ports;
pub mod survey;

pub use auth::{AuthServiceWithStore, InMemoryTokenStore};
pub use error::{AuthError, LoadError};
pub use ports::{
    AuthService, Clock, SecureStorage, StorageError, SurveyLoader, TokenProvider, TokenStore,
    Transport, TransportError,
};
pub use survey::SurveyLoaderWithAuth;
