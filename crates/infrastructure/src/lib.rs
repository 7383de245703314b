//! Nimble Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus [`NimbleClient`], which
//! wires them together from a [`ClientConfig`].

pub mod adapters;
pub mod auth;
pub mod client;
pub mod config;
pub mod persistence;
pub mod serialization;
pub mod survey;

pub use adapters::{ReqwestTransport, SystemClock};
pub use auth::RemoteAuthService;
pub use client::{AuthenticatedSurveys, ClientError, Gateway, NimbleClient};
pub use config::{ClientConfig, ConfigError, ConfigRepository};
pub use persistence::{FileSecureStorage, MemorySecureStorage, SecureTokenStore, TOKEN_KEY};
pub use serialization::{SerializationError, from_file_bytes, to_file_bytes};
pub use survey::RemoteSurveyLoader;
