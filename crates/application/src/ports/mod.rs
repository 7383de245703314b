//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod auth_service;
mod clock;
mod secure_storage;
mod survey_loader;
mod token_provider;
mod token_store;
mod transport;

pub use auth_service::AuthService;
pub use clock::Clock;
pub use secure_storage::{SecureStorage, StorageError};
pub use survey_loader::SurveyLoader;
pub use token_provider::TokenProvider;
pub use token_store::TokenStore;
pub use transport::{Transport, TransportError};
