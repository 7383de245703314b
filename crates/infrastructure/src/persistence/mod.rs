//! Token persistence.
//!
//! Tokens are kept in a [`SecureStorage`] under a single well-known key.
//!
//! [`SecureStorage`]: nimble_application::ports::SecureStorage

mod file_storage;
mod memory_storage;
mod secure_token_store;

pub use file_storage::{FileSecureStorage, SCHEMA_VERSION};
pub use memory_storage::MemorySecureStorage;
pub use secure_token_store::{SecureTokenStore, TOKEN_KEY};
