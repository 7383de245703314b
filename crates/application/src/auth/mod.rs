//! Authentication module.
//!
//! This module provides:
//! - The gateway that keeps the token store in step with the auth service
//! - In-memory token storage

mod gateway;
mod token_store;

pub use gateway::AuthServiceWithStore;
pub use token_store::InMemoryTokenStore;
