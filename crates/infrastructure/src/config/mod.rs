//! Client configuration.
//!
//! Stored as JSON in the platform-specific config directory:
//! - Linux: ~/.config/nimble/config.json
//! - macOS: ~/Library/Application Support/nimble/config.json
//! - Windows: %APPDATA%/nimble/config.json

mod client_config;
mod repository;

pub use client_config::{ClientConfig, ConfigError, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use repository::ConfigRepository;
