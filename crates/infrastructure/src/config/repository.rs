//! Config file persistence.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::{ClientConfig, ConfigError};
use crate::serialization::{from_file_bytes, to_file_bytes};

/// Reads and writes a [`ClientConfig`] file.
#[derive(Debug, Clone)]
pub struct ConfigRepository {
    path: PathBuf,
}

impl ConfigRepository {
    /// Repository for the config file at `path`.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository for `<config dir>/nimble/config.json`.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigDir` if the platform has no config directory.
    pub fn default_location() -> Result<Self, ConfigError> {
        Self::config_dir()
            .map(|dir| Self::at(dir.join("config.json")))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the path to the Nimble config directory.
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nimble"))
    }

    /// Path of the config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads, validates and normalizes the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed or invalid.
    pub async fn load(&self) -> Result<ClientConfig, ConfigError> {
        let content = fs::read(&self.path).await?;
        let config: ClientConfig = from_file_bytes(&content)?;
        debug!(path = %self.path.display(), base_url = %config.base_url, "Loaded config");
        config.normalized()
    }

    /// Validates and writes the config, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or cannot be written.
    pub async fn save(&self, config: &ClientConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = to_file_bytes(config)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}
