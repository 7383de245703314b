//! File-backed secure storage.
//!
//! All entries live in one JSON file, base64-encoded:
//! ```json
//! {
//!   "schema_version": 1,
//!   "entries": {
//!     "NimbleAuthToken": "eyJhY2Nlc3NfdG9rZW4iOi..."
//!   }
//! }
//! ```
//! Writes go to a sibling `.tmp` file that is renamed over the original,
//! so a crash never leaves a truncated file behind. On Unix both files are
//! restricted to their owner.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use nimble_application::ports::{SecureStorage, StorageError};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::serialization::{from_file_bytes, to_file_bytes};

/// Current version of the storage file format.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StorageFile {
    schema_version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageFile {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl StorageFile {
    fn supported(self) -> Result<Self, StorageError> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(StorageError::Serialization(format!(
                "unsupported schema version {}",
                self.schema_version
            )));
        }
        Ok(self)
    }
}

/// [`SecureStorage`] persisted to a single JSON file.
///
/// Reading a file that does not parse is an error. Updating one replaces
/// it, so a damaged file never blocks later writes.
#[derive(Debug)]
pub struct FileSecureStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl FileSecureStorage {
    /// Create storage backed by the file at `path`. Nothing is touched
    /// until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(OsString::new, ToOwned::to_owned);
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_bytes(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn read_file(&self) -> Result<StorageFile, StorageError> {
        let Some(content) = self.read_bytes().await? else {
            return Ok(StorageFile::default());
        };
        from_file_bytes::<StorageFile>(&content)
            .map_err(|e| StorageError::Serialization(e.to_string()))?
            .supported()
    }

    /// Like [`Self::read_file`], but an unparseable file reads as empty.
    async fn read_for_update(&self) -> Result<StorageFile, StorageError> {
        let Some(content) = self.read_bytes().await? else {
            return Ok(StorageFile::default());
        };
        match from_file_bytes::<StorageFile>(&content) {
            Ok(file) => file.supported(),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Replacing unreadable secure storage file"
                );
                Ok(StorageFile::default())
            }
        }
    }

    async fn write_file(&self, file: &StorageFile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content =
            to_file_bytes(file).map_err(|e| StorageError::Serialization(e.to_string()))?;

        let temp_path = self.temp_path();
        if let Err(e) = write_owner_only(&temp_path, &content).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }
        fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), entries = file.entries.len(), "Wrote secure storage");
        Ok(())
    }
}

async fn write_owner_only(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    restrict_to_owner(path).await?;
    file.write_all(content).await?;
    file.sync_all().await
}

// Covers a leftover temp file created with a wider mode.
#[cfg(unix)]
async fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl SecureStorage for FileSecureStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let file = self.read_file().await?;
        file.entries
            .get(key)
            .map(|encoded| {
                STANDARD
                    .decode(encoded)
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .transpose()
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read_for_update().await?;
        file.schema_version = SCHEMA_VERSION;
        file.entries.insert(key.to_string(), STANDARD.encode(value));
        self.write_file(&file).await
    }

    async fn clear(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.read_for_update().await?;
        if file.entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_file(&file).await
    }
}
