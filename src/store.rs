//! Durable key-value storage
//!
//! One JSON file per key under the user state directory. This is the
//! local-storage layer the session snapshot persists through; nothing in
//! it has a TTL, entries live until explicitly removed.

use crate::error::{FindashError, FindashResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

/// File-backed JSON key-value store
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    dir: PathBuf,
}

impl KeyValueStore {
    /// Open a store rooted at the default state directory
    pub async fn open_default() -> FindashResult<Self> {
        Self::open(Self::default_dir()).await
    }

    /// Open a store rooted at a specific directory, creating it if needed
    pub async fn open(dir: impl Into<PathBuf>) -> FindashResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| FindashError::storage("creating state directory", e))?;

        // Session tokens live here
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(&dir, perms)
                .map_err(|e| FindashError::storage("setting state dir permissions", e))?;
        }

        Ok(Self { dir })
    }

    /// Default state directory path
    pub fn default_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("findash")
    }

    /// Persist a value under `key`, overwriting any prior value.
    ///
    /// Writes to a temporary sibling and renames it into place, so an
    /// interrupted write never leaves a truncated entry behind.
    /// Serialization or write failures surface as errors, never silently.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> FindashResult<()> {
        let path = self.entry_path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        let content = serde_json::to_string_pretty(value)?;

        fs::write(&tmp, content)
            .await
            .map_err(|e| FindashError::storage(format!("writing {}", tmp.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&tmp, perms)
                .map_err(|e| FindashError::storage("setting entry permissions", e))?;
        }

        // Rename within the same directory is atomic
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| FindashError::storage(format!("replacing {}", path.display()), e))?;

        debug!("Stored key {}", key);
        Ok(())
    }

    /// Read a value, returning `None` when missing or corrupt.
    ///
    /// A corrupt entry is logged and treated as absent rather than fatal:
    /// the caller sees the same thing as a missing key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> FindashResult<Option<T>> {
        let path = self.entry_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| FindashError::storage(format!("reading {}", path.display()), e))?;

        match serde_json::from_str(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Corrupt entry for key {} ({}), treating as absent", key, e);
                Ok(None)
            }
        }
    }

    /// Remove a key. Idempotent: removing an absent key is a no-op.
    pub async fn remove(&self, key: &str) -> FindashResult<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| FindashError::storage(format!("removing {}", path.display()), e))?;
            debug!("Removed key {}", key);
        }
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}
