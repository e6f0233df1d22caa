use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::{fs, sync::Mutex};
use tracing::{error, warn};

use crate::domain::{common::entities::app_errors::CoreError, storage::ports::KeyValueStore};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object on disk.
///
/// Writes go to a sibling temp file which is then renamed over the original.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, CoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                error!(path = %self.path.display(), "Failed to read store: {}", e);
                return Err(CoreError::StorageError(e.to_string()));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Store file is corrupted, starting empty");
                Ok(Entries::new())
            }
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                error!(path = %parent.display(), "Failed to create store directory: {}", e);
                CoreError::StorageError(e.to_string())
            })?;
        }

        let serialized =
            serde_json::to_vec(entries).map_err(|e| CoreError::StorageError(e.to_string()))?;
        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, serialized).await.map_err(|e| {
            error!(path = %tmp_path.display(), "Failed to write store: {}", e);
            CoreError::StorageError(e.to_string())
        })?;
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            error!(path = %self.path.display(), "Failed to replace store: {}", e);
            CoreError::StorageError(e.to_string())
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}
