use crate::domain::{
    common::{StorageConfig, entities::app_errors::CoreError},
    storage::ports::KeyValueStore,
};
use crate::infrastructure::storage::{FileKeyValueStore, InMemoryKeyValueStore};

/// The store selected at startup.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    File(FileKeyValueStore),
    Memory(InMemoryKeyValueStore),
}

impl From<&StorageConfig> for StoreBackend {
    fn from(config: &StorageConfig) -> Self {
        match &config.path {
            Some(path) => StoreBackend::File(FileKeyValueStore::new(path)),
            None => StoreBackend::Memory(InMemoryKeyValueStore::new()),
        }
    }
}

impl KeyValueStore for StoreBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self {
            StoreBackend::File(store) => store.get(key).await,
            StoreBackend::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), CoreError> {
        match self {
            StoreBackend::File(store) => store.set(key, value).await,
            StoreBackend::Memory(store) => store.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        match self {
            StoreBackend::File(store) => store.remove(key).await,
            StoreBackend::Memory(store) => store.remove(key).await,
        }
    }
}
