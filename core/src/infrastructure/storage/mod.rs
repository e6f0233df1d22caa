pub mod backend;
pub mod file_store;
pub mod memory_store;

pub use backend::StoreBackend;
pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;
