use std::sync::Arc;

use tracing::info;

use super::file_backend::FileBackend;
use super::memory_backend::MemoryBackend;
use crate::config::StorageConfig;

/// The StorageBackend trait abstracts client-local persistence: get, set and
/// remove a string value by key. Services above it (project selector,
/// pending-invite store) swallow errors and degrade to absent-value semantics,
/// so backends report failures as plain strings rather than panicking.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str) -> Result<(), String>;
    fn is_persistent(&self) -> bool {
        // Real backends survive a restart; the memory backend returns false
        // so we can write better debug messages.
        true
    }
}

/// Creates a concrete storage backend based on the StorageConfig.
pub fn create_backend(config: &StorageConfig) -> Arc<dyn StorageBackend> {
    match config {
        StorageConfig::File(file_config) => {
            info!("Using file storage backend at '{}'.", file_config.path);
            Arc::new(FileBackend::new(file_config))
        }
        StorageConfig::Memory => {
            info!("Using in-memory storage backend.");
            Arc::new(MemoryBackend::new())
        }
    }
}
