use std::collections::HashMap;
use std::sync::Mutex;

use super::backend::StorageBackend;

/// An in-memory storage backend. Nothing survives a restart; used in tests
/// and in contexts where persistence is unavailable.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| "Storage mutex poisoned".to_string())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| "Storage mutex poisoned".to_string())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| "Storage mutex poisoned".to_string())?;
        entries.remove(key);
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
