use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::backend::StorageBackend;

/// The config needed for the file storage backend.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileBackendConfig {
    pub path: String,
}

/// A storage backend that keeps a flat string map in a JSON file, the local
/// analogue of browser storage. Reads are served from memory; every write is
/// flushed back to disk immediately.
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileBackend {
    pub fn new(config: &FileBackendConfig) -> Self {
        let path = PathBuf::from(&config.path);
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Storage file '{}' is not valid JSON ({}); starting empty.",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(_) => {
                debug!(
                    "Storage file '{}' not found; starting empty.",
                    path.display()
                );
                HashMap::new()
            }
        };
        FileBackend {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create storage directory: {}", e))?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| format!("Failed to serialize storage map: {}", e))?;
        fs::write(&self.path, raw).map_err(|e| format!("Failed to write storage file: {}", e))
    }
}

impl StorageBackend for FileBackend {
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
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&entries) {
            // Roll back so reads reflect what is actually on disk.
            match previous {
                Some(prev) => entries.insert(key.to_string(), prev),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| "Storage mutex poisoned".to_string())?;
        // Removing an absent key is a no-op, not an error.
        let previous = entries.remove(key);
        if let Err(e) = self.flush(&entries) {
            if let Some(prev) = previous {
                entries.insert(key.to_string(), prev);
            }
            return Err(e);
        }
        Ok(())
    }
}
