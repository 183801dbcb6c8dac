use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::file_backend::FileBackendConfig;

/// A wrapper for the client-local storage configuration.
/// The backend is selected via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    #[serde(rename = "file")]
    File(FileBackendConfig),
    #[serde(rename = "memory")]
    Memory,
    // Add more variants here as needed, like:
    // #[serde(rename = "awesome")]
    // AwesomeBackend(AwesomeBackendConfig),
}
