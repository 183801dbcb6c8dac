use std::sync::Arc;

use dashgate::config::{ApiConfig, ConfigV1, GuardConfig, LoggingConfig, SessionConfig, StorageConfig};
use dashgate::startup::build_state;
use dashgate::state::AppState;

pub fn test_config(base_url: &str) -> ConfigV1 {
    ConfigV1 {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_in_ms: 2000,
        },
        session: SessionConfig::default(),
        guard: GuardConfig::default(),
        storage: StorageConfig::Memory,
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "console".to_string(),
        },
    }
}

pub fn build_test_state(base_url: &str) -> AppState {
    build_state(Arc::new(test_config(base_url)))
}
