//! The process-wide "selected project" register.
//!
//! A single scalar persisted in client-local storage, scoped to the machine
//! rather than the session. The request gateway reads it on every outbound
//! call to attach the project-scope header.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::StorageBackend;

/// Storage key for the selected project identifier.
pub const SELECTED_PROJECT_KEY: &str = "tg_project_id";

/// Single source of truth for "which project is active".
///
/// No validation is done here that the identifier refers to a project the
/// user can access; the backend rejects an invalid scope on the first scoped
/// call. Persistence failures degrade to "absent" rather than propagating.
#[derive(Clone)]
pub struct ProjectSelector {
    backend: Arc<dyn StorageBackend>,
}

impl ProjectSelector {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        ProjectSelector { backend }
    }

    /// Returns the selected project identifier, or None when no project has
    /// been chosen yet (or storage is unavailable).
    pub fn get(&self) -> Option<String> {
        match self.backend.get(SELECTED_PROJECT_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read selected project from storage: {}", e);
                None
            }
        }
    }

    /// Persists the selected project identifier immediately. Last writer wins.
    pub fn set(&self, project_id: &str) {
        debug!("Selecting project '{}'", project_id);
        if let Err(e) = self.backend.set(SELECTED_PROJECT_KEY, project_id) {
            warn!("Failed to persist selected project: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_backend::MemoryBackend;

    /// A backend whose every operation fails, to exercise degraded paths.
    struct FailingBackend;

    impl StorageBackend for FailingBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, String> {
            Err("storage unavailable".to_string())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), String> {
            Err("storage unavailable".to_string())
        }
        fn remove(&self, _key: &str) -> Result<(), String> {
            Err("storage unavailable".to_string())
        }
    }

    /// Test that set followed by get returns the identifier.
    #[test]
    fn test_set_then_get() {
        let selector = ProjectSelector::new(Arc::new(MemoryBackend::new()));
        assert_eq!(selector.get(), None);
        selector.set("proj-1");
        assert_eq!(selector.get(), Some("proj-1".to_string()));
    }

    /// Test that a later set overwrites the previous selection.
    #[test]
    fn test_last_writer_wins() {
        let selector = ProjectSelector::new(Arc::new(MemoryBackend::new()));
        selector.set("proj-1");
        selector.set("proj-2");
        assert_eq!(selector.get(), Some("proj-2".to_string()));
    }

    /// Test that storage failures degrade to "absent" without panicking.
    #[test]
    fn test_storage_failure_degrades_to_absent() {
        let selector = ProjectSelector::new(Arc::new(FailingBackend));
        selector.set("proj-1");
        assert_eq!(selector.get(), None);
    }
}
