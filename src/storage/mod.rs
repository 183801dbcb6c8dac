pub mod backend;
pub mod file_backend;
pub mod memory_backend;

// Re-export the primary storage items so code outside can do
// "use crate::storage::{StorageBackend, create_backend};"
pub use backend::{create_backend, StorageBackend};
