pub mod envelope;
pub mod identity;

// Re-export the primary model items so code outside can do
// "use crate::models::{ApiEnvelope, Identity};"
pub use envelope::{ApiEnvelope, ApiErrorBody};
pub use identity::Identity;
