pub mod descriptor;
pub mod error;
pub mod gateway;

// Re-export the primary gateway items so code outside can do
// "use crate::gateway::{Gateway, GatewayError, RequestDescriptor};"
pub use descriptor::RequestDescriptor;
pub use error::GatewayError;
pub use gateway::{Gateway, PROJECT_SCOPE_HEADER, SESSION_EXPIRED_MESSAGE};
