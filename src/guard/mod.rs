pub mod guard;

// Re-export the primary guard items so code outside can do
// "use crate::guard::{RouteGuard, GuardOutcome};"
pub use guard::{GuardOutcome, RouteGuard, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
