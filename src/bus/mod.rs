pub mod bus;

// Re-export the primary bus items so code outside can do
// "use crate::bus::{NotificationBus, NotificationEvent};"
pub use bus::{DialogAction, DialogRequest, NotificationBus, NotificationEvent, Subscription};
