//! External collaborator module
//! 
//! Reverse geocoding for the clock widget and desktop notifications for
//! timer completion. Failures here degrade to fallbacks and never reach the
//! timer engine.

pub mod geocoding;
pub mod notifier;

// Re-export main types
pub use geocoding::{Coordinates, LocationResolver};
pub use notifier::{check_notify_send_available, send_time_up_notification};
