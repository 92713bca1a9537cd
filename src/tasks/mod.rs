//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod completion_notifier;
pub mod countdown_ticker;
pub mod location_lookup;

// Re-export main functions
pub use completion_notifier::completion_notifier_task;
pub use countdown_ticker::countdown_ticker_task;
pub use location_lookup::location_lookup_task;
