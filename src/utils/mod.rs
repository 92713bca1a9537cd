//! Utility functions module
//! 
//! Signal handling and display formatting shared across the dashboard.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_countdown, format_end_time};
pub use signals::shutdown_signal;
