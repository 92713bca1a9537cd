//! Focus Flow - A local productivity dashboard
//! 
//! This library provides a Pomodoro timer engine with a shared session state
//! for passive views, plus task list, calendar, clock and focus music widgets.

pub mod config;
pub mod error;
pub mod state;
pub mod store;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{DashboardError, DashboardResult};
pub use state::AppState;
pub use store::DashboardStore;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
