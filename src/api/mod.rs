//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;
pub mod widget_handlers;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;
use widget_handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Timer panel
        .route("/timer", get(timer_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/mode", post(mode_handler))
        .route("/timer/custom", post(custom_handler))
        .route("/timer/dismiss", post(dismiss_handler))
        .route("/timer/restart", post(restart_handler))
        .route("/timer/break", post(break_handler))
        // Passive views
        .route("/session", get(session_handler))
        .route("/session/events", get(session_events_handler))
        .route("/clock", get(clock_handler))
        // Widgets
        .route("/tasks", get(list_tasks_handler).post(add_task_handler))
        .route("/tasks/:id", delete(delete_task_handler))
        .route("/tasks/:id/toggle", post(toggle_task_handler))
        .route("/calendar", get(calendar_handler))
        .route("/calendar/select", post(select_date_handler))
        .route("/calendar/next", post(next_month_handler))
        .route("/calendar/prev", post(prev_month_handler))
        .route("/music", get(music_handler))
        .route("/music/volume", post(volume_handler))
        .route("/music/:action", post(music_action_handler))
        .route("/preferences", get(preferences_handler))
        .route("/preferences/theme", post(theme_handler))
        .route("/preferences/animation", post(animation_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
