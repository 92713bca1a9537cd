//! HTTP endpoint handlers for the timer panel, session state and clock

use std::sync::Arc;
use axum::{
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, error, info};

use crate::{
    error::DashboardResult,
    state::{AppState, ClockView, SessionState, TimerPanel},
};
use super::responses::{
    CustomMinutesRequest, HealthResponse, ModeRequest, SessionEvent, StartRequest,
    StatusResponse,
};

/// Log a failed operation before it becomes an error response
fn logged<T>(operation: &str, result: DashboardResult<T>) -> DashboardResult<T> {
    if let Err(e) = &result {
        error!("{} failed: {}", operation, e);
    }
    result
}

/// Handle GET /timer
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<TimerPanel>> {
    logged("timer", state.get_timer_panel()).map(Json)
}

/// Handle POST /timer/start - Start the countdown, optionally with music
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StartRequest>>,
) -> DashboardResult<Json<TimerPanel>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let panel = logged("start", state.start_timer(request.with_music))?;
    info!("Start endpoint called - running={}", panel.timer.is_running);
    Ok(Json(panel))
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<TimerPanel>> {
    logged("pause", state.pause_timer()).map(Json)
}

/// Handle POST /timer/reset - Reset the countdown and close the music player
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<TimerPanel>> {
    logged("reset", state.reset_timer()).map(Json)
}

/// Handle POST /timer/mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> DashboardResult<Json<TimerPanel>> {
    logged("switch mode", state.switch_mode(request.mode)).map(Json)
}

/// Handle POST /timer/custom - Apply custom minutes and switch to custom mode
pub async fn custom_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomMinutesRequest>,
) -> DashboardResult<Json<TimerPanel>> {
    logged("custom minutes", state.apply_custom_minutes(request.minutes)).map(Json)
}

/// Handle POST /timer/dismiss - Close the time-up dialog
pub async fn dismiss_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<TimerPanel>> {
    logged("dismiss", state.dismiss_time_up()).map(Json)
}

/// Handle POST /timer/restart - Run the finished mode again
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<TimerPanel>> {
    logged("restart", state.restart_timer()).map(Json)
}

/// Handle POST /timer/break - Start a short break
pub async fn break_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<TimerPanel>> {
    logged("start break", state.start_break()).map(Json)
}

/// Handle GET /session - Shared session state
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    Json(state.get_session_state())
}

/// Handle GET /session/events - Push the session state on every transition
///
/// The current state is sent as soon as the stream opens, then one `session`
/// event per change pushed by the timer engine.
pub async fn session_events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let receiver = state.subscribe_session();
    info!("Session event subscriber connected");

    let events = stream::unfold((receiver, true), |(mut receiver, first)| async move {
        if !first && receiver.changed().await.is_err() {
            debug!("Session broadcaster dropped, closing event stream");
            return None;
        }
        let session = receiver.borrow_and_update().clone();
        let event = Event::default()
            .event("session")
            .json_data(SessionEvent::from(session));
        Some((event, (receiver, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /clock - Header clock
pub async fn clock_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<ClockView>> {
    logged("clock", state.get_clock()).map(Json)
}

/// Handle GET /status - Return the whole dashboard
pub async fn status_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<StatusResponse>> {
    let panel = logged("status", state.get_timer_panel())?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        panel,
        session: state.get_session_state(),
        clock: logged("status", state.get_clock())?,
        tasks: logged("status", state.task_stats())?,
        preferences: logged("status", state.get_preferences())?,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
