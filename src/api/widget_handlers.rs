//! HTTP endpoint handlers for the tasks, calendar, music and preferences widgets

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    error::{DashboardError, DashboardResult},
    state::{AppState, CalendarView, MusicPlayer, MusicState, Preferences, Task},
};
use super::responses::{
    AnimationRequest, NewTaskRequest, SelectDateRequest, TaskListResponse, TaskQuery,
    VolumeRequest,
};

/// Handle GET /tasks - List tasks matching the status and category filters
pub async fn list_tasks_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TaskQuery>,
) -> DashboardResult<Json<TaskListResponse>> {
    Ok(Json(TaskListResponse {
        tasks: state.list_tasks(query.status, query.category)?,
        stats: state.task_stats()?,
    }))
}

/// Handle POST /tasks - Add a task
pub async fn add_task_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewTaskRequest>,
) -> DashboardResult<(StatusCode, Json<Task>)> {
    let task = state
        .add_task(&request.text, request.category, request.priority)
        .inspect_err(|e| warn!("Failed to add task: {}", e))?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handle POST /tasks/:id/toggle
pub async fn toggle_task_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Task>> {
    state.toggle_task(&id).map(Json)
}

/// Handle DELETE /tasks/:id
pub async fn delete_task_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> DashboardResult<Json<Task>> {
    state.delete_task(&id).map(Json)
}

/// Handle GET /calendar
pub async fn calendar_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<CalendarView>> {
    state.get_calendar().map(Json)
}

/// Handle POST /calendar/select
pub async fn select_date_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectDateRequest>,
) -> DashboardResult<Json<CalendarView>> {
    state.select_date(request.date).map(Json)
}

/// Handle POST /calendar/next
pub async fn next_month_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<CalendarView>> {
    state.update_calendar(|calendar| calendar.next_month()).map(Json)
}

/// Handle POST /calendar/prev
pub async fn prev_month_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<CalendarView>> {
    state.update_calendar(|calendar| calendar.prev_month()).map(Json)
}

/// Handle GET /music
pub async fn music_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<MusicState>> {
    state.get_music().map(Json)
}

/// Handle POST /music/:action - Player controls
pub async fn music_action_handler(
    State(state): State<Arc<AppState>>,
    Path(action): Path<String>,
) -> DashboardResult<Json<MusicState>> {
    let control: fn(&mut MusicPlayer) = match action.as_str() {
        "show" => MusicPlayer::show,
        "close" => MusicPlayer::close,
        "toggle" => MusicPlayer::toggle_play,
        "stop" => MusicPlayer::stop,
        "next" => MusicPlayer::next_track,
        "prev" => MusicPlayer::prev_track,
        "minimize" => MusicPlayer::toggle_minimize,
        other => return Err(DashboardError::NotFound(format!("music action {}", other))),
    };

    let music = state.update_music(&format!("music-{}", action), |player| {
        control(player);
        Ok(())
    })?;
    info!("Music {}: playing={}, track={}", action, music.is_playing, music.track.title);
    Ok(Json(music))
}

/// Handle POST /music/volume
pub async fn volume_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VolumeRequest>,
) -> DashboardResult<Json<MusicState>> {
    state
        .update_music("music-volume", |player| player.set_volume(request.volume))
        .map(Json)
}

/// Handle GET /preferences
pub async fn preferences_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<Preferences>> {
    state.get_preferences().map(Json)
}

/// Handle POST /preferences/theme - Toggle light/dark
pub async fn theme_handler(State(state): State<Arc<AppState>>) -> DashboardResult<Json<Preferences>> {
    state.toggle_theme().map(Json)
}

/// Handle POST /preferences/animation
pub async fn animation_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnimationRequest>,
) -> DashboardResult<Json<Preferences>> {
    state.set_animation_style(request.style).map(Json)
}
