//! API request and response structures

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{
        AnimationStyle, CategoryFilter, ClockView, Preferences, SessionState,
        StatusFilter, Task, TaskPriority, TaskStats, TimerMode, TimerPanel,
    },
    utils::format_end_time,
};

/// Body of POST /timer/start
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartRequest {
    pub with_music: bool,
}

/// Body of POST /timer/mode
#[derive(Debug, Clone, Deserialize)]
pub struct ModeRequest {
    pub mode: TimerMode,
}

/// Body of POST /timer/custom
#[derive(Debug, Clone, Deserialize)]
pub struct CustomMinutesRequest {
    pub minutes: u64,
}

/// Query of GET /tasks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskQuery {
    pub status: StatusFilter,
    pub category: CategoryFilter,
}

/// Body of POST /tasks
#[derive(Debug, Clone, Deserialize)]
pub struct NewTaskRequest {
    pub text: String,
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub priority: TaskPriority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
}

/// Body of POST /calendar/select
#[derive(Debug, Clone, Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}

/// Body of POST /music/volume
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeRequest {
    pub volume: u8,
}

/// Body of POST /preferences/animation
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationRequest {
    pub style: AnimationStyle,
}

/// Payload of each `session` event on GET /session/events
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    #[serde(flatten)]
    pub session: SessionState,
    /// "Session ends at" text, `--` when no session is running
    pub session_ends_at: String,
}

impl From<SessionState> for SessionEvent {
    fn from(session: SessionState) -> Self {
        let session_ends_at = format_end_time(session.end_time);
        Self {
            session,
            session_ends_at,
        }
    }
}

/// Full dashboard status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub panel: TimerPanel,
    pub session: SessionState,
    pub clock: ClockView,
    pub tasks: TaskStats,
    pub preferences: Preferences,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
