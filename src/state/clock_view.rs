//! Header clock: current time, location and the session end time

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{SessionState, TimerMode};
use crate::utils::format::{format_clock, format_end_time};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockView {
    pub current_time: String,
    pub location: String,
    pub session_running: bool,
    pub mode: TimerMode,
    /// `HH:MM` when a session is running, `--` otherwise
    pub session_ends_at: String,
}

impl ClockView {
    /// Render from the shared session state only; never from the engine
    pub fn render(session: &SessionState, location: &str, now: DateTime<Local>) -> Self {
        Self {
            current_time: format_clock(now),
            location: location.to_string(),
            session_running: session.is_running,
            mode: session.mode,
            session_ends_at: format_end_time(session.end_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn idle_session_shows_placeholder() {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 8, 30, 5).unwrap();
        let view = ClockView::render(&SessionState::new(), "Lisbon, Portugal", now);
        assert_eq!(view.current_time, "08:30:05");
        assert_eq!(view.session_ends_at, "--");
        assert!(!view.session_running);
        assert_eq!(view.location, "Lisbon, Portugal");
    }

    #[test]
    fn running_session_shows_local_end_time() {
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let session = SessionState {
            is_running: true,
            mode: TimerMode::Focus,
            start_time: Some(end - chrono::Duration::minutes(25)),
            end_time: Some(end),
        };
        let view = ClockView::render(&session, "", Local::now());
        assert_eq!(view.session_ends_at, end.with_timezone(&Local).format("%H:%M").to_string());
        assert!(view.session_running);
    }
}
