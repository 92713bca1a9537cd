//! Shared session state broadcast to passive views
//!
//! The timer engine pushes coarse transitions (started, stopped, mode changed)
//! into a [`SessionBroadcaster`]. Views such as the header clock read the
//! derived `end_time` from here and never compute it themselves.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::TimerMode;

/// Run state and wall-clock window of the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_running: bool,
    pub mode: TimerMode,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            is_running: false,
            mode: TimerMode::Focus,
            start_time: None,
            end_time: None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial snapshot pushed by the timer engine on a transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerUpdate {
    pub is_running: Option<bool>,
    pub mode: Option<TimerMode>,
    pub time_left: Option<u64>,
}

impl TimerUpdate {
    /// The countdown began running with `time_left` seconds remaining
    pub fn started(mode: TimerMode, time_left: u64) -> Self {
        Self {
            is_running: Some(true),
            mode: Some(mode),
            time_left: Some(time_left),
        }
    }

    /// The countdown stopped (paused, reset or completed)
    pub fn stopped() -> Self {
        Self {
            is_running: Some(false),
            ..Self::default()
        }
    }

    /// The mode changed; switching always leaves the countdown stopped
    pub fn mode_switched(mode: TimerMode) -> Self {
        Self {
            is_running: Some(false),
            mode: Some(mode),
            time_left: None,
        }
    }
}

/// Single mutation entry point for [`SessionState`], with watch-based fan-out
#[derive(Debug, Clone)]
pub struct SessionBroadcaster {
    tx: watch::Sender<SessionState>,
}

impl SessionBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::new());
        Self { tx }
    }

    /// Merge `update` into the shared state at the current wall-clock time
    pub fn update_timer_state(&self, update: TimerUpdate) -> SessionState {
        self.update_timer_state_at(update, Utc::now())
    }

    /// Merge `update` into the shared state, treating `now` as the current time.
    ///
    /// `start_time`/`end_time` are recomputed only on a false->true transition
    /// with a non-zero `time_left`, and cleared whenever `is_running` is pushed
    /// as false.
    pub fn update_timer_state_at(&self, update: TimerUpdate, now: DateTime<Utc>) -> SessionState {
        self.tx.send_modify(|state| {
            let was_running = state.is_running;

            if let Some(is_running) = update.is_running {
                state.is_running = is_running;
            }
            if let Some(mode) = update.mode {
                state.mode = mode;
            }

            match (update.is_running, update.time_left) {
                (Some(true), Some(time_left)) if !was_running && time_left > 0 => {
                    let end_time = i64::try_from(time_left)
                        .ok()
                        .and_then(TimeDelta::try_seconds)
                        .and_then(|remaining| now.checked_add_signed(remaining));
                    if end_time.is_none() {
                        warn!("Session end time out of range for {}s remaining", time_left);
                    }
                    state.start_time = end_time.map(|_| now);
                    state.end_time = end_time;
                }
                (Some(false), _) => {
                    state.start_time = None;
                    state.end_time = None;
                }
                _ => {}
            }
        });

        let current = self.current();
        debug!(
            "Session state updated: running={}, mode={}, ends={:?}",
            current.is_running, current.mode, current.end_time
        );
        current
    }

    /// Latest pushed state
    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Receiver that is notified on every pushed transition
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}

impl Default for SessionBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
