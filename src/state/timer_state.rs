//! Countdown state machine for the Pomodoro timer

use serde::{Deserialize, Serialize};

use crate::{
    error::{DashboardError, DashboardResult},
    utils::format::format_countdown,
};

/// Countdown mode, each with its own full duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
    Custom,
}

impl TimerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::ShortBreak => "shortBreak",
            TimerMode::LongBreak => "longBreak",
            TimerMode::Custom => "custom",
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Focus
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Longest duration, in minutes, any mode may be configured with (one day)
pub const MAX_DURATION_MINUTES: u64 = 24 * 60;

/// Full durations, in seconds, of the preset modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    pub focus: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl TimerDurations {
    /// Convert minutes to seconds, capping each at [`MAX_DURATION_MINUTES`]
    pub fn from_minutes(focus: u64, short_break: u64, long_break: u64) -> Self {
        let seconds = |minutes: u64| minutes.min(MAX_DURATION_MINUTES) * 60;
        Self {
            focus: seconds(focus),
            short_break: seconds(short_break),
            long_break: seconds(long_break),
        }
    }
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15)
    }
}

/// Point-in-time copy of the countdown, as served to views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub time_left: u64,
    pub is_running: bool,
    pub custom_duration_seconds: u64,
    pub total_seconds: u64,
    pub display: String,
    pub progress_percent: f64,
}

/// Result of applying a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Idle,
    /// Decremented, seconds remaining
    Ticked(u64),
    /// Reached zero and stopped
    Completed,
}

/// Single-counter countdown with four modes.
///
/// This type is pure state: it never schedules anything. The engine owns the
/// tick source and calls [`Countdown::tick`] once per elapsed second.
#[derive(Debug, Clone)]
pub struct Countdown {
    durations: TimerDurations,
    mode: TimerMode,
    time_left: u64,
    is_running: bool,
    custom_duration_seconds: u64,
}

impl Countdown {
    /// Create an idle countdown in Focus mode with the full focus duration
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            mode: TimerMode::Focus,
            time_left: durations.focus,
            is_running: false,
            custom_duration_seconds: durations.focus,
        }
    }

    /// Full duration of `mode`, in seconds
    pub fn duration_for(&self, mode: TimerMode) -> u64 {
        match mode {
            TimerMode::Focus => self.durations.focus,
            TimerMode::ShortBreak => self.durations.short_break,
            TimerMode::LongBreak => self.durations.long_break,
            TimerMode::Custom => self.custom_duration_seconds,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn custom_duration_seconds(&self) -> u64 {
        self.custom_duration_seconds
    }

    /// Enter the running state. Returns false when already running or at zero.
    pub fn start(&mut self) -> bool {
        if self.is_running || self.time_left == 0 {
            return false;
        }
        self.is_running = true;
        true
    }

    /// Leave the running state. Returns whether the countdown was running.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.is_running, false)
    }

    /// Stop and reseed with the current mode's full duration
    pub fn reset(&mut self) {
        self.is_running = false;
        self.time_left = self.duration_for(self.mode);
    }

    /// Stop, change mode and reseed
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.is_running = false;
        self.mode = mode;
        self.time_left = self.duration_for(mode);
    }

    /// Store a new custom duration; reseeds immediately when in Custom mode
    pub fn set_custom_duration(&mut self, minutes: u64) -> DashboardResult<()> {
        if minutes == 0 {
            return Err(DashboardError::InvalidInput(
                "custom duration must be at least one minute".to_string(),
            ));
        }
        if minutes > MAX_DURATION_MINUTES {
            return Err(DashboardError::InvalidInput(format!(
                "custom duration of {} minutes exceeds the {} minute limit",
                minutes, MAX_DURATION_MINUTES
            )));
        }
        let seconds = minutes * 60;

        self.custom_duration_seconds = seconds;
        if self.mode == TimerMode::Custom {
            self.time_left = seconds;
        }
        Ok(())
    }

    /// Apply one elapsed second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.is_running = false;
            return TickOutcome::Completed;
        }
        self.time_left -= 1;
        TickOutcome::Ticked(self.time_left)
    }

    /// Elapsed share of the current mode's duration, 0-100
    pub fn progress_percent(&self) -> f64 {
        let total = self.duration_for(self.mode);
        if total == 0 {
            return 0.0;
        }
        (total.saturating_sub(self.time_left)) as f64 / total as f64 * 100.0
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            time_left: self.time_left,
            is_running: self.is_running,
            custom_duration_seconds: self.custom_duration_seconds,
            total_seconds: self.duration_for(self.mode),
            display: format_countdown(self.time_left),
            progress_percent: self.progress_percent(),
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(TimerDurations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_in_focus_with_full_duration() {
        let countdown = Countdown::default();
        assert_eq!(countdown.mode(), TimerMode::Focus);
        assert_eq!(countdown.time_left(), 1500);
        assert!(!countdown.is_running());
    }

    #[test]
    fn switch_mode_then_reset_reseeds_presets() {
        let mut countdown = Countdown::default();
        for (mode, expected) in [
            (TimerMode::Focus, 1500),
            (TimerMode::ShortBreak, 300),
            (TimerMode::LongBreak, 900),
        ] {
            countdown.start();
            countdown.switch_mode(mode);
            countdown.reset();
            assert_eq!(countdown.time_left(), expected);
            assert!(!countdown.is_running());
        }
    }

    #[test]
    fn custom_duration_applies_once_in_custom_mode() {
        let mut countdown = Countdown::default();
        countdown.set_custom_duration(40).unwrap();
        assert_eq!(countdown.time_left(), 1500, "other modes are unaffected");

        countdown.switch_mode(TimerMode::Custom);
        countdown.reset();
        assert_eq!(countdown.time_left(), 40 * 60);

        countdown.set_custom_duration(10).unwrap();
        assert_eq!(countdown.time_left(), 600, "custom mode reseeds immediately");
    }

    #[test]
    fn rejects_zero_custom_minutes() {
        let mut countdown = Countdown::default();
        let err = countdown.set_custom_duration(0).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert_eq!(countdown.custom_duration_seconds(), 1500);
    }

    #[test]
    fn rejects_custom_minutes_above_limit() {
        let mut countdown = Countdown::default();
        countdown.switch_mode(TimerMode::Custom);

        let err = countdown.set_custom_duration(1_000_000_000_000).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert_eq!(countdown.time_left(), 1500);

        countdown.set_custom_duration(MAX_DURATION_MINUTES).unwrap();
        assert_eq!(countdown.time_left(), MAX_DURATION_MINUTES * 60);
    }

    #[test]
    fn durations_from_minutes_are_capped() {
        let durations = TimerDurations::from_minutes(u64::MAX, 5, 15);
        assert_eq!(durations.focus, MAX_DURATION_MINUTES * 60);
        assert_eq!(durations.short_break, 300);
        assert_eq!(durations.long_break, 900);
    }

    #[test]
    fn start_at_zero_is_ignored() {
        let mut countdown = Countdown::new(TimerDurations { focus: 1, short_break: 1, long_break: 1 });
        assert!(countdown.start());
        assert_eq!(countdown.tick(), TickOutcome::Completed);
        assert_eq!(countdown.time_left(), 0);
        assert!(!countdown.start());
        assert!(!countdown.is_running());
    }

    #[test]
    fn full_focus_countdown_completes_once() {
        let mut countdown = Countdown::default();
        countdown.start();

        let mut completions = 0;
        for _ in 0..1500 {
            if countdown.tick() == TickOutcome::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(countdown.time_left(), 0);
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), TickOutcome::Idle);
    }

    #[test]
    fn ticks_do_nothing_while_paused() {
        let mut countdown = Countdown::default();
        countdown.start();
        countdown.tick();
        assert!(countdown.pause());
        assert!(!countdown.pause());
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.time_left(), 1499);
    }

    #[test]
    fn snapshot_reports_progress_and_display() {
        let mut countdown = Countdown::default();
        countdown.switch_mode(TimerMode::ShortBreak);
        countdown.start();
        for _ in 0..150 {
            countdown.tick();
        }
        let snapshot = countdown.snapshot();
        assert_eq!(snapshot.display, "02:30");
        assert_eq!(snapshot.total_seconds, 300);
        assert!((snapshot.progress_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mode_serializes_in_camel_case() {
        let json = serde_json::to_string(&TimerMode::ShortBreak).unwrap();
        assert_eq!(json, "\"shortBreak\"");
        let mode: TimerMode = serde_json::from_str("\"longBreak\"").unwrap();
        assert_eq!(mode, TimerMode::LongBreak);
    }
}
