//! State management module
//! 
//! The timer engine and its shared session state, plus the independent
//! dashboard widgets (tasks, calendar, music, preferences).

pub mod app_state;
pub mod calendar_state;
pub mod clock_view;
pub mod music_state;
pub mod preferences;
pub mod session_state;
pub mod task_list;
pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, CompletionEvent, TimerPanel};
pub use calendar_state::{CalendarState, CalendarView};
pub use clock_view::ClockView;
pub use music_state::{MusicPlayer, MusicState};
pub use preferences::{AnimationStyle, Preferences, Theme};
pub use session_state::{SessionBroadcaster, SessionState, TimerUpdate};
pub use task_list::{CategoryFilter, StatusFilter, Task, TaskCategory, TaskList, TaskPriority, TaskStats};
pub use timer_engine::{CompletionCallback, TickDisposition, TimerEngine};
pub use timer_state::{
    Countdown, TickOutcome, TimerDurations, TimerMode, TimerSnapshot, MAX_DURATION_MINUTES,
};
