//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{
    AnimationStyle, CalendarState, CalendarView, CategoryFilter, ClockView, MusicPlayer,
    MusicState, Preferences, SessionBroadcaster, SessionState, StatusFilter, Task, TaskList,
    TaskPriority, TaskStats, Theme, TimerDurations, TimerEngine, TimerMode, TimerSnapshot,
    MAX_DURATION_MINUTES,
};
use crate::{
    error::{DashboardError, DashboardResult},
    services::geocoding::LOCATION_PENDING,
    store::DashboardStore,
};

/// Emitted on the completion channel each time a countdown reaches zero
#[derive(Debug, Clone, Copy)]
pub struct CompletionEvent {
    pub mode: TimerMode,
    pub completed_at: DateTime<Utc>,
}

/// Everything the timer panel shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerPanel {
    pub timer: TimerSnapshot,
    pub time_up: bool,
    pub music: MusicState,
}

/// Main application state: the timer engine plus the independent widgets
#[derive(Debug)]
pub struct AppState {
    /// Countdown authority
    pub engine: TimerEngine,
    /// Shared run state read by passive views
    pub session: SessionBroadcaster,
    /// Set when a countdown completes, cleared by the time-up dialog
    pub time_up: Arc<Mutex<bool>>,
    pub tasks: Arc<Mutex<TaskList>>,
    pub calendar: Arc<Mutex<CalendarState>>,
    pub music: Arc<Mutex<MusicPlayer>>,
    pub preferences: Arc<Mutex<Preferences>>,
    pub location: Arc<Mutex<String>>,
    pub store: DashboardStore,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel for countdown completions
    pub completion_tx: broadcast::Sender<CompletionEvent>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &'static str) -> DashboardResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| DashboardError::LockPoisoned(name))
}

impl AppState {
    /// Create the application state, loading persisted widgets from `store`
    pub fn new(
        port: u16,
        host: String,
        durations: TimerDurations,
        store: DashboardStore,
    ) -> anyhow::Result<Self> {
        let (completion_tx, _) = broadcast::channel(16);
        let session = SessionBroadcaster::new();
        let engine = TimerEngine::new(durations, session.clone());

        let completion_sender = completion_tx.clone();
        engine.on_complete_with_mode(move |mode| {
            let event = CompletionEvent { mode, completed_at: Utc::now() };
            if let Err(e) = completion_sender.send(event) {
                debug!("No completion listeners: {}", e);
            }
        })?;

        let tasks = store.load_tasks()?;
        let preferences = store.load_preferences()?;
        info!("Loaded {} tasks from {}", tasks.len(), store.data_dir().display());

        Ok(Self {
            engine,
            session,
            time_up: Arc::new(Mutex::new(false)),
            tasks: Arc::new(Mutex::new(TaskList::from_tasks(tasks))),
            calendar: Arc::new(Mutex::new(CalendarState::default())),
            music: Arc::new(Mutex::new(MusicPlayer::new())),
            preferences: Arc::new(Mutex::new(preferences)),
            location: Arc::new(Mutex::new(LOCATION_PENDING.to_string())),
            store,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            completion_tx,
        })
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    // Timer panel

    pub fn get_timer_panel(&self) -> DashboardResult<TimerPanel> {
        Ok(TimerPanel {
            timer: self.engine.snapshot()?,
            time_up: *lock(&self.time_up, "time-up")?,
            music: lock(&self.music, "music")?.state(),
        })
    }

    /// Start the countdown, optionally bringing up the music player first
    pub fn start_timer(&self, with_music: bool) -> DashboardResult<TimerPanel> {
        if with_music {
            lock(&self.music, "music")?.show();
        }
        self.engine.start()?;
        self.record_action("start");
        self.get_timer_panel()
    }

    pub fn pause_timer(&self) -> DashboardResult<TimerPanel> {
        self.engine.pause()?;
        self.record_action("pause");
        self.get_timer_panel()
    }

    /// Reset the countdown; the music player closes with it
    pub fn reset_timer(&self) -> DashboardResult<TimerPanel> {
        self.engine.reset()?;
        lock(&self.music, "music")?.close();
        self.record_action("reset");
        self.get_timer_panel()
    }

    pub fn switch_mode(&self, mode: TimerMode) -> DashboardResult<TimerPanel> {
        self.engine.switch_mode(mode)?;
        self.record_action(&format!("mode:{}", mode));
        self.get_timer_panel()
    }

    /// Apply custom minutes from the panel: store them and switch to Custom
    pub fn apply_custom_minutes(&self, minutes: u64) -> DashboardResult<TimerPanel> {
        if minutes == 0 || minutes > MAX_DURATION_MINUTES {
            return Err(DashboardError::InvalidInput(format!(
                "custom minutes must be between 1 and {}",
                MAX_DURATION_MINUTES
            )));
        }
        self.engine.set_custom_duration(minutes)?;
        self.engine.switch_mode(TimerMode::Custom)?;
        self.record_action("custom");
        self.get_timer_panel()
    }

    /// Raise the time-up dialog; called by the completion listener
    pub fn mark_time_up(&self) -> DashboardResult<()> {
        *lock(&self.time_up, "time-up")? = true;
        Ok(())
    }

    pub fn dismiss_time_up(&self) -> DashboardResult<TimerPanel> {
        *lock(&self.time_up, "time-up")? = false;
        self.record_action("dismiss");
        self.get_timer_panel()
    }

    /// Dismiss the dialog and run the same mode again
    pub fn restart_timer(&self) -> DashboardResult<TimerPanel> {
        *lock(&self.time_up, "time-up")? = false;
        self.engine.reset()?;
        self.engine.start()?;
        self.record_action("restart");
        self.get_timer_panel()
    }

    /// Dismiss the dialog and start a short break
    pub fn start_break(&self) -> DashboardResult<TimerPanel> {
        *lock(&self.time_up, "time-up")? = false;
        self.engine.switch_mode(TimerMode::ShortBreak)?;
        self.engine.start()?;
        self.record_action("break");
        self.get_timer_panel()
    }

    // Session and clock

    pub fn get_session_state(&self) -> SessionState {
        self.session.current()
    }

    /// Receiver woken on every pushed session transition
    pub fn subscribe_session(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    pub fn set_location(&self, location: String) -> DashboardResult<()> {
        *lock(&self.location, "location")? = location;
        Ok(())
    }

    pub fn get_clock(&self) -> DashboardResult<ClockView> {
        let location = lock(&self.location, "location")?.clone();
        Ok(ClockView::render(&self.session.current(), &location, Local::now()))
    }

    // Tasks

    /// Apply `updater` to a copy of the task list, persist it, then commit
    fn update_tasks<F, R>(&self, action: &str, updater: F) -> DashboardResult<R>
    where
        F: FnOnce(&mut TaskList) -> DashboardResult<R>,
    {
        let mut tasks = lock(&self.tasks, "task")?;
        let mut updated = tasks.clone();
        let result = updater(&mut updated)?;

        self.store.save_tasks(updated.tasks())?;
        *tasks = updated;
        drop(tasks);

        self.record_action(action);
        Ok(result)
    }

    pub fn list_tasks(&self, status: StatusFilter, category: CategoryFilter) -> DashboardResult<Vec<Task>> {
        Ok(lock(&self.tasks, "task")?.filter(status, category))
    }

    pub fn task_stats(&self) -> DashboardResult<TaskStats> {
        Ok(lock(&self.tasks, "task")?.stats())
    }

    pub fn add_task(
        &self,
        text: &str,
        category: CategoryFilter,
        priority: TaskPriority,
    ) -> DashboardResult<Task> {
        let task = self.update_tasks("task-add", |tasks| tasks.add(text, category, priority))?;
        info!("Added task {}", task.id);
        Ok(task)
    }

    pub fn toggle_task(&self, id: &str) -> DashboardResult<Task> {
        self.update_tasks("task-toggle", |tasks| tasks.toggle(id))
    }

    pub fn delete_task(&self, id: &str) -> DashboardResult<Task> {
        let task = self.update_tasks("task-delete", |tasks| tasks.delete(id))?;
        info!("Deleted task {}", task.id);
        Ok(task)
    }

    // Calendar

    pub fn get_calendar(&self) -> DashboardResult<CalendarView> {
        Ok(lock(&self.calendar, "calendar")?.view(Local::now().date_naive()))
    }

    pub fn update_calendar<F>(&self, updater: F) -> DashboardResult<CalendarView>
    where
        F: FnOnce(&mut CalendarState),
    {
        let mut calendar = lock(&self.calendar, "calendar")?;
        updater(&mut calendar);
        Ok(calendar.view(Local::now().date_naive()))
    }

    pub fn select_date(&self, date: NaiveDate) -> DashboardResult<CalendarView> {
        debug!("Selected date: {}", date);
        self.update_calendar(|calendar| calendar.select(date))
    }

    // Music

    pub fn get_music(&self) -> DashboardResult<MusicState> {
        Ok(lock(&self.music, "music")?.state())
    }

    pub fn update_music<F>(&self, action: &str, updater: F) -> DashboardResult<MusicState>
    where
        F: FnOnce(&mut MusicPlayer) -> DashboardResult<()>,
    {
        let mut music = lock(&self.music, "music")?;
        updater(&mut music)?;
        let state = music.state();
        drop(music);

        self.record_action(action);
        Ok(state)
    }

    // Preferences

    pub fn get_preferences(&self) -> DashboardResult<Preferences> {
        Ok(*lock(&self.preferences, "preferences")?)
    }

    fn update_preferences<F>(&self, action: &str, updater: F) -> DashboardResult<Preferences>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut preferences = lock(&self.preferences, "preferences")?;
        let mut updated = *preferences;
        updater(&mut updated);

        self.store.save_preferences(&updated)?;
        *preferences = updated;
        drop(preferences);

        self.record_action(action);
        Ok(updated)
    }

    pub fn toggle_theme(&self) -> DashboardResult<Preferences> {
        let preferences = self.update_preferences("theme", |prefs| {
            prefs.toggle_theme();
        })?;
        info!("Theme set to {:?}", preferences.theme);
        Ok(preferences)
    }

    pub fn set_animation_style(&self, style: AnimationStyle) -> DashboardResult<Preferences> {
        self.update_preferences("animation", |prefs| prefs.animation_style = style)
    }

    pub fn current_theme(&self) -> Theme {
        match self.preferences.lock() {
            Ok(prefs) => prefs.theme,
            Err(_) => {
                warn!("Preferences lock poisoned, reporting default theme");
                Theme::default()
            }
        }
    }

    // Server metadata

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
