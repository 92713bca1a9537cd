//! Timer engine: the single authority for the countdown
//!
//! Wraps a [`Countdown`] with a cancellable tick source and a completion
//! callback, and pushes every run-state transition into the
//! [`SessionBroadcaster`] it was handed.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, info};

use super::{
    session_state::{SessionBroadcaster, TimerUpdate},
    timer_state::{Countdown, TickOutcome, TimerDurations, TimerMode, TimerSnapshot},
};
use crate::{
    error::{DashboardError, DashboardResult},
    tasks::countdown_ticker_task,
};

/// Called each time a countdown reaches zero, with the mode that finished
pub type CompletionCallback = Arc<dyn Fn(TimerMode) + Send + Sync>;

/// What the tick source should do after applying a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDisposition {
    Continue,
    /// The countdown for this mode reached zero
    Completed(TimerMode),
    /// The tick source was cancelled after it was scheduled
    Stale,
}

struct EngineInner {
    countdown: Countdown,
    /// Bumped on every start and stop; a tick source only applies ticks for
    /// the generation it was spawned with.
    generation: u64,
    ticker: Option<JoinHandle<()>>,
}

struct EngineShared {
    inner: Mutex<EngineInner>,
    session: SessionBroadcaster,
    on_complete: Mutex<Option<CompletionCallback>>,
    tick_interval: Duration,
}

/// Cloneable handle to one countdown; all clones share the same state
#[derive(Clone)]
pub struct TimerEngine {
    shared: Arc<EngineShared>,
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("tick_interval", &self.shared.tick_interval)
            .finish_non_exhaustive()
    }
}

impl TimerEngine {
    /// Create an idle engine in Focus mode that publishes to `session`
    pub fn new(durations: TimerDurations, session: SessionBroadcaster) -> Self {
        Self::with_tick_interval(durations, session, Duration::from_secs(1))
    }

    pub fn with_tick_interval(
        durations: TimerDurations,
        session: SessionBroadcaster,
        tick_interval: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(EngineShared {
                inner: Mutex::new(EngineInner {
                    countdown: Countdown::new(durations),
                    generation: 0,
                    ticker: None,
                }),
                session,
                on_complete: Mutex::new(None),
                tick_interval,
            }),
        }
    }

    /// Register the callback invoked when a countdown reaches zero
    pub fn on_complete<F>(&self, callback: F) -> DashboardResult<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete_with_mode(move |_| callback())
    }

    /// Like [`on_complete`](Self::on_complete), also passing the finished mode
    pub fn on_complete_with_mode<F>(&self, callback: F) -> DashboardResult<()>
    where
        F: Fn(TimerMode) + Send + Sync + 'static,
    {
        let mut slot = self
            .shared
            .on_complete
            .lock()
            .map_err(|_| DashboardError::LockPoisoned("completion callback"))?;
        *slot = Some(Arc::new(callback));
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        self.shared.tick_interval
    }

    fn lock(&self) -> DashboardResult<MutexGuard<'_, EngineInner>> {
        self.shared
            .inner
            .lock()
            .map_err(|_| DashboardError::LockPoisoned("timer"))
    }

    /// Invalidate the current tick source, if any. Runs under the engine lock,
    /// so no tick from the old generation can be applied once this returns.
    fn cancel_ticker(inner: &mut EngineInner) {
        inner.generation = inner.generation.wrapping_add(1);
        if let Some(handle) = inner.ticker.take() {
            handle.abort();
        }
    }

    pub fn snapshot(&self) -> DashboardResult<TimerSnapshot> {
        Ok(self.lock()?.countdown.snapshot())
    }

    /// Start counting down. Returns false when already running or at zero.
    pub fn start(&self) -> DashboardResult<bool> {
        let runtime = Handle::try_current()
            .map_err(|e| DashboardError::Runtime(format!("cannot schedule countdown ticks: {}", e)))?;

        let mut inner = self.lock()?;
        if !inner.countdown.start() {
            debug!(
                "Ignoring start: running={}, time_left={}",
                inner.countdown.is_running(),
                inner.countdown.time_left()
            );
            return Ok(false);
        }

        Self::cancel_ticker(&mut inner);
        let generation = inner.generation;
        inner.ticker = Some(runtime.spawn(countdown_ticker_task(self.clone(), generation)));

        let mode = inner.countdown.mode();
        let time_left = inner.countdown.time_left();
        self.shared
            .session
            .update_timer_state(TimerUpdate::started(mode, time_left));

        info!("Timer started: mode={}, time_left={}s", mode, time_left);
        Ok(true)
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&self) -> DashboardResult<()> {
        let mut inner = self.lock()?;
        Self::cancel_ticker(&mut inner);

        if inner.countdown.pause() {
            self.shared.session.update_timer_state(TimerUpdate::stopped());
            info!("Timer paused at {}s", inner.countdown.time_left());
        } else {
            debug!("Ignoring pause: timer is not running");
        }
        Ok(())
    }

    /// Stop and reseed with the full duration of the current mode
    pub fn reset(&self) -> DashboardResult<()> {
        let mut inner = self.lock()?;
        Self::cancel_ticker(&mut inner);

        let was_running = inner.countdown.is_running();
        inner.countdown.reset();
        if was_running {
            self.shared.session.update_timer_state(TimerUpdate::stopped());
        }
        info!(
            "Timer reset: mode={}, time_left={}s",
            inner.countdown.mode(),
            inner.countdown.time_left()
        );
        Ok(())
    }

    /// Stop, change mode and reseed; always leaves the timer stopped
    pub fn switch_mode(&self, mode: TimerMode) -> DashboardResult<()> {
        let mut inner = self.lock()?;
        Self::cancel_ticker(&mut inner);

        inner.countdown.switch_mode(mode);
        self.shared
            .session
            .update_timer_state(TimerUpdate::mode_switched(mode));
        info!("Timer switched to {} ({}s)", mode, inner.countdown.time_left());
        Ok(())
    }

    /// Store a custom duration of `minutes`; reseeds now if in Custom mode
    pub fn set_custom_duration(&self, minutes: u64) -> DashboardResult<()> {
        let mut inner = self.lock()?;
        inner.countdown.set_custom_duration(minutes)?;

        // A reseed while running opens a new session window for the views.
        if inner.countdown.is_running() && inner.countdown.mode() == TimerMode::Custom {
            let time_left = inner.countdown.time_left();
            self.shared.session.update_timer_state(TimerUpdate::stopped());
            self.shared
                .session
                .update_timer_state(TimerUpdate::started(TimerMode::Custom, time_left));
        }
        info!("Custom duration set to {} minutes", minutes);
        Ok(())
    }

    /// Apply one tick on behalf of the tick source spawned for `generation`
    pub(crate) fn apply_tick(&self, generation: u64) -> DashboardResult<TickDisposition> {
        let mut inner = self.lock()?;
        if inner.generation != generation {
            return Ok(TickDisposition::Stale);
        }

        match inner.countdown.tick() {
            TickOutcome::Ticked(_) => Ok(TickDisposition::Continue),
            TickOutcome::Idle => Ok(TickDisposition::Stale),
            TickOutcome::Completed => {
                // The completing task is the current ticker; detach rather than abort itself.
                inner.generation = inner.generation.wrapping_add(1);
                inner.ticker = None;
                self.shared.session.update_timer_state(TimerUpdate::stopped());
                let mode = inner.countdown.mode();
                info!("Timer completed: mode={}", mode);
                Ok(TickDisposition::Completed(mode))
            }
        }
    }

    /// Invoke the registered completion callback, outside the engine lock
    pub(crate) fn notify_completed(&self, mode: TimerMode) {
        let callback = match self.shared.on_complete.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => {
                tracing::error!("Completion callback lock poisoned; skipping notification");
                None
            }
        };
        if let Some(callback) = callback {
            callback(mode);
        }
    }
}
