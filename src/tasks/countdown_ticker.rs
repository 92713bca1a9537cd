//! Periodic tick source for a running countdown

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::state::{TickDisposition, TimerEngine};

/// Tick the engine once per interval until the countdown stops or completes.
///
/// Each task is bound to the engine generation it was spawned for; once the
/// engine moves past that generation every remaining tick is discarded.
pub async fn countdown_ticker_task(engine: TimerEngine, generation: u64) {
    let period = engine.tick_interval();
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!("Tick source {} started", generation);

    loop {
        interval.tick().await;

        match engine.apply_tick(generation) {
            Ok(TickDisposition::Continue) => {}
            Ok(TickDisposition::Completed(mode)) => {
                engine.notify_completed(mode);
                break;
            }
            Ok(TickDisposition::Stale) => {
                debug!("Tick source {} is stale, stopping", generation);
                break;
            }
            Err(e) => {
                error!("Failed to apply countdown tick: {}", e);
                break;
            }
        }
    }
}
