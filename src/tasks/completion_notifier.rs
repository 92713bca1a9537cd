//! Completion notifier background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{services::send_time_up_notification, state::AppState};

/// Raise the time-up dialog and send a desktop notification for every
/// completed countdown. Notification failures are logged and dropped.
pub async fn completion_notifier_task(state: Arc<AppState>, notify: bool) {
    info!("Starting completion notifier task");

    let mut completion_rx = state.completion_tx.subscribe();

    loop {
        match completion_rx.recv().await {
            Ok(event) => {
                info!("{} countdown completed at {}", event.mode, event.completed_at);

                if let Err(e) = state.mark_time_up() {
                    error!("Failed to raise time-up dialog: {}", e);
                }

                if !notify {
                    continue;
                }

                if let Err(e) = send_time_up_notification(event.mode).await {
                    warn!("Failed to send time-up notification: {}", e);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Completion notifier lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Completion channel closed, stopping notifier");
                break;
            }
        }
    }
}
