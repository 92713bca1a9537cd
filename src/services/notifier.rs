//! Desktop notification when a countdown finishes

use tokio::process::Command;
use tracing::{debug, info};

use crate::state::TimerMode;

/// Title and body of the time-up notification for `mode`
pub fn time_up_message(mode: TimerMode) -> (String, String) {
    let body = match mode {
        TimerMode::Focus => "Focus session finished. Time for a break.",
        TimerMode::ShortBreak | TimerMode::LongBreak => "Break is over. Ready to focus?",
        TimerMode::Custom => "Your timer has finished.",
    };
    ("Time's up!".to_string(), body.to_string())
}

/// Show a desktop notification via notify-send
pub async fn send_time_up_notification(mode: TimerMode) -> Result<(), String> {
    let (title, body) = time_up_message(mode);
    debug!("Sending time-up notification for {}", mode);

    let output = Command::new("notify-send")
        .args(["--app-name=Focus Flow", "--urgency=normal", &title, &body])
        .output()
        .await
        .map_err(|e| format!("Failed to execute notify-send: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("notify-send failed: {}", stderr));
    }

    info!("Time-up notification sent");
    Ok(())
}

/// Check if notify-send is available on the system
pub async fn check_notify_send_available() -> Result<(), String> {
    Command::new("notify-send")
        .arg("--version")
        .output()
        .await
        .map_err(|_| "notify-send is not available; desktop notifications are disabled".to_string())?;

    info!("notify-send is available");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_depends_on_mode() {
        let (title, focus) = time_up_message(TimerMode::Focus);
        assert_eq!(title, "Time's up!");
        assert!(focus.contains("break"));

        let (_, short) = time_up_message(TimerMode::ShortBreak);
        let (_, long) = time_up_message(TimerMode::LongBreak);
        assert_eq!(short, long);
    }
}
