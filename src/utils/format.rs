//! Display formatting for countdowns and wall-clock times

use chrono::{DateTime, Local, TimeZone, Utc};

/// Placeholder shown when no session end time is known
pub const NO_END_TIME: &str = "--";

/// Format seconds as a zero-padded `MM:SS` countdown
pub fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a session end time as hour:minute in `tz`, or `--` when unset
pub fn format_end_time_in<Tz: TimeZone>(end_time: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match end_time {
        Some(end) => end.with_timezone(tz).format("%H:%M").to_string(),
        None => NO_END_TIME.to_string(),
    }
}

/// Format a session end time in the local timezone
pub fn format_end_time(end_time: Option<DateTime<Utc>>) -> String {
    format_end_time_in(end_time, &Local)
}

/// Current local time as `HH:MM:SS`
pub fn format_clock(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_is_zero_padded() {
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(65), "01:05");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[test]
    fn countdown_keeps_minutes_past_an_hour() {
        assert_eq!(format_countdown(90 * 60 + 7), "90:07");
    }

    #[test]
    fn missing_end_time_renders_placeholder() {
        assert_eq!(format_end_time_in(None, &Utc), "--");
    }

    #[test]
    fn end_time_renders_hour_and_minute() {
        let end = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 59).unwrap();
        assert_eq!(format_end_time_in(Some(end), &Utc), "14:05");
    }
}
