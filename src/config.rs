//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    services::Coordinates,
    state::{TimerDurations, MAX_DURATION_MINUTES},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-flow")]
#[command(about = "A local productivity dashboard with a Pomodoro timer, tasks, calendar and focus music")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory for tasks and preferences [default: <data dir>/focus-flow]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Focus session length in minutes
    #[arg(long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_MINUTES))]
    pub focus_minutes: u64,

    /// Short break length in minutes
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_MINUTES))]
    pub short_break_minutes: u64,

    /// Long break length in minutes
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u64).range(1..=MAX_DURATION_MINUTES))]
    pub long_break_minutes: u64,

    /// Latitude for the clock's location display
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude for the clock's location display
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Reverse geocoding endpoint
    #[arg(long, default_value = "https://nominatim.openstreetmap.org/reverse")]
    pub geocode_url: String,

    /// Disable desktop notifications when a countdown finishes
    #[arg(long)]
    pub no_notify: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn durations(&self) -> TimerDurations {
        TimerDurations::from_minutes(
            self.focus_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
        )
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }

    /// Resolve the data directory, falling back to the platform data dir
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("focus-flow")
        })
    }
}
