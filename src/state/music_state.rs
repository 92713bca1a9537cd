//! Background focus music player state
//!
//! Playback happens in the embedded video player of the front end; this
//! module only tracks which track is selected and how the player is shown.

use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: &'static str,
    pub title: &'static str,
}

pub const FOCUS_TRACKS: [Track; 5] = [
    Track { id: "jgpJVI3tDbY", title: "Deep Focus Music" },
    Track { id: "4xDzrJKXOOY", title: "Ambient Study Music" },
    Track { id: "lTRiuFIWV54", title: "Peaceful Piano" },
    Track { id: "DWcJFNfaw9c", title: "Focus Flow" },
    Track { id: "21qNxnCS8WU", title: "Concentration Music" },
];

pub const DEFAULT_VOLUME: u8 = 50;
pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicState {
    pub visible: bool,
    pub minimized: bool,
    pub is_playing: bool,
    pub volume: u8,
    pub current_track: usize,
    pub track: Track,
    pub track_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicPlayer {
    visible: bool,
    minimized: bool,
    is_playing: bool,
    volume: u8,
    current_track: usize,
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self {
            visible: false,
            minimized: false,
            is_playing: false,
            volume: DEFAULT_VOLUME,
            current_track: 0,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the player; playback stops with it
    pub fn close(&mut self) {
        self.visible = false;
        self.minimized = false;
        self.is_playing = false;
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn stop(&mut self) {
        self.is_playing = false;
    }

    pub fn next_track(&mut self) {
        self.current_track = (self.current_track + 1) % FOCUS_TRACKS.len();
    }

    pub fn prev_track(&mut self) {
        self.current_track = if self.current_track == 0 {
            FOCUS_TRACKS.len() - 1
        } else {
            self.current_track - 1
        };
    }

    pub fn set_volume(&mut self, volume: u8) -> DashboardResult<()> {
        if volume > MAX_VOLUME {
            return Err(DashboardError::InvalidInput(format!(
                "volume must be between 0 and {}, got {}",
                MAX_VOLUME, volume
            )));
        }
        self.volume = volume;
        Ok(())
    }

    pub fn toggle_minimize(&mut self) {
        self.minimized = !self.minimized;
    }

    pub fn state(&self) -> MusicState {
        MusicState {
            visible: self.visible,
            minimized: self.minimized,
            is_playing: self.is_playing,
            volume: self.volume,
            current_track: self.current_track,
            track: FOCUS_TRACKS[self.current_track].clone(),
            track_count: FOCUS_TRACKS.len(),
        }
    }
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_navigation_wraps_both_ways() {
        let mut player = MusicPlayer::new();
        player.prev_track();
        assert_eq!(player.state().track.title, "Concentration Music");
        player.next_track();
        assert_eq!(player.state().current_track, 0);
        player.next_track();
        assert_eq!(player.state().track.id, "4xDzrJKXOOY");
    }

    #[test]
    fn close_stops_playback() {
        let mut player = MusicPlayer::new();
        player.show();
        player.toggle_play();
        player.toggle_minimize();
        assert!(player.state().is_playing);

        player.close();
        let state = player.state();
        assert!(!state.visible);
        assert!(!state.minimized);
        assert!(!state.is_playing);
    }

    #[test]
    fn volume_is_bounded() {
        let mut player = MusicPlayer::new();
        assert_eq!(player.state().volume, 50);
        player.set_volume(80).unwrap();
        assert_eq!(player.state().volume, 80);
        assert!(matches!(player.set_volume(101), Err(DashboardError::InvalidInput(_))));
        assert_eq!(player.state().volume, 80);
    }
}
