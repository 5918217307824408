//! Core types for playback management

use echo_core::Song;
use serde::{Deserialize, Serialize};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No song selected
    Idle,

    /// Song selected, media not ready yet
    Loading,

    /// Currently playing
    Playing,

    /// Media ready but not playing
    Paused,
}

impl PlaybackState {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When a song's play count is incremented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayCountPolicy {
    /// Every selection counts, even if playback never starts
    #[default]
    OnSelect,

    /// Only selections that actually reach the playing state count
    OnPlaybackStart,
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum length of the recently-played list (default: 50)
    pub recent_capacity: usize,

    /// Initial volume (0.0-1.0, default: 1.0)
    pub initial_volume: f64,

    /// Start playback on song change once the user has interacted (default: true)
    pub autoplay: bool,

    /// Play-count increment policy (default: on select)
    pub play_count_policy: PlayCountPolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            recent_capacity: 50,
            initial_volume: 1.0,
            autoplay: true,
            play_count_policy: PlayCountPolicy::OnSelect,
        }
    }
}

/// Point-in-time view of the transport, for rendering a now-playing panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Current song, if any
    pub song: Option<Song>,
    /// Transport state
    pub state: PlaybackState,
    /// Whether audio is audibly advancing
    pub is_playing: bool,
    /// Progress through the current song (0-100)
    pub progress_percent: f64,
    /// Output volume (0.0-1.0)
    pub volume: f64,
    /// Whether the volume is at zero
    pub muted: bool,
}
