//! Playback Events
//!
//! Event-based communication between the controller and its subscribers.
//! The controller queues events as it changes state; the session drains the
//! queue after every operation, routes the ones the list projections care
//! about, and republishes everything to UI subscribers.

use crate::types::PlaybackState;
use echo_core::{Song, SongId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one logical song selection
///
/// Strictly increasing per controller. Handlers that must run once per
/// selection (recently-played, play counts) remember the last id they saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionId(u64);

impl SelectionId {
    /// Create a selection id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A song was selected (new logical selection)
    SongChanged {
        /// Selection this change belongs to
        selection: SelectionId,
        /// The newly current song
        song: Song,
        /// Song that was current before, if any
        previous_song_id: Option<SongId>,
    },

    /// Transport state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
        /// Whether the audio handle reports playing
        is_playing: bool,
    },

    /// A selection reached the playing state for the first time
    PlaybackStarted {
        /// Selection that started
        selection: SelectionId,
        /// The song being played
        song: Song,
    },

    /// Progress through the current song changed
    ProgressChanged {
        /// Progress from 0 to 100
        percent: f64,
    },

    /// Current song played to the end
    TrackEnded {
        /// ID of the finished song
        song_id: SongId,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        volume: f64,
        /// Whether volume is at zero
        muted: bool,
    },

    /// List used for next/previous changed
    ActiveListChanged {
        /// New list length
        length: usize,
    },

    /// Host refused to start playback (autoplay policy); needs a user gesture
    PlaybackBlocked {
        /// Song that could not start
        song_id: SongId,
        /// Reason reported by the host
        reason: String,
    },

    /// Song could not be loaded
    PlaybackFailed {
        /// Song that failed
        song_id: SongId,
        /// Reason reported by the host
        reason: String,
    },
}

impl PlaybackEvent {
    /// Short event name, for logs and JS callbacks
    pub fn name(&self) -> &'static str {
        match self {
            Self::SongChanged { .. } => "songChanged",
            Self::StateChanged { .. } => "playStateChanged",
            Self::PlaybackStarted { .. } => "playbackStarted",
            Self::ProgressChanged { .. } => "progressChanged",
            Self::TrackEnded { .. } => "trackEnded",
            Self::VolumeChanged { .. } => "volumeChanged",
            Self::ActiveListChanged { .. } => "activeListChanged",
            Self::PlaybackBlocked { .. } => "playbackBlocked",
            Self::PlaybackFailed { .. } => "playbackFailed",
        }
    }
}
