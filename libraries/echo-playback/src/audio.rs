//! Platform-agnostic audio handle trait
//!
//! Abstracts the media element that actually plays audio (an
//! `HtmlAudioElement` in the browser, a simulated element in the terminal
//! front-end). The controller owns exactly one handle.

use crate::error::AudioError;
use echo_core::SongId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Platform media-playback primitive
///
/// Calls return immediately. Loading and playback progress are reported
/// later as [`MediaNotification`]s, which the host feeds back through
/// `handle_media_event` in the order the platform emitted them.
pub trait AudioHandle {
    /// Point the element at a new resource
    ///
    /// Implementors tag every later notification with `song_id` until the
    /// next call, so late callbacks for an old song can be recognized.
    /// Setting a source leaves the element paused.
    fn set_source(&mut self, song_id: SongId, url: &str);

    /// Request playback
    ///
    /// # Errors
    /// * `AudioError::PlaybackBlocked` - host autoplay policy refused synchronously
    /// * `AudioError::Unavailable` - no source or the handle was released
    ///
    /// A refusal may also arrive later as `MediaEvent::PlayRejected`.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Pause playback
    fn pause(&mut self);

    /// Actual paused flag of the element
    fn is_paused(&self) -> bool;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration, `None` until metadata is loaded
    fn duration(&self) -> Option<Duration>;

    /// Move the playback position
    fn seek_to(&mut self, position: Duration);

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f64);

    /// Current output volume (0.0-1.0)
    fn volume(&self) -> f64;

    /// Release the underlying resource
    ///
    /// Called once at session teardown. Default: pause.
    fn release(&mut self) {
        self.pause();
    }
}

/// Asynchronous notification kinds of a media element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Resource fetch started
    LoadStart,
    /// First frame of media data is available
    LoadedData,
    /// Playback position advanced
    TimeUpdate,
    /// Element left the paused state
    Play,
    /// Element entered the paused state
    Pause,
    /// Playback reached the end of the resource
    Ended,
    /// A play request was refused after the fact (autoplay policy)
    PlayRejected {
        /// Reason reported by the host
        reason: String,
    },
    /// The resource could not be loaded or decoded
    LoadFailed {
        /// Reason reported by the host
        reason: String,
    },
}

/// A media event tagged with the song the element was loading when it fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaNotification {
    /// Song the element's source belonged to
    pub song_id: SongId,
    /// What happened
    pub event: MediaEvent,
}

impl MediaNotification {
    /// Create a notification
    pub fn new(song_id: SongId, event: MediaEvent) -> Self {
        Self { song_id, event }
    }
}
