//! Echo Player - Playback Session
//!
//! Keeps a single audio handle, the current-song pointer and the derived
//! song lists consistent while the user navigates and while the audio
//! element reports asynchronous events.
//!
//! This crate provides:
//! - Transport control (play/pause, seek, next/previous over the active list)
//! - Volume with mute/restore
//! - Recently played, top played and favorites projections
//! - A session context that routes controller events to the projections and
//!   republishes them to subscribers
//! - Browser bindings over `HtmlAudioElement` and Web Storage (`wasm` feature)
//!
//! # Architecture
//!
//! `echo-playback` knows nothing about the platform's media element.
//! The host provides an [`AudioHandle`] and feeds the element's
//! notifications back through [`Session::handle_media_event`]. Everything
//! runs on one thread; the session is a plain owned value.
//!
//! # Example
//!
//! ```rust
//! use echo_core::{Song, SongId};
//! use echo_playback::{AudioError, AudioHandle, PlaybackConfig, Session};
//! use echo_storage::ListStore;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct SilentAudio {
//!     paused: bool,
//!     volume: f64,
//! }
//!
//! impl AudioHandle for SilentAudio {
//!     fn set_source(&mut self, _song_id: SongId, _url: &str) {
//!         self.paused = true;
//!     }
//!     fn play(&mut self) -> Result<(), AudioError> {
//!         self.paused = false;
//!         Ok(())
//!     }
//!     fn pause(&mut self) {
//!         self.paused = true;
//!     }
//!     fn is_paused(&self) -> bool {
//!         self.paused
//!     }
//!     fn position(&self) -> Duration {
//!         Duration::ZERO
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         None
//!     }
//!     fn seek_to(&mut self, _position: Duration) {}
//!     fn set_volume(&mut self, volume: f64) {
//!         self.volume = volume;
//!     }
//!     fn volume(&self) -> f64 {
//!         self.volume
//!     }
//! }
//!
//! let catalog = vec![
//!     Song::new(SongId::new(1), "A", "https://cdn.example/a.mp3"),
//!     Song::new(SongId::new(2), "B", "https://cdn.example/b.mp3"),
//! ];
//!
//! let mut session = Session::new(
//!     &PlaybackConfig::default(),
//!     catalog,
//!     Box::new(SilentAudio::default()),
//!     ListStore::in_memory(),
//! );
//!
//! session.play_song(SongId::new(2));
//! session.play_next();
//!
//! assert_eq!(session.controller().current_song_id(), Some(SongId::new(1)));
//! assert_eq!(session.recently_played().len(), 2);
//! ```

mod audio;
mod controller;
mod error;
mod events;
mod favorites;
mod projections;
mod ranking;
mod recent;
mod session;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use audio::{AudioHandle, MediaEvent, MediaNotification};
pub use controller::PlaybackController;
pub use error::{AudioError, PlaybackError, Result};
pub use events::{PlaybackEvent, SelectionId};
pub use favorites::Favorites;
pub use projections::ListProjections;
pub use ranking::TopPlayed;
pub use recent::RecentlyPlayed;
pub use session::{Session, SessionEvent, SubscriptionId};
pub use types::{PlayCountPolicy, PlaybackConfig, PlaybackSnapshot, PlaybackState};
pub use volume::Volume;
