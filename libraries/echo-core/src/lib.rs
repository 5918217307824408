//! Echo Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Echo Player.
//!
//! This crate provides the foundational building blocks shared by the storage
//! layer, the playback session and every front-end (terminal, browser).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, `ActiveView`
//! - **Core Traits**: `KeyValueStore`
//! - **Error Handling**: Unified `EchoError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use echo_core::{ActiveView, Song, SongId};
//!
//! let song = Song::new(SongId::new(1), "Blue in Green", "https://cdn.example/blue.mp3")
//!     .with_artist("Miles Davis")
//!     .with_duration("5:37");
//!
//! assert_eq!(song.duration_secs(), Some(337));
//! assert_eq!(ActiveView::from_route("/top-tracks"), Some(ActiveView::TopPlayed));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{EchoError, Result};
pub use traits::KeyValueStore;
pub use types::{ActiveView, Song, SongId};
