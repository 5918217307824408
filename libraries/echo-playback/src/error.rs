//! Error types for playback management

use echo_core::SongId;
use thiserror::Error;

/// Errors reported by an [`AudioHandle`](crate::AudioHandle)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    /// Host refused to start playback without a user gesture
    #[error("Playback blocked: {0}")]
    PlaybackBlocked(String),

    /// Audio output is unavailable (released, no source, device gone)
    #[error("Audio unavailable: {0}")]
    Unavailable(String),
}

/// Playback errors
///
/// Used inside the controller and projections; the public transport
/// operations log and absorb them.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Song is not part of the active list
    #[error("Song not in active list: {0}")]
    SongNotInActiveList(SongId),

    /// Active list is empty
    #[error("Active list is empty")]
    EmptyList,

    /// Audio handle error
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Persistence error
    #[error(transparent)]
    Storage(#[from] echo_core::EchoError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
