/// Song record shared by the catalog and the persisted lists
use super::SongId;
use serde::{Deserialize, Serialize};

/// A playable song
///
/// Immutable value record, except for `play_count` which is owned by the
/// top-played list. Field names serialize in camelCase so persisted blobs
/// keep the `artistName`/`musicUrl`/`playCount` shape of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Unique, stable identifier
    pub id: SongId,

    /// Song title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist_name: String,

    /// Thumbnail image reference
    #[serde(default)]
    pub thumbnail: String,

    /// Audio resource reference handed to the audio element
    pub music_url: String,

    /// Display duration (e.g. "3:45")
    #[serde(default)]
    pub duration: String,

    /// Number of times the song was played; only present in the top-played list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_count: Option<u32>,
}

impl Song {
    /// Create a song with the required fields
    pub fn new(id: SongId, title: impl Into<String>, music_url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist_name: String::new(),
            thumbnail: String::new(),
            music_url: music_url.into(),
            duration: String::new(),
            play_count: None,
        }
    }

    /// Set the artist name
    #[must_use]
    pub fn with_artist(mut self, artist_name: impl Into<String>) -> Self {
        self.artist_name = artist_name.into();
        self
    }

    /// Set the thumbnail reference
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Set the display duration
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Set the play count
    #[must_use]
    pub fn with_play_count(mut self, play_count: u32) -> Self {
        self.play_count = Some(play_count);
        self
    }

    /// Parse the display duration into seconds
    ///
    /// Accepts `m:ss` and `h:mm:ss`. Returns `None` for anything else.
    pub fn duration_secs(&self) -> Option<u64> {
        let parts: Vec<&str> = self.duration.trim().split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return None;
        }

        let mut total: u64 = 0;
        for (i, part) in parts.iter().enumerate() {
            let value: u64 = part.parse().ok()?;
            // Seconds and (when hours are present) minutes must stay below 60
            if i > 0 && value >= 60 {
                return None;
            }
            total = total * 60 + value;
        }
        Some(total)
    }
}
