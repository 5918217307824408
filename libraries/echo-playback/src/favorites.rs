//! Favorite songs
//!
//! Add/remove set keyed by song id, in the order songs were added.

use echo_core::{Song, SongId};

/// Favorite songs, unique by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    songs: Vec<Song>,
}

impl Favorites {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored list, dropping duplicate ids
    pub fn from_songs(stored: Vec<Song>) -> Self {
        let mut favorites = Self::new();
        for song in stored {
            if !favorites.contains(song.id) {
                favorites.songs.push(song);
            }
        }
        favorites
    }

    /// Flip a song's membership
    ///
    /// Returns `true` if the song is a favorite afterwards.
    pub fn toggle(&mut self, song: &Song) -> bool {
        if self.contains(song.id) {
            self.songs.retain(|s| s.id != song.id);
            false
        } else {
            let mut entry = song.clone();
            entry.play_count = None;
            self.songs.push(entry);
            true
        }
    }

    /// Check membership
    pub fn contains(&self, id: SongId) -> bool {
        self.songs.iter().any(|s| s.id == id)
    }

    /// Favorite songs in insertion order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Get number of favorites
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
