//! Top played ranking
//!
//! Songs ordered by how often they were played. The ranking owns the
//! `play_count` field; every other field follows the latest record played.

use echo_core::{Song, SongId};

/// Play-count ranking, highest first
#[derive(Debug, Clone, Default)]
pub struct TopPlayed {
    songs: Vec<Song>,
}

impl TopPlayed {
    /// Create an empty ranking
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a stored list
    ///
    /// Later duplicates are dropped, missing counts become 1, and the list is
    /// re-sorted.
    pub fn from_songs(stored: Vec<Song>) -> Self {
        let mut songs: Vec<Song> = Vec::with_capacity(stored.len());
        for mut song in stored {
            if songs.iter().any(|s| s.id == song.id) {
                continue;
            }
            song.play_count = Some(song.play_count.unwrap_or(1).max(1));
            songs.push(song);
        }
        let mut ranking = Self { songs };
        ranking.sort();
        ranking
    }

    /// Count one play of `song`
    ///
    /// Returns the song's new play count.
    pub fn record(&mut self, song: &Song) -> u32 {
        let count = match self.songs.iter_mut().find(|s| s.id == song.id) {
            Some(entry) => {
                let count = entry.play_count.unwrap_or(0).saturating_add(1);
                *entry = Song {
                    play_count: Some(count),
                    ..song.clone()
                };
                count
            }
            None => {
                self.songs.push(Song {
                    play_count: Some(1),
                    ..song.clone()
                });
                1
            }
        };
        self.sort();
        count
    }

    /// Play count of a song (0 if never played)
    pub fn play_count(&self, id: SongId) -> u32 {
        self.songs
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.play_count)
            .unwrap_or(0)
    }

    /// Ranked songs
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Get number of ranked songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Consume into a `Vec`, highest count first
    pub fn into_vec(self) -> Vec<Song> {
        self.songs
    }

    // Stable: equal counts keep insertion order
    fn sort(&mut self) {
        self.songs
            .sort_by(|a, b| b.play_count.unwrap_or(0).cmp(&a.play_count.unwrap_or(0)));
    }
}
