//! Recently played tracking
//!
//! Bounded, duplicate-free list of played songs, most recent first.

use echo_core::{Song, SongId};
use std::collections::VecDeque;

/// Recently played songs with bounded size
///
/// Playing a song that is already listed moves it to the front instead of
/// adding a second entry. When full, the oldest entry is discarded.
#[derive(Debug, Clone)]
pub struct RecentlyPlayed {
    /// Songs (most recent = front)
    songs: VecDeque<Song>,

    /// Maximum number of songs kept
    max_size: usize,
}

impl RecentlyPlayed {
    /// Create an empty list with the given maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            songs: VecDeque::with_capacity(max_size.min(256)),
            max_size,
        }
    }

    /// Rebuild from a stored list (most recent first)
    ///
    /// Later duplicates and entries beyond `max_size` are dropped.
    pub fn from_songs(songs: Vec<Song>, max_size: usize) -> Self {
        let mut list = Self::new(max_size);
        for song in songs {
            if list.songs.len() >= max_size {
                break;
            }
            if !list.contains(song.id) {
                list.songs.push_back(song);
            }
        }
        list
    }

    /// Record a play
    ///
    /// Removes any existing entry with the same id, then puts the song at the
    /// front. Play counts belong to the top-played list and are not kept here.
    pub fn push(&mut self, mut song: Song) {
        song.play_count = None;
        self.songs.retain(|s| s.id != song.id);
        self.songs.push_front(song);
        self.songs.truncate(self.max_size);
    }

    /// Check whether a song is listed
    pub fn contains(&self, id: SongId) -> bool {
        self.songs.iter().any(|s| s.id == id)
    }

    /// Get number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Consume into a `Vec`, most recent first
    pub fn into_vec(self) -> Vec<Song> {
        self.songs.into()
    }
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_song(id: u64) -> Song {
        Song::new(SongId::new(id), format!("Song {id}"), format!("/music/{id}.mp3"))
    }

    fn ids(list: &RecentlyPlayed) -> Vec<u64> {
        list.songs.iter().map(|s| s.id.get()).collect()
    }

    #[test]
    fn create_list() {
        let list = RecentlyPlayed::new(10);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn most_recent_first() {
        let mut list = RecentlyPlayed::new(10);
        list.push(create_test_song(1));
        list.push(create_test_song(2));
        list.push(create_test_song(3));

        assert_eq!(ids(&list), vec![3, 2, 1]);
        assert!(list.contains(SongId::new(3)));
    }

    #[test]
    fn replay_moves_to_front_without_duplicate() {
        let mut list = RecentlyPlayed::new(10);
        list.push(create_test_song(1));
        list.push(create_test_song(2));
        list.push(create_test_song(3));
        list.push(create_test_song(1));

        assert_eq!(ids(&list), vec![1, 3, 2]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn replay_refreshes_stored_record() {
        let mut list = RecentlyPlayed::new(10);
        list.push(create_test_song(1));
        list.push(create_test_song(1).with_artist("Updated"));

        assert_eq!(list.len(), 1);
        assert_eq!(list.songs[0].artist_name, "Updated");
    }

    #[test]
    fn list_bounded() {
        let mut list = RecentlyPlayed::new(3);
        for id in 1..=4 {
            list.push(create_test_song(id));
        }

        // Oldest (Song 1) should be gone
        assert_eq!(ids(&list), vec![4, 3, 2]);
    }

    #[test]
    fn from_songs_normalizes() {
        let stored = vec![
            create_test_song(5),
            create_test_song(4),
            create_test_song(5),
            create_test_song(3),
            create_test_song(2),
        ];
        let list = RecentlyPlayed::from_songs(stored, 3);
        assert_eq!(ids(&list), vec![5, 4, 3]);
    }

    #[test]
    fn play_count_not_stored() {
        let mut list = RecentlyPlayed::default();
        list.push(create_test_song(1).with_play_count(4));
        assert_eq!(list.into_vec()[0].play_count, None);
    }

    #[test]
    fn into_vec_keeps_order() {
        let mut list = RecentlyPlayed::new(10);
        list.push(create_test_song(1));
        list.push(create_test_song(2));
        let songs = list.into_vec();
        assert_eq!(songs[0].id, SongId::new(2));
        assert_eq!(songs[1].id, SongId::new(1));
    }
}
