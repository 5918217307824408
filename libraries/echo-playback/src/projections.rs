//! List projections
//!
//! Keeps the recently-played, top-played and favorites lists in step with
//! playback. Each update modifies one list and writes it back inside a
//! single `&mut self` call, so no other update can interleave with it.
//! Favorites are loaded once and then owned by the projection.

use crate::error::Result;
use crate::events::SelectionId;
use crate::favorites::Favorites;
use crate::ranking::TopPlayed;
use crate::recent::RecentlyPlayed;
use crate::types::{PlayCountPolicy, PlaybackConfig};
use echo_core::{Song, SongId};
use echo_storage::{ListStore, PersistedList};

/// Derived song lists backed by a [`ListStore`]
#[derive(Debug)]
pub struct ListProjections {
    store: ListStore,
    recent_capacity: usize,
    policy: PlayCountPolicy,

    // Exactly-once guards
    last_selection: Option<SelectionId>,
    last_started: Option<SelectionId>,

    // Reactive favorites projection
    favorites: Favorites,
}

impl ListProjections {
    /// Create projections over `store`
    pub fn new(store: ListStore, config: &PlaybackConfig) -> Self {
        let favorites = Favorites::from_songs(store.load(PersistedList::Favorites));
        Self {
            store,
            recent_capacity: config.recent_capacity,
            policy: config.play_count_policy,
            last_selection: None,
            last_started: None,
            favorites,
        }
    }

    /// Record a song selection
    ///
    /// Runs once per selection: a repeated or older `selection` is ignored.
    /// Moves the song to the front of recently played and, under
    /// [`PlayCountPolicy::OnSelect`], counts a play.
    ///
    /// Returns `true` if the selection was recorded.
    pub fn record_selection(&mut self, selection: SelectionId, song: &Song) -> bool {
        if self.last_selection.is_some_and(|last| selection <= last) {
            tracing::debug!(%selection, song_id = %song.id, "Selection already recorded");
            return false;
        }
        self.last_selection = Some(selection);

        if let Err(e) = self.push_recent(song) {
            tracing::warn!(song_id = %song.id, error = %e, "Failed to update recently played");
        }

        if self.policy == PlayCountPolicy::OnSelect {
            self.count_play(song);
        }
        true
    }

    /// Record that a selection started playing
    ///
    /// Only counts under [`PlayCountPolicy::OnPlaybackStart`], once per selection.
    pub fn record_playback_started(&mut self, selection: SelectionId, song: &Song) -> bool {
        if self.policy != PlayCountPolicy::OnPlaybackStart {
            return false;
        }
        if self.last_started.is_some_and(|last| selection <= last) {
            return false;
        }
        self.last_started = Some(selection);
        self.count_play(song);
        true
    }

    /// Add or remove a favorite
    ///
    /// Toggles the in-memory projection and writes it back before
    /// returning. A failed write is logged; the projection still reflects
    /// the toggle and the next successful write brings the store in line.
    ///
    /// Returns `true` if the song is a favorite afterwards.
    pub fn toggle_favorite(&mut self, song: &Song) -> bool {
        let mut favorites = self.favorites.clone();
        let now_favorite = favorites.toggle(song);

        if let Err(e) = self.store.save(PersistedList::Favorites, favorites.songs()) {
            tracing::warn!(song_id = %song.id, error = %e, "Failed to persist favorites");
        }

        tracing::info!(song_id = %song.id, favorite = now_favorite, "Toggled favorite");
        self.favorites = favorites;
        now_favorite
    }

    /// Check whether a song is a favorite
    pub fn is_favorite(&self, id: SongId) -> bool {
        self.favorites.contains(id)
    }

    /// Current favorites
    pub fn favorites(&self) -> &[Song] {
        self.favorites.songs()
    }

    /// Recently played songs, most recent first
    pub fn recently_played(&self) -> Vec<Song> {
        RecentlyPlayed::from_songs(
            self.store.load(PersistedList::RecentlyPlayed),
            self.recent_capacity,
        )
        .into_vec()
    }

    /// Songs ranked by play count
    pub fn top_played(&self) -> Vec<Song> {
        TopPlayed::from_songs(self.store.load(PersistedList::TopPlayed)).into_vec()
    }

    /// Play count of a song (0 if never counted)
    pub fn play_count(&self, id: SongId) -> u32 {
        TopPlayed::from_songs(self.store.load(PersistedList::TopPlayed)).play_count(id)
    }

    /// Active play-count policy
    pub fn policy(&self) -> PlayCountPolicy {
        self.policy
    }

    /// Underlying list store
    pub fn store(&self) -> &ListStore {
        &self.store
    }

    fn push_recent(&mut self, song: &Song) -> Result<()> {
        let mut recent = RecentlyPlayed::from_songs(
            self.store.load(PersistedList::RecentlyPlayed),
            self.recent_capacity,
        );
        recent.push(song.clone());
        self.store
            .save(PersistedList::RecentlyPlayed, &recent.into_vec())?;
        Ok(())
    }

    fn count_play(&mut self, song: &Song) {
        let mut top = TopPlayed::from_songs(self.store.load(PersistedList::TopPlayed));
        let count = top.record(song);
        tracing::debug!(song_id = %song.id, play_count = count, "Counted play");

        if let Err(e) = self.store.save(PersistedList::TopPlayed, top.songs()) {
            tracing::warn!(song_id = %song.id, error = %e, "Failed to persist top played");
        }
    }
}
