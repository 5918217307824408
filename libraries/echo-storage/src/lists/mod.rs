//! Persisted song lists
//!
//! Typed access to the three JSON-array blobs the player keeps. Each list has
//! a fixed key and a scope deciding which backing store holds it.

use crate::error::StorageError;
use echo_core::{KeyValueStore, Result, Song};
use serde::{Deserialize, Serialize};

use crate::memory::MemoryStore;

/// Storage key of the recently-played list (session scope)
pub const RECENTLY_PLAYED_KEY: &str = "RecentlyPlayed";

/// Storage key of the top-played list (device scope)
pub const TOP_PLAYED_KEY: &str = "TopPlayed";

/// Storage key of the favorites list (device scope)
pub const FAVORITES_KEY: &str = "FavSong";

/// Lifetime of a persisted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageScope {
    /// Lives as long as the running session
    Session,
    /// Survives restarts on the same device
    Device,
}

/// The lists derived from playback and user actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedList {
    /// Most recently played first, unique by id
    RecentlyPlayed,
    /// Sorted by play count, unique by id
    TopPlayed,
    /// Songs marked as favorite, unique by id
    Favorites,
}

impl PersistedList {
    /// Storage key
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::RecentlyPlayed => RECENTLY_PLAYED_KEY,
            Self::TopPlayed => TOP_PLAYED_KEY,
            Self::Favorites => FAVORITES_KEY,
        }
    }

    /// Which store holds the list
    #[must_use]
    pub fn scope(&self) -> StorageScope {
        match self {
            Self::RecentlyPlayed => StorageScope::Session,
            Self::TopPlayed | Self::Favorites => StorageScope::Device,
        }
    }
}

/// Song lists over a session store and a device store
pub struct ListStore {
    session: Box<dyn KeyValueStore>,
    device: Box<dyn KeyValueStore>,
}

impl ListStore {
    /// Create a list store over the given backends
    pub fn new(session: Box<dyn KeyValueStore>, device: Box<dyn KeyValueStore>) -> Self {
        Self { session, device }
    }

    /// Both scopes in memory (tests, ephemeral sessions)
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    fn backend(&self, scope: StorageScope) -> &dyn KeyValueStore {
        match scope {
            StorageScope::Session => self.session.as_ref(),
            StorageScope::Device => self.device.as_ref(),
        }
    }

    fn backend_mut(&mut self, scope: StorageScope) -> &mut dyn KeyValueStore {
        match scope {
            StorageScope::Session => self.session.as_mut(),
            StorageScope::Device => self.device.as_mut(),
        }
    }

    /// Read a list
    ///
    /// Never fails: an absent key, an unreadable backend or a corrupt blob
    /// all yield an empty list (the latter two are logged).
    pub fn load(&self, list: PersistedList) -> Vec<Song> {
        match self.try_load(list) {
            Ok(songs) => songs,
            Err(e) => {
                tracing::warn!(key = list.key(), error = %e, "Discarding unreadable song list");
                Vec::new()
            }
        }
    }

    /// Read a list, surfacing backend and format errors
    ///
    /// # Errors
    /// Returns an error if the backend fails or the blob is not a song array
    pub fn try_load(&self, list: PersistedList) -> Result<Vec<Song>> {
        let Some(raw) = self.backend(list.scope()).get(list.key())? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(Vec::new());
        }
        let songs: Vec<Song> = serde_json::from_str(&raw).map_err(StorageError::from)?;
        Ok(songs)
    }

    /// Write a list, replacing the stored value
    ///
    /// # Errors
    /// Returns an error if serialization or the backend write fails
    pub fn save(&mut self, list: PersistedList, songs: &[Song]) -> Result<()> {
        let raw = serde_json::to_string(songs).map_err(StorageError::from)?;
        self.backend_mut(list.scope()).set(list.key(), &raw)?;
        tracing::trace!(key = list.key(), len = songs.len(), "Saved song list");
        Ok(())
    }

    /// Remove a list entirely
    ///
    /// # Errors
    /// Returns an error if the backend write fails
    pub fn clear(&mut self, list: PersistedList) -> Result<()> {
        self.backend_mut(list.scope()).remove(list.key())
    }

    /// Raw access to the store holding `scope`
    pub fn store_mut(&mut self, scope: StorageScope) -> &mut dyn KeyValueStore {
        self.backend_mut(scope)
    }
}

impl Default for ListStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for ListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListStore").finish_non_exhaustive()
    }
}
