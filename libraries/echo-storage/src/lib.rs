//! Echo Player Storage
//!
//! Key-value persistence for the three song lists the player derives from
//! playback: recently played, top played and favorites.
//!
//! # Architecture
//!
//! - **Two scopes**: session-scoped data lives as long as the running
//!   session ([`MemoryStore`]); device-scoped data survives restarts
//!   ([`FileStore`], or browser `localStorage` in the web binding)
//! - **String blobs**: every list is one JSON array stored under a fixed key
//!   (`RecentlyPlayed`, `TopPlayed`, `FavSong`)
//! - **Forgiving reads**: an absent or corrupt blob reads as an empty list and
//!   is overwritten by the next successful write
//!
//! # Example
//!
//! ```rust
//! use echo_core::{Song, SongId};
//! use echo_storage::{ListStore, PersistedList};
//!
//! let mut store = ListStore::in_memory();
//! let song = Song::new(SongId::new(1), "A", "a.mp3");
//!
//! store.save(PersistedList::Favorites, &[song.clone()]).unwrap();
//! assert_eq!(store.load(PersistedList::Favorites), vec![song]);
//! assert!(store.load(PersistedList::TopPlayed).is_empty());
//! ```

mod error;
mod file;
mod lists;
mod memory;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use lists::{
    ListStore, PersistedList, StorageScope, FAVORITES_KEY, RECENTLY_PLAYED_KEY, TOP_PLAYED_KEY,
};
pub use memory::MemoryStore;
