/// Core traits for Echo Player
use crate::error::Result;

/// String-keyed blob storage
///
/// Mirrors the browser's `sessionStorage`/`localStorage` contract: values are
/// opaque strings (JSON in practice) stored under string keys. Implementations
/// decide the lifetime of the data (one session, or the whole device).
///
/// No `Send` bound: the playback session is single-threaded and browser
/// storage handles cannot cross threads.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// Returns `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key` (no-op if absent)
    ///
    /// # Errors
    /// Returns an error if the backing medium cannot be written
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
