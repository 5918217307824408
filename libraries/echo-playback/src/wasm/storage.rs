//! Web Storage key-value store

use super::js_reason;
use echo_core::{EchoError, KeyValueStore, Result};
use web_sys::Storage;

/// [`KeyValueStore`] over `window.sessionStorage` or `window.localStorage`
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: Storage,
}

impl WebStorage {
    /// Tab-scoped storage (`sessionStorage`)
    pub fn session() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| EchoError::storage("no window"))?;
        let storage = window
            .session_storage()
            .map_err(|e| EchoError::storage(js_reason(&e)))?
            .ok_or_else(|| EchoError::storage("sessionStorage unavailable"))?;
        Ok(Self { storage })
    }

    /// Device-scoped storage (`localStorage`)
    pub fn local() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| EchoError::storage("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| EchoError::storage(js_reason(&e)))?
            .ok_or_else(|| EchoError::storage("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| EchoError::storage(js_reason(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Throws QuotaExceededError when full
        self.storage
            .set_item(key, value)
            .map_err(|e| EchoError::storage(js_reason(&e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| EchoError::storage(js_reason(&e)))
    }
}
