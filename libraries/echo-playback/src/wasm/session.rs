//! WASM-compatible Session wrapper

use super::{js_reason, Mailbox, WebAudioHandle, WebStorage};
use crate::{PlaybackConfig, Session};
use echo_core::{ActiveView, Song, SongId};
use echo_storage::ListStore;
use js_sys::Function;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// WASM-compatible playback session
///
/// Wraps [`Session`] with a JavaScript-friendly API. Persisted lists use
/// `sessionStorage` (recently played) and `localStorage` (top played,
/// favorites).
#[wasm_bindgen]
pub struct WasmSession {
    inner: Rc<RefCell<Session>>,
    mailbox: Mailbox,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session over a catalog (array of songs)
    ///
    /// `config` may be `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog: JsValue, config: JsValue) -> Result<WasmSession, JsValue> {
        console_error_panic_hook::set_once();

        let catalog: Vec<Song> = serde_wasm_bindgen::from_value(catalog)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse catalog: {e}")))?;
        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {e}")))?
        };

        let store = ListStore::new(
            Box::new(WebStorage::session().map_err(to_js)?),
            Box::new(WebStorage::local().map_err(to_js)?),
        );

        let mailbox = Mailbox::new();
        let audio = WebAudioHandle::new(mailbox.clone()).map_err(to_js)?;
        let inner = Rc::new(RefCell::new(Session::new(
            &config,
            catalog,
            Box::new(audio),
            store,
        )));
        mailbox.attach(&inner);

        Ok(Self { inner, mailbox })
    }

    // ===== Navigation =====

    /// Switch view by name ("catalog" | "recent" | "top" | "favorites")
    #[wasm_bindgen(js_name = setActiveView)]
    pub fn set_active_view(&self, view: &str) -> Result<(), JsValue> {
        let view = ActiveView::from_str(view)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown view: {view}")))?;
        self.with_session(|s| s.set_active_view(view))
    }

    /// Switch view from a route path such as "/top-tracks"
    pub fn navigate(&self, route: &str) -> Result<(), JsValue> {
        let view = ActiveView::from_route(route)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown route: {route}")))?;
        self.with_session(|s| s.set_active_view(view))
    }

    /// Name of the active view
    #[wasm_bindgen(js_name = getActiveView)]
    pub fn get_active_view(&self) -> Result<String, JsValue> {
        self.with_session(|s| s.active_view().as_str().to_string())
    }

    // ===== Playback Control =====

    /// Select a song without an implied user gesture
    #[wasm_bindgen(js_name = selectSong)]
    pub fn select_song(&self, id: u32) -> Result<bool, JsValue> {
        self.with_session(|s| s.select_song(SongId::new(u64::from(id))))
    }

    /// Select a song from a click on a list row
    #[wasm_bindgen(js_name = playSong)]
    pub fn play_song(&self, id: u32) -> Result<bool, JsValue> {
        self.with_session(|s| s.play_song(SongId::new(u64::from(id))))
    }

    /// Start or resume playback
    pub fn play(&self) -> Result<(), JsValue> {
        self.with_session(Session::play)
    }

    /// Pause playback
    pub fn pause(&self) -> Result<(), JsValue> {
        self.with_session(Session::pause)
    }

    /// Toggle play/pause
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) -> Result<(), JsValue> {
        self.with_session(Session::toggle_play_pause)
    }

    /// Skip to next song
    #[wasm_bindgen(js_name = playNext)]
    pub fn play_next(&self) -> Result<(), JsValue> {
        self.with_session(Session::play_next)
    }

    /// Go to previous song
    #[wasm_bindgen(js_name = playPrevious)]
    pub fn play_previous(&self) -> Result<(), JsValue> {
        self.with_session(Session::play_previous)
    }

    /// Seek by percentage (0-100)
    pub fn seek(&self, percent: f64) -> Result<(), JsValue> {
        self.with_session(|s| s.seek(percent))
    }

    // ===== Volume Control =====

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f64) -> Result<(), JsValue> {
        self.with_session(|s| s.set_volume(level))
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) -> Result<(), JsValue> {
        self.with_session(Session::toggle_mute)
    }

    // ===== Favorites =====

    /// Toggle a song's favorite status; `undefined` if the song is unknown
    #[wasm_bindgen(js_name = toggleFavorite)]
    pub fn toggle_favorite(&self, id: u32) -> Result<Option<bool>, JsValue> {
        self.with_session(|s| s.toggle_favorite(SongId::new(u64::from(id))))
    }

    /// Toggle the current song's favorite status
    #[wasm_bindgen(js_name = toggleCurrentFavorite)]
    pub fn toggle_current_favorite(&self) -> Result<Option<bool>, JsValue> {
        self.with_session(Session::toggle_current_favorite)
    }

    /// Check whether a song is a favorite
    #[wasm_bindgen(js_name = isFavorite)]
    pub fn is_favorite(&self, id: u32) -> Result<bool, JsValue> {
        self.with_session(|s| s.is_favorite(SongId::new(u64::from(id))))
    }

    // ===== Lists & State =====

    /// Favorites as an array of songs
    #[wasm_bindgen(js_name = getFavorites)]
    pub fn get_favorites(&self) -> Result<JsValue, JsValue> {
        self.with_session(|s| to_value(s.favorites()))?
    }

    /// Recently played as an array of songs
    #[wasm_bindgen(js_name = getRecentlyPlayed)]
    pub fn get_recently_played(&self) -> Result<JsValue, JsValue> {
        self.with_session(|s| to_value(&s.recently_played()))?
    }

    /// Top played as an array of songs
    #[wasm_bindgen(js_name = getTopPlayed)]
    pub fn get_top_played(&self) -> Result<JsValue, JsValue> {
        self.with_session(|s| to_value(&s.top_played()))?
    }

    /// Songs of the active view
    #[wasm_bindgen(js_name = getActiveList)]
    pub fn get_active_list(&self) -> Result<JsValue, JsValue> {
        self.with_session(|s| to_value(s.active_list()))?
    }

    /// Transport snapshot for the now-playing panel
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> Result<JsValue, JsValue> {
        self.with_session(|s| to_value(&s.snapshot()))?
    }

    // ===== Event Listeners =====

    /// Register an event callback, called with `{ kind, ... }` objects
    ///
    /// The callback must not call back into the session synchronously.
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) -> Result<(), JsValue> {
        self.with_session(|s| {
            s.subscribe(move |event| match serde_wasm_bindgen::to_value(event) {
                Ok(value) => {
                    if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                        tracing::warn!(error = %js_reason(&e), "Event callback threw");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Failed to serialize session event"),
            });
        })
    }

    // ===== Lifecycle =====

    /// Release the audio element
    pub fn shutdown(self) {
        let Self { inner, mailbox } = self;
        drop(mailbox);
        match Rc::try_unwrap(inner) {
            Ok(session) => session.into_inner().shutdown(),
            Err(_) => tracing::warn!("Session still borrowed at shutdown"),
        }
    }

    // ===== Internal =====

    fn with_session<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R, JsValue> {
        let result = {
            let mut session = self
                .inner
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("Session is busy"))?;
            f(&mut session)
        };
        self.mailbox.flush();
        Ok(result)
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
