//! WASM bindings for echo-playback
//!
//! Runs a [`Session`](crate::Session) in the browser: the audio handle is an
//! `HtmlAudioElement`, the persisted lists live in `sessionStorage` and
//! `localStorage`, and the element's events are routed back into the session
//! through a [`Mailbox`].

mod audio;
mod mailbox;
mod session;
mod storage;

pub use audio::WebAudioHandle;
pub use mailbox::Mailbox;
pub use session::WasmSession;
pub use storage::WebStorage;

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text of a JS error value
pub(crate) fn js_reason(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        message
    } else if let Some(js_err) = value.dyn_ref::<js_sys::Error>() {
        js_err.message().into()
    } else {
        format!("{value:?}")
    }
}
