//! `HtmlAudioElement` audio handle

use super::{js_reason, Mailbox};
use crate::{
    audio::{AudioHandle, MediaEvent, MediaNotification},
    error::AudioError,
};
use echo_core::SongId;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::HtmlAudioElement;

const FORWARDED_EVENTS: [&str; 7] = [
    "loadstart",
    "loadeddata",
    "timeupdate",
    "play",
    "pause",
    "ended",
    "error",
];

/// Audio handle backed by a browser media element
///
/// Element events are tagged with the song whose source was set when they
/// fired and posted to the [`Mailbox`].
pub struct WebAudioHandle {
    element: HtmlAudioElement,
    current: Rc<Cell<Option<SongId>>>,
    mailbox: Mailbox,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl WebAudioHandle {
    /// Create a detached `<audio>` element and listen to its events
    ///
    /// # Errors
    /// Returns `AudioError::Unavailable` if the element cannot be created.
    pub fn new(mailbox: Mailbox) -> Result<Self, AudioError> {
        let element = HtmlAudioElement::new()
            .map_err(|e| AudioError::Unavailable(js_reason(&e)))?;
        Ok(Self::with_element(element, mailbox))
    }

    /// Wrap an existing element
    pub fn with_element(element: HtmlAudioElement, mailbox: Mailbox) -> Self {
        let current = Rc::new(Cell::new(None));
        let mut handle = Self {
            element,
            current,
            mailbox,
            listeners: Vec::new(),
        };
        handle.attach_listeners();
        handle
    }

    /// The underlying element
    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    fn attach_listeners(&mut self) {
        for name in FORWARDED_EVENTS {
            let current = self.current.clone();
            let mailbox = self.mailbox.clone();
            let element = self.element.clone();

            let closure = Closure::<dyn FnMut()>::new(move || {
                let Some(song_id) = current.get() else {
                    return;
                };
                let event = match name {
                    "loadstart" => MediaEvent::LoadStart,
                    "loadeddata" => MediaEvent::LoadedData,
                    "timeupdate" => MediaEvent::TimeUpdate,
                    "play" => MediaEvent::Play,
                    "pause" => MediaEvent::Pause,
                    "ended" => MediaEvent::Ended,
                    _ => MediaEvent::LoadFailed {
                        reason: element.error().map_or_else(
                            || "media error".to_string(),
                            |e| format!("media error code {}", e.code()),
                        ),
                    },
                };
                mailbox.post(MediaNotification::new(song_id, event));
            });

            if let Err(e) = self
                .element
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                tracing::warn!(event = name, error = %js_reason(&e), "Failed to attach listener");
                continue;
            }
            self.listeners.push((name, closure));
        }
    }

    fn detach_listeners(&mut self) {
        for (name, closure) in self.listeners.drain(..) {
            // Listener goes away with the closure either way
            let _ = self
                .element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

impl AudioHandle for WebAudioHandle {
    fn set_source(&mut self, song_id: SongId, url: &str) {
        self.current.set(Some(song_id));
        self.element.set_src(url);
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let Some(song_id) = self.current.get() else {
            return Err(AudioError::Unavailable("no source".into()));
        };

        let promise = self
            .element
            .play()
            .map_err(|e| AudioError::PlaybackBlocked(js_reason(&e)))?;

        // Autoplay policy rejections arrive through the promise
        let mailbox = self.mailbox.clone();
        let on_reject = Closure::once(move |err: JsValue| {
            mailbox.post(MediaNotification::new(
                song_id,
                MediaEvent::PlayRejected {
                    reason: js_reason(&err),
                },
            ));
        });
        let _ = promise.catch(&on_reject);
        on_reject.forget();

        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            tracing::warn!(error = %js_reason(&e), "Failed to pause element");
        }
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn position(&self) -> Duration {
        Duration::try_from_secs_f64(self.element.current_time()).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        // NaN until metadata loads, infinite for live streams
        Duration::try_from_secs_f64(self.element.duration()).ok()
    }

    fn seek_to(&mut self, position: Duration) {
        self.element.set_current_time(position.as_secs_f64());
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn release(&mut self) {
        self.pause();
        self.current.set(None);
        self.detach_listeners();
        let _ = self.element.remove_attribute("src");
        self.element.load();
    }
}

impl Drop for WebAudioHandle {
    fn drop(&mut self) {
        self.detach_listeners();
    }
}
