//! Simulated media element
//!
//! Stands in for a browser `<audio>` element: it keeps a paused flag and a
//! playback position, advances only when the host calls [`SimulatedAudio::advance`],
//! and reports what happens as notifications in a mailbox.

use echo_core::{Song, SongId};
use echo_playback::{AudioError, AudioHandle, MediaEvent, MediaNotification};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Element {
    source: Option<SongId>,
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
    volume: f64,
    block_autoplay: bool,
    // Next play() fails like an autoplay policy rejection
    gesture_required: bool,
    released: bool,
    mailbox: VecDeque<MediaNotification>,
}

impl Element {
    fn post(&mut self, event: MediaEvent) {
        if let Some(song_id) = self.source {
            self.mailbox.push_back(MediaNotification::new(song_id, event));
        }
    }
}

/// Shared handle to a simulated element
///
/// Clones share the same element; one clone goes into the session as its
/// audio handle, another stays with the host to advance time and collect
/// notifications.
#[derive(Debug, Clone)]
pub struct SimulatedAudio {
    element: Rc<RefCell<Element>>,
    durations: Rc<HashMap<SongId, Duration>>,
}

impl SimulatedAudio {
    /// Create an element knowing the durations of `catalog`
    pub fn new(catalog: &[Song], block_autoplay: bool) -> Self {
        let durations = catalog
            .iter()
            .filter_map(|s| s.duration_secs().map(|secs| (s.id, Duration::from_secs(secs))))
            .collect();

        Self {
            element: Rc::new(RefCell::new(Element {
                paused: true,
                volume: 1.0,
                block_autoplay,
                ..Element::default()
            })),
            durations: Rc::new(durations),
        }
    }

    /// Advance playback by `elapsed`
    ///
    /// Posts a time update, and `pause` + `ended` when the end is reached.
    pub fn advance(&self, elapsed: Duration) {
        let mut el = self.element.borrow_mut();
        if el.paused || el.source.is_none() {
            return;
        }

        el.position += elapsed;
        let ended = el.duration.is_some_and(|d| el.position >= d);
        if let (true, Some(duration)) = (ended, el.duration) {
            el.position = duration;
        }
        el.post(MediaEvent::TimeUpdate);

        if ended {
            el.paused = true;
            el.post(MediaEvent::Pause);
            el.post(MediaEvent::Ended);
        }
    }

    /// Take the oldest queued notification
    pub fn next_notification(&self) -> Option<MediaNotification> {
        self.element.borrow_mut().mailbox.pop_front()
    }

    /// Whether the element is playing
    pub fn is_playing(&self) -> bool {
        let el = self.element.borrow();
        el.source.is_some() && !el.paused
    }

    /// Current position
    pub fn current_position(&self) -> Duration {
        self.element.borrow().position
    }

    /// Whether the element was released
    pub fn is_released(&self) -> bool {
        self.element.borrow().released
    }
}

impl AudioHandle for SimulatedAudio {
    fn set_source(&mut self, song_id: SongId, url: &str) {
        let duration = self.durations.get(&song_id).copied();
        let mut el = self.element.borrow_mut();

        let was_playing = !el.paused;
        el.source = Some(song_id);
        el.paused = true;
        el.position = Duration::ZERO;
        el.duration = None;
        el.released = false;
        el.gesture_required = el.block_autoplay;
        if was_playing {
            el.post(MediaEvent::Pause);
        }

        el.post(MediaEvent::LoadStart);
        if url.trim().is_empty() {
            el.post(MediaEvent::LoadFailed {
                reason: "empty source url".to_string(),
            });
            return;
        }
        el.duration = duration;
        el.post(MediaEvent::LoadedData);
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let mut el = self.element.borrow_mut();
        if el.source.is_none() {
            return Err(AudioError::Unavailable("no source".to_string()));
        }
        if el.gesture_required {
            el.gesture_required = false;
            return Err(AudioError::PlaybackBlocked(
                "play() can only be initiated by a user gesture".to_string(),
            ));
        }
        if el.paused {
            el.paused = false;
            el.post(MediaEvent::Play);
        }
        Ok(())
    }

    fn pause(&mut self) {
        let mut el = self.element.borrow_mut();
        if !el.paused {
            el.paused = true;
            el.post(MediaEvent::Pause);
        }
    }

    fn is_paused(&self) -> bool {
        self.element.borrow().paused
    }

    fn position(&self) -> Duration {
        self.element.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.element.borrow().duration
    }

    fn seek_to(&mut self, position: Duration) {
        let mut el = self.element.borrow_mut();
        el.position = position;
        el.post(MediaEvent::TimeUpdate);
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.borrow_mut().volume = volume;
    }

    fn volume(&self) -> f64 {
        self.element.borrow().volume
    }

    fn release(&mut self) {
        let mut el = self.element.borrow_mut();
        el.paused = true;
        el.source = None;
        el.released = true;
        el.mailbox.clear();
    }
}
