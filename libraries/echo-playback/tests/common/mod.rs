//! Shared test helpers

#![allow(dead_code)]

use echo_core::{Song, SongId};
use echo_playback::{AudioError, AudioHandle, MediaEvent, MediaNotification, PlaybackConfig, Session};
use echo_storage::ListStore;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Observable state of [`FakeElement`]
#[derive(Debug)]
pub struct ElementState {
    pub source: Option<SongId>,
    pub paused: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f64,
    pub autoplay_blocked: bool,
    pub released: bool,
}

/// In-memory stand-in for a media element
///
/// Never emits notifications on its own; tests post them through
/// [`notify`].
#[derive(Clone)]
pub struct FakeElement(pub Rc<RefCell<ElementState>>);

impl FakeElement {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(ElementState {
            source: None,
            paused: true,
            position: Duration::ZERO,
            duration: None,
            volume: 1.0,
            autoplay_blocked: false,
            released: false,
        })))
    }
}

impl AudioHandle for FakeElement {
    fn set_source(&mut self, song_id: SongId, _url: &str) {
        let mut s = self.0.borrow_mut();
        s.source = Some(song_id);
        s.paused = true;
        s.position = Duration::ZERO;
        s.duration = Some(Duration::from_secs(200));
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let mut s = self.0.borrow_mut();
        if s.autoplay_blocked {
            return Err(AudioError::PlaybackBlocked("NotAllowedError".into()));
        }
        if s.source.is_none() {
            return Err(AudioError::Unavailable("no source".into()));
        }
        s.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.0.borrow().paused
    }

    fn position(&self) -> Duration {
        self.0.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.0.borrow().duration
    }

    fn seek_to(&mut self, position: Duration) {
        self.0.borrow_mut().position = position;
    }

    fn set_volume(&mut self, volume: f64) {
        self.0.borrow_mut().volume = volume;
    }

    fn volume(&self) -> f64 {
        self.0.borrow().volume
    }

    fn release(&mut self) {
        let mut s = self.0.borrow_mut();
        s.paused = true;
        s.source = None;
        s.released = true;
    }
}

pub fn song(id: u64, title: &str) -> Song {
    Song::new(SongId::new(id), title, format!("https://cdn.example/{id}.mp3"))
        .with_artist("Test Artist")
        .with_duration("3:20")
}

/// Catalog [{1, "A"}, {2, "B"}, {3, "C"}]
pub fn abc_catalog() -> Vec<Song> {
    vec![song(1, "A"), song(2, "B"), song(3, "C")]
}

pub fn session_with_store(store: ListStore) -> (Session, FakeElement) {
    let element = FakeElement::new();
    let session = Session::new(
        &PlaybackConfig::default(),
        abc_catalog(),
        Box::new(element.clone()),
        store,
    );
    (session, element)
}

pub fn session() -> (Session, FakeElement) {
    session_with_store(ListStore::in_memory())
}

pub fn notify(session: &mut Session, id: u64, event: MediaEvent) {
    session.handle_media_event(MediaNotification::new(SongId::new(id), event));
}

pub fn current(session: &Session) -> Option<u64> {
    session.controller().current_song_id().map(SongId::get)
}

pub fn ids(songs: &[Song]) -> Vec<u64> {
    songs.iter().map(|s| s.id.get()).collect()
}
