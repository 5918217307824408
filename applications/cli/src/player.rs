//! Interactive player
//!
//! Owns the session and the host side of the simulated element, runs
//! commands and pumps element notifications into the session until it is
//! quiescent.

use crate::{audio::SimulatedAudio, command::Command, command::HELP, config::AppConfig};
use crate::error::Result;
use echo_core::Song;
use echo_playback::{PlaybackEvent, PlaybackState, Session, SessionEvent};
use echo_storage::{FileStore, ListStore, MemoryStore};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Outcome of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Player {
    session: Session,
    audio: SimulatedAudio,
    messages: Rc<RefCell<Vec<String>>>,
}

impl Player {
    /// Build a player with device lists stored under `config.data_dir`
    pub fn open(config: &AppConfig, catalog: Vec<Song>) -> Result<Self> {
        let device = FileStore::open(&config.data_dir)?;
        let store = ListStore::new(Box::new(MemoryStore::new()), Box::new(device));
        Ok(Self::with_store(config, catalog, store))
    }

    /// Build a player over an arbitrary list store
    pub fn with_store(config: &AppConfig, catalog: Vec<Song>, store: ListStore) -> Self {
        let audio = SimulatedAudio::new(&catalog, config.block_autoplay);
        let mut session = Session::new(&config.playback, catalog, Box::new(audio.clone()), store);

        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&messages);
        session.subscribe(move |event| {
            if let Some(line) = describe(event) {
                sink.borrow_mut().push(line);
            }
        });

        Self {
            session,
            audio,
            messages,
        }
    }

    /// Run one command; returns the lines to print
    pub fn execute(&mut self, command: Command) -> (Flow, Vec<String>) {
        let mut out = Vec::new();

        match command {
            Command::List => out.extend(self.render_list(self.session.active_list())),
            Command::View(view) => {
                self.session.set_active_view(view);
                out.extend(self.render_list(self.session.active_list()));
            }
            Command::Select(id) => {
                if !self.session.select_song(id) {
                    out.push(format!("Song {id} is not in the {} view", self.session.active_view()));
                }
            }
            Command::Play(Some(id)) => {
                if !self.session.play_song(id) {
                    out.push(format!("Song {id} is not in the {} view", self.session.active_view()));
                }
            }
            Command::Play(None) => self.session.play(),
            Command::Pause => self.session.pause(),
            Command::Toggle => self.session.toggle_play_pause(),
            Command::Next => self.session.play_next(),
            Command::Prev => self.session.play_previous(),
            Command::Seek(percent) => self.session.seek(percent),
            Command::Volume(level) => self.session.set_volume(level),
            Command::Mute => self.session.toggle_mute(),
            Command::Fav(id) => {
                let result = match id {
                    Some(id) => self.session.toggle_favorite(id),
                    None => self.session.toggle_current_favorite(),
                };
                if result.is_none() {
                    out.push("No such song".to_string());
                }
            }
            Command::Favorites => out.extend(self.render_list(self.session.favorites())),
            Command::Recent => out.extend(self.render_list(&self.session.recently_played())),
            Command::Top => out.extend(self.render_list(&self.session.top_played())),
            Command::Tick(elapsed) => self.tick(elapsed),
            Command::Status => out.push(self.status_line()),
            Command::Help => out.push(HELP.to_string()),
            Command::Quit => return (Flow::Quit, out),
        }

        self.pump();
        let mut lines = std::mem::take(&mut *self.messages.borrow_mut());
        lines.extend(out);
        (Flow::Continue, lines)
    }

    /// The now-playing line
    pub fn status_line(&self) -> String {
        let snapshot = self.session.snapshot();
        let Some(song) = snapshot.song else {
            return format!("[idle] volume {:.2}", snapshot.volume);
        };

        let favorite = if self.session.is_favorite(song.id) { " *" } else { "" };
        format!(
            "[{}] {} - {}{}  {:.1}%  volume {:.2}{}",
            snapshot.state,
            song.title,
            artist(&song),
            favorite,
            snapshot.progress_percent,
            snapshot.volume,
            if snapshot.muted { " (muted)" } else { "" },
        )
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn audio(&self) -> &SimulatedAudio {
        &self.audio
    }

    /// Release the audio element
    pub fn shutdown(self) {
        self.session.shutdown();
    }

    fn tick(&mut self, elapsed: Duration) {
        // Whole seconds, like a media element's timeupdate cadence.
        // Time stops mattering once nothing is playing.
        let mut remaining = elapsed;
        while !remaining.is_zero() && self.audio.is_playing() {
            let step = remaining.min(Duration::from_secs(1));
            remaining -= step;
            self.audio.advance(step);
            self.pump();
        }
    }

    fn pump(&mut self) {
        while let Some(notification) = self.audio.next_notification() {
            self.session.handle_media_event(notification);
        }
    }

    fn render_list(&self, songs: &[Song]) -> Vec<String> {
        if songs.is_empty() {
            return vec!["(empty)".to_string()];
        }
        let current = self.session.controller().current_song_id();
        songs
            .iter()
            .map(|song| {
                let marker = if Some(song.id) == current { '>' } else { ' ' };
                let plays = song
                    .play_count
                    .map(|n| format!("  ({n} plays)"))
                    .unwrap_or_default();
                format!(
                    "{marker} {:>3}  {} - {}  {}{plays}",
                    song.id,
                    song.title,
                    artist(song),
                    song.duration
                )
            })
            .collect()
    }
}

fn artist(song: &Song) -> &str {
    if song.artist_name.is_empty() {
        "Unknown Artist"
    } else {
        &song.artist_name
    }
}

fn describe(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::Playback { event } => match event {
            PlaybackEvent::SongChanged { song, .. } => {
                Some(format!("Now playing: {} - {}", song.title, artist(song)))
            }
            PlaybackEvent::StateChanged {
                state: PlaybackState::Paused,
                ..
            } => Some("Paused".to_string()),
            PlaybackEvent::PlaybackBlocked { .. } => {
                Some("Playback blocked until you interact (try 'play')".to_string())
            }
            PlaybackEvent::PlaybackFailed { reason, .. } => {
                Some(format!("Could not load song: {reason}"))
            }
            _ => None,
        },
        SessionEvent::FavoritesChanged { favorites } => {
            Some(format!("Favorites: {} songs", favorites.len()))
        }
        SessionEvent::ViewChanged { .. } => None,
    }
}
