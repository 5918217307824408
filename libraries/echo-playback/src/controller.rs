//! Playback controller - transport orchestration
//!
//! Owns the audio handle, the current-song pointer and the list that
//! next/previous walk over. Every transport call absorbs its failures; the
//! outcome is observable through state queries and queued events.

use crate::{
    audio::{AudioHandle, MediaEvent, MediaNotification},
    error::{AudioError, PlaybackError, Result},
    events::{PlaybackEvent, SelectionId},
    types::{PlaybackConfig, PlaybackSnapshot, PlaybackState},
    volume::Volume,
};
use echo_core::{Song, SongId};

/// Central playback control
///
/// State machine:
/// - `Idle` -> `Loading` on song selection (and any state -> `Loading` on a new selection)
/// - `Loading` -> `Playing`/`Paused` once media data is ready
/// - `Playing` <-> `Paused` on transport calls and on the handle's own play/pause notifications
/// - `Loading` -> `Idle` when the resource fails to load
pub struct PlaybackController {
    // Transport state
    state: PlaybackState,
    current: Option<Song>,
    selection: Option<SelectionId>,
    selection_counter: u64,
    is_playing: bool,
    media_ready: bool,
    started: bool,
    progress_percent: f64,

    // Settings
    volume: Volume,
    autoplay: bool,
    user_interacted: bool,

    // List for next/previous
    active_list: Vec<Song>,

    // Exclusively owned output
    audio: Box<dyn AudioHandle>,
    released: bool,

    // Event queue for subscribers
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller driving `audio`
    pub fn new(config: &PlaybackConfig, mut audio: Box<dyn AudioHandle>) -> Self {
        let volume = Volume::new(config.initial_volume);
        audio.set_volume(volume.level());

        Self {
            state: PlaybackState::Idle,
            current: None,
            selection: None,
            selection_counter: 0,
            is_playing: false,
            media_ready: false,
            started: false,
            progress_percent: 0.0,
            volume,
            autoplay: config.autoplay,
            user_interacted: false,
            active_list: Vec::new(),
            audio,
            released: false,
            pending_events: Vec::new(),
        }
    }

    // ===== Song Selection =====

    /// Make a song from the active list current
    ///
    /// Loads the song into the audio handle. Playback starts on its own only
    /// if autoplay is enabled and the user has interacted with the session.
    /// Selecting the current song again restarts it as a new selection.
    ///
    /// Returns `false` (and changes nothing) if `id` is not in the active list.
    pub fn select_song(&mut self, id: SongId) -> bool {
        match self.find_in_active_list(id) {
            Ok(index) => {
                let song = self.active_list[index].clone();
                self.load_song(song);
                true
            }
            Err(e) => {
                tracing::debug!(song_id = %id, error = %e, "Ignoring song selection");
                false
            }
        }
    }

    /// Select a song as a direct user action (e.g. clicking a list row)
    pub fn play_song(&mut self, id: SongId) -> bool {
        if self.find_in_active_list(id).is_err() {
            tracing::debug!(song_id = %id, "Ignoring play request for unknown song");
            return false;
        }
        self.user_interacted = true;
        self.select_song(id)
    }

    /// Skip to the next song of the active list (wraps around)
    pub fn play_next(&mut self) {
        self.step(true);
    }

    /// Go to the previous song of the active list (wraps around)
    pub fn play_previous(&mut self) {
        self.step(false);
    }

    /// Continue with the next song after the current one finished
    pub fn on_track_ended(&mut self) {
        if let Some(song_id) = self.current_song_id() {
            self.emit(PlaybackEvent::TrackEnded { song_id });
        }
        self.progress_percent = 100.0;
        self.sync_play_state();
        self.play_next();
    }

    /// Replace the list that next/previous operate over
    ///
    /// The current song keeps playing even if it is not part of the new list.
    pub fn set_active_list(&mut self, songs: Vec<Song>) {
        self.active_list = songs;
        self.emit(PlaybackEvent::ActiveListChanged {
            length: self.active_list.len(),
        });
    }

    // ===== Playback Control =====

    /// Start or resume playback of the current song
    pub fn play(&mut self) {
        self.user_interacted = true;
        if self.current.is_none() {
            tracing::debug!("Play requested with no song selected");
            return;
        }
        self.request_play();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.audio.pause();
        self.sync_play_state();
    }

    /// Toggle between playing and paused
    ///
    /// Decides from the handle's actual paused flag, so pauses triggered
    /// outside the controller (media keys, other tabs) are respected.
    pub fn toggle_play_pause(&mut self) {
        if self.current.is_none() {
            return;
        }
        if self.audio.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    // ===== Seek =====

    /// Seek to a percentage (0-100) of the current song
    ///
    /// No-op while the duration is unknown.
    pub fn seek(&mut self, percent: f64) {
        if self.current.is_none() || percent.is_nan() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0);

        let Some(duration) = self.known_duration() else {
            tracing::debug!(percent, "Seek ignored, duration unknown");
            return;
        };

        self.audio.seek_to(duration.mul_f64(percent / 100.0));
        self.set_progress(percent);
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, level: f64) {
        if !self.volume.set_level(level) {
            tracing::debug!("Ignoring NaN volume");
            return;
        }
        self.apply_volume();
    }

    /// Mute, or restore the volume from before muting
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Media Notifications =====

    /// Apply an asynchronous notification from the audio handle
    ///
    /// Notifications tagged with another song than the current one are
    /// stale and dropped.
    pub fn handle_media_event(&mut self, notification: MediaNotification) {
        let MediaNotification { song_id, event } = notification;

        if self.current_song_id() != Some(song_id) {
            tracing::debug!(%song_id, ?event, "Dropping stale media notification");
            return;
        }

        match event {
            MediaEvent::LoadStart => {
                tracing::trace!(%song_id, "Load started");
            }
            MediaEvent::LoadedData => {
                self.media_ready = true;
                self.sync_play_state();
            }
            MediaEvent::TimeUpdate => self.update_progress(),
            MediaEvent::Play | MediaEvent::Pause => self.sync_play_state(),
            MediaEvent::Ended => self.on_track_ended(),
            MediaEvent::PlayRejected { reason } => self.on_play_blocked(song_id, reason),
            MediaEvent::LoadFailed { reason } => self.on_load_failed(song_id, reason),
        }
    }

    /// Stop playback and release the audio handle
    ///
    /// Idempotent. A later selection loads a new source into the handle.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.audio.release();
        self.current = None;
        self.selection = None;
        self.media_ready = false;
        self.apply_state(PlaybackState::Idle, false);
        tracing::debug!("Released audio handle");
    }

    // ===== State Queries =====

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get the current song
    pub fn current_song(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    /// Get the current song's id
    pub fn current_song_id(&self) -> Option<SongId> {
        self.current.as_ref().map(|s| s.id)
    }

    /// Get the current selection
    pub fn current_selection(&self) -> Option<SelectionId> {
        self.selection
    }

    /// Whether the handle last reported playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Progress through the current song (0-100)
    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    /// Current volume (0.0-1.0)
    pub fn volume(&self) -> f64 {
        self.volume.level()
    }

    /// Whether volume is at zero
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// List used by next/previous
    pub fn active_list(&self) -> &[Song] {
        &self.active_list
    }

    /// Whether a user gesture has been seen
    pub fn has_user_interacted(&self) -> bool {
        self.user_interacted
    }

    /// Whether the audio handle was released
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Snapshot for rendering
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            song: self.current.clone(),
            state: self.state,
            is_playing: self.is_playing,
            progress_percent: self.progress_percent,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn find_in_active_list(&self, id: SongId) -> Result<usize> {
        if self.active_list.is_empty() {
            return Err(PlaybackError::EmptyList);
        }
        self.active_list
            .iter()
            .position(|s| s.id == id)
            .ok_or(PlaybackError::SongNotInActiveList(id))
    }

    fn step(&mut self, forward: bool) {
        let len = self.active_list.len();
        if len == 0 {
            tracing::debug!("Active list is empty, nothing to skip to");
            return;
        }

        let current_index = self
            .current
            .as_ref()
            .and_then(|c| self.active_list.iter().position(|s| s.id == c.id));

        let target = match current_index {
            Some(_) if len == 1 => {
                tracing::debug!("Single-song list, staying on current song");
                return;
            }
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            // Current song not in this list: enter from the matching end
            None if forward => 0,
            None => len - 1,
        };

        self.user_interacted = true;
        let song = self.active_list[target].clone();
        self.load_song(song);
    }

    fn load_song(&mut self, song: Song) {
        let previous_song_id = self.current_song_id();
        self.selection_counter += 1;
        let selection = SelectionId::new(self.selection_counter);

        tracing::info!(song_id = %song.id, title = %song.title, %selection, "Selected song");

        self.audio.set_source(song.id, &song.music_url);
        self.current = Some(song.clone());
        self.selection = Some(selection);
        self.media_ready = false;
        self.started = false;
        self.released = false;

        self.emit(PlaybackEvent::SongChanged {
            selection,
            song,
            previous_song_id,
        });
        self.apply_state(PlaybackState::Loading, !self.audio.is_paused());
        self.set_progress(0.0);

        if self.autoplay && self.user_interacted {
            self.request_play();
        }
    }

    fn request_play(&mut self) {
        match self.audio.play() {
            Ok(()) => self.sync_play_state(),
            Err(AudioError::PlaybackBlocked(reason)) => {
                if let Some(song_id) = self.current_song_id() {
                    self.on_play_blocked(song_id, reason);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Audio handle refused to play");
                self.sync_play_state();
            }
        }
    }

    fn on_play_blocked(&mut self, song_id: SongId, reason: String) {
        tracing::warn!(%song_id, %reason, "Playback blocked, waiting for a user gesture");
        self.sync_play_state();
        self.emit(PlaybackEvent::PlaybackBlocked { song_id, reason });
    }

    fn on_load_failed(&mut self, song_id: SongId, reason: String) {
        tracing::warn!(%song_id, %reason, "Failed to load song");
        self.audio.pause();
        self.current = None;
        self.selection = None;
        self.media_ready = false;
        self.started = false;
        self.apply_state(PlaybackState::Idle, false);
        self.set_progress(0.0);
        self.emit(PlaybackEvent::PlaybackFailed { song_id, reason });
    }

    /// Adopt the handle's paused flag as ground truth
    fn sync_play_state(&mut self) {
        if self.current.is_none() {
            self.apply_state(PlaybackState::Idle, false);
            return;
        }

        let is_playing = !self.audio.is_paused();
        let state = match (self.media_ready, is_playing) {
            (true, true) => PlaybackState::Playing,
            (true, false) => PlaybackState::Paused,
            (false, _) => PlaybackState::Loading,
        };
        self.apply_state(state, is_playing);

        if state == PlaybackState::Playing && !self.started {
            self.started = true;
            if let (Some(selection), Some(song)) = (self.selection, self.current.clone()) {
                self.emit(PlaybackEvent::PlaybackStarted { selection, song });
            }
        }
    }

    fn apply_state(&mut self, state: PlaybackState, is_playing: bool) {
        if self.state != state || self.is_playing != is_playing {
            self.state = state;
            self.is_playing = is_playing;
            self.emit(PlaybackEvent::StateChanged { state, is_playing });
        }
    }

    fn known_duration(&self) -> Option<std::time::Duration> {
        self.audio.duration().filter(|d| !d.is_zero())
    }

    fn update_progress(&mut self) {
        let Some(duration) = self.known_duration() else {
            return;
        };
        let percent = (self.audio.position().as_secs_f64() / duration.as_secs_f64()) * 100.0;
        self.set_progress(percent.clamp(0.0, 100.0));
    }

    fn set_progress(&mut self, percent: f64) {
        if (self.progress_percent - percent).abs() > f64::EPSILON {
            self.progress_percent = percent;
            self.emit(PlaybackEvent::ProgressChanged { percent });
        }
    }

    fn apply_volume(&mut self) {
        self.audio.set_volume(self.volume.level());
        self.emit(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("current", &self.current_song_id())
            .field("selection", &self.selection)
            .field("is_playing", &self.is_playing)
            .field("progress_percent", &self.progress_percent)
            .field("volume", &self.volume)
            .field("active_list_len", &self.active_list.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::{MockAudio, MockState};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn song(id: u64) -> Song {
        Song::new(
            SongId::new(id),
            format!("Song {id}"),
            format!("https://cdn.example/{id}.mp3"),
        )
        .with_duration("3:00")
    }

    fn controller_with(config: &PlaybackConfig) -> (PlaybackController, Rc<RefCell<MockState>>) {
        let (audio, state) = MockAudio::new();
        let mut controller = PlaybackController::new(config, Box::new(audio));
        controller.set_active_list(vec![song(1), song(2), song(3)]);
        controller.drain_events();
        (controller, state)
    }

    fn controller() -> (PlaybackController, Rc<RefCell<MockState>>) {
        controller_with(&PlaybackConfig::default())
    }

    fn notify(controller: &mut PlaybackController, id: u64, event: MediaEvent) {
        controller.handle_media_event(MediaNotification::new(SongId::new(id), event));
    }

    #[test]
    fn test_new_controller_is_idle() {
        let (controller, audio) = controller();
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.current_song().is_none());
        assert!(!controller.is_playing());
        assert_eq!(controller.volume(), 1.0);
        assert_eq!(audio.borrow().volume, 1.0);
    }

    #[test]
    fn test_select_song_enters_loading_without_playing() {
        let (mut controller, audio) = controller();

        assert!(controller.select_song(SongId::new(2)));

        assert_eq!(controller.state(), PlaybackState::Loading);
        assert_eq!(controller.current_song_id(), Some(SongId::new(2)));
        assert_eq!(controller.progress_percent(), 0.0);
        assert_eq!(
            audio.borrow().source,
            Some((SongId::new(2), "https://cdn.example/2.mp3".to_string()))
        );
        // No user gesture yet
        assert_eq!(audio.borrow().play_calls, 0);
    }

    #[test]
    fn test_select_unknown_song_is_noop() {
        let (mut controller, audio) = controller();

        assert!(!controller.select_song(SongId::new(99)));

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(audio.borrow().source.is_none());
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn test_select_on_empty_list_is_noop() {
        let (audio, _) = MockAudio::new();
        let mut controller = PlaybackController::new(&PlaybackConfig::default(), Box::new(audio));

        assert!(!controller.select_song(SongId::new(1)));
        assert!(controller.current_song().is_none());
    }

    #[test]
    fn test_selection_ids_increase_even_for_same_song() {
        let (mut controller, _) = controller();

        controller.select_song(SongId::new(1));
        let first = controller.current_selection().unwrap();
        controller.select_song(SongId::new(1));
        let second = controller.current_selection().unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_song_changed_event_carries_previous_song() {
        let (mut controller, _) = controller();
        controller.select_song(SongId::new(1));
        controller.drain_events();

        controller.select_song(SongId::new(3));
        let events = controller.drain_events();

        let changed = events
            .iter()
            .find_map(|e| match e {
                PlaybackEvent::SongChanged {
                    song,
                    previous_song_id,
                    ..
                } => Some((song.id, *previous_song_id)),
                _ => None,
            })
            .unwrap();
        assert_eq!(changed, (SongId::new(3), Some(SongId::new(1))));
    }

    #[test]
    fn test_play_song_autoplays_after_gesture() {
        let (mut controller, audio) = controller();

        assert!(controller.play_song(SongId::new(2)));
        assert!(controller.has_user_interacted());
        assert_eq!(audio.borrow().play_calls, 1);
        assert!(controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Loading);

        notify(&mut controller, 2, MediaEvent::LoadedData);
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_autoplay_disabled_waits_for_play() {
        let config = PlaybackConfig {
            autoplay: false,
            ..PlaybackConfig::default()
        };
        let (mut controller, audio) = controller_with(&config);

        controller.play_song(SongId::new(1));
        assert_eq!(audio.borrow().play_calls, 0);

        notify(&mut controller, 1, MediaEvent::LoadedData);
        assert_eq!(controller.state(), PlaybackState::Paused);

        controller.play();
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_playback_started_emitted_once_per_selection() {
        let (mut controller, _) = controller();
        controller.play_song(SongId::new(1));
        notify(&mut controller, 1, MediaEvent::LoadedData);
        controller.pause();
        controller.play();

        let started = controller
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PlaybackEvent::PlaybackStarted { .. }))
            .count();
        assert_eq!(started, 1);
    }

    #[test]
    fn test_play_without_song_is_noop() {
        let (mut controller, audio) = controller();

        controller.play();

        assert_eq!(audio.borrow().play_calls, 0);
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.has_user_interacted());
    }

    #[test]
    fn test_toggle_play_pause_reads_handle_flag() {
        let (mut controller, audio) = controller();
        controller.play_song(SongId::new(1));
        notify(&mut controller, 1, MediaEvent::LoadedData);
        assert!(controller.is_playing());

        // Paused from outside the controller, no notification yet
        audio.borrow_mut().paused = true;

        controller.toggle_play_pause();
        assert!(!audio.borrow().paused);
        assert!(controller.is_playing());

        controller.toggle_play_pause();
        assert!(audio.borrow().paused);
        assert_eq!(controller.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_external_pause_notification_resyncs() {
        let (mut controller, audio) = controller();
        controller.play_song(SongId::new(1));
        notify(&mut controller, 1, MediaEvent::LoadedData);

        audio.borrow_mut().paused = true;
        notify(&mut controller, 1, MediaEvent::Pause);

        assert!(!controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Paused);

        audio.borrow_mut().paused = false;
        notify(&mut controller, 1, MediaEvent::Play);
        assert!(controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_stale_notifications_are_dropped() {
        let (mut controller, _) = controller();
        controller.play_song(SongId::new(1));
        controller.play_song(SongId::new(2));
        controller.drain_events();

        notify(&mut controller, 1, MediaEvent::LoadedData);
        notify(&mut controller, 1, MediaEvent::Ended);
        notify(&mut controller, 1, MediaEvent::LoadFailed { reason: "404".into() });

        assert_eq!(controller.current_song_id(), Some(SongId::new(2)));
        assert_eq!(controller.state(), PlaybackState::Loading);
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn test_autoplay_blocked_is_absorbed() {
        let (mut controller, audio) = controller();
        audio.borrow_mut().block_play = true;

        controller.play_song(SongId::new(1));

        assert!(!controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Loading);
        assert!(controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::PlaybackBlocked { .. })));

        notify(&mut controller, 1, MediaEvent::LoadedData);
        assert_eq!(controller.state(), PlaybackState::Paused);

        // A later gesture succeeds
        audio.borrow_mut().block_play = false;
        controller.play();
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_late_play_rejection_pauses() {
        let (mut controller, audio) = controller();
        controller.play_song(SongId::new(1));
        notify(&mut controller, 1, MediaEvent::LoadedData);

        audio.borrow_mut().paused = true;
        notify(
            &mut controller,
            1,
            MediaEvent::PlayRejected {
                reason: "NotAllowedError".into(),
            },
        );

        assert!(!controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_load_failure_returns_to_idle() {
        let (mut controller, _) = controller();
        controller.play_song(SongId::new(3));

        notify(
            &mut controller,
            3,
            MediaEvent::LoadFailed {
                reason: "unsupported format".into(),
            },
        );

        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.current_song().is_none());
        assert!(!controller.is_playing());
        assert!(controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::PlaybackFailed { .. })));
    }

    #[test]
    fn test_time_update_sets_progress() {
        let (mut controller, audio) = controller();
        controller.play_song(SongId::new(1));
        {
            let mut a = audio.borrow_mut();
            a.duration = Some(Duration::from_secs(200));
            a.position = Duration::from_secs(50);
        }

        notify(&mut controller, 1, MediaEvent::TimeUpdate);

        assert!((controller.progress_percent() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_update_without_duration_is_ignored() {
        let (mut controller, audio) = controller();
        controller.play_song(SongId::new(1));
        audio.borrow_mut().position = Duration::from_secs(10);

        notify(&mut controller, 1, MediaEvent::TimeUpdate);

        assert_eq!(controller.progress_percent(), 0.0);
    }

    #[test]
    fn test_seek_converts_percent_to_position() {
        let (mut controller, audio) = controller();
        controller.select_song(SongId::new(1));
        audio.borrow_mut().duration = Some(Duration::from_secs(180));

        controller.seek(50.0);
        assert_eq!(audio.borrow().position, Duration::from_secs(90));
        assert_eq!(controller.progress_percent(), 50.0);

        controller.seek(250.0);
        assert_eq!(audio.borrow().position, Duration::from_secs(180));
        assert_eq!(controller.progress_percent(), 100.0);
    }

    #[test]
    fn test_seek_without_duration_is_noop() {
        let (mut controller, audio) = controller();
        controller.select_song(SongId::new(1));

        controller.seek(40.0);
        assert_eq!(audio.borrow().position, Duration::ZERO);

        audio.borrow_mut().duration = Some(Duration::ZERO);
        controller.seek(40.0);
        assert_eq!(controller.progress_percent(), 0.0);
    }

    #[test]
    fn test_seek_without_song_is_noop() {
        let (mut controller, audio) = controller();
        audio.borrow_mut().duration = Some(Duration::from_secs(100));

        controller.seek(10.0);

        assert_eq!(audio.borrow().position, Duration::ZERO);
    }

    #[test]
    fn test_volume_is_clamped_and_applied() {
        let (mut controller, audio) = controller();

        controller.set_volume(0.4);
        assert_eq!(audio.borrow().volume, 0.4);

        controller.set_volume(1.7);
        assert_eq!(controller.volume(), 1.0);

        controller.set_volume(-2.0);
        assert_eq!(controller.volume(), 0.0);

        controller.set_volume(f64::NAN);
        assert_eq!(controller.volume(), 0.0);
    }

    #[test]
    fn test_mute_round_trip_restores_volume() {
        let (mut controller, audio) = controller();
        controller.set_volume(0.7);

        controller.toggle_mute();
        assert!(controller.is_muted());
        assert_eq!(audio.borrow().volume, 0.0);

        controller.toggle_mute();
        assert_eq!(controller.volume(), 0.7);
        assert_eq!(audio.borrow().volume, 0.7);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let (mut controller, _) = controller();
        controller.select_song(SongId::new(2));

        controller.play_next();
        assert_eq!(controller.current_song_id(), Some(SongId::new(3)));
        controller.play_next();
        assert_eq!(controller.current_song_id(), Some(SongId::new(1)));
        controller.play_previous();
        assert_eq!(controller.current_song_id(), Some(SongId::new(3)));
        assert!(controller.has_user_interacted());
    }

    #[test]
    fn test_next_on_empty_list_is_noop() {
        let (audio, _) = MockAudio::new();
        let mut controller = PlaybackController::new(&PlaybackConfig::default(), Box::new(audio));

        controller.play_next();
        controller.play_previous();

        assert!(controller.current_song().is_none());
        assert!(!controller.has_user_interacted());
    }

    #[test]
    fn test_single_song_list_stays_put() {
        let (mut controller, _) = controller();
        controller.set_active_list(vec![song(7)]);
        controller.select_song(SongId::new(7));
        let selection = controller.current_selection();

        controller.play_next();
        controller.play_previous();

        assert_eq!(controller.current_song_id(), Some(SongId::new(7)));
        assert_eq!(controller.current_selection(), selection);
    }

    #[test]
    fn test_current_song_outside_list_enters_from_ends() {
        let (mut controller, _) = controller();
        controller.select_song(SongId::new(1));
        controller.set_active_list(vec![song(10), song(11), song(12)]);

        // Switching lists keeps the current song
        assert_eq!(controller.current_song_id(), Some(SongId::new(1)));

        controller.play_next();
        assert_eq!(controller.current_song_id(), Some(SongId::new(10)));

        controller.set_active_list(vec![song(20), song(21)]);
        controller.play_previous();
        assert_eq!(controller.current_song_id(), Some(SongId::new(21)));
    }

    #[test]
    fn test_ended_advances_to_next_song() {
        let (mut controller, audio) = controller();
        controller.play_song(SongId::new(3));
        notify(&mut controller, 3, MediaEvent::LoadedData);
        controller.drain_events();

        audio.borrow_mut().paused = true;
        notify(&mut controller, 3, MediaEvent::Ended);

        assert_eq!(controller.current_song_id(), Some(SongId::new(1)));
        // Continuous playback
        assert!(!audio.borrow().paused);
        let events = controller.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::TrackEnded { song_id } if *song_id == SongId::new(3))));
    }

    #[test]
    fn test_release_is_idempotent() {
        let (mut controller, audio) = controller();
        controller.play_song(SongId::new(1));

        controller.release();
        controller.release();

        assert!(audio.borrow().released);
        assert!(controller.is_released());
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(controller.current_song().is_none());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut controller, _) = controller();
        controller.play_song(SongId::new(2));
        controller.toggle_mute();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.song.map(|s| s.id), Some(SongId::new(2)));
        assert_eq!(snapshot.state, PlaybackState::Loading);
        assert!(snapshot.is_playing);
        assert!(snapshot.muted);
        assert_eq!(snapshot.volume, 0.0);
    }
}
