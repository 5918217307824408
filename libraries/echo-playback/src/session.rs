//! Session context
//!
//! Ties one [`PlaybackController`] to the [`ListProjections`] and to the
//! catalog, and fans events out to subscribers. Constructed explicitly by
//! the host and shut down explicitly (or on drop).

use crate::{
    audio::{AudioHandle, MediaNotification},
    controller::PlaybackController,
    events::PlaybackEvent,
    projections::ListProjections,
    types::{PlaybackConfig, PlaybackSnapshot},
};
use echo_core::{ActiveView, Song, SongId};
use echo_storage::ListStore;
use serde::Serialize;

/// Events published to session subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Forwarded controller event
    Playback {
        /// The controller event
        event: PlaybackEvent,
    },

    /// Favorites list changed
    FavoritesChanged {
        /// Favorites after the change
        favorites: Vec<Song>,
    },

    /// Active view switched
    ViewChanged {
        /// New view
        view: ActiveView,
        /// Number of songs in the view
        length: usize,
    },
}

/// Handle returned by [`Session::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SessionEvent)>;

/// The single live playback session of an application instance
pub struct Session {
    controller: PlaybackController,
    projections: ListProjections,
    catalog: Vec<Song>,
    view: ActiveView,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    closed: bool,
}

impl Session {
    /// Create a session over `catalog`, starting in the catalog view
    pub fn new(
        config: &PlaybackConfig,
        catalog: Vec<Song>,
        audio: Box<dyn AudioHandle>,
        store: ListStore,
    ) -> Self {
        let mut controller = PlaybackController::new(config, audio);
        controller.set_active_list(catalog.clone());
        controller.drain_events();

        tracing::info!(songs = catalog.len(), "Session started");

        Self {
            controller,
            projections: ListProjections::new(store, config),
            catalog,
            view: ActiveView::Catalog,
            subscribers: Vec::new(),
            next_subscription: 0,
            closed: false,
        }
    }

    // ===== Views =====

    /// Switch the list that next/previous walk over
    ///
    /// Persisted views are snapshotted at the time of the switch. The
    /// current song keeps playing.
    pub fn set_active_view(&mut self, view: ActiveView) {
        let songs = self.songs_for(view);
        let length = songs.len();
        tracing::info!(%view, length, "Active view changed");

        self.view = view;
        self.controller.set_active_list(songs);
        self.pump();
        self.publish(&SessionEvent::ViewChanged { view, length });
    }

    /// Currently active view
    pub fn active_view(&self) -> ActiveView {
        self.view
    }

    /// Songs of the active view
    pub fn active_list(&self) -> &[Song] {
        self.controller.active_list()
    }

    /// The read-only catalog
    pub fn catalog(&self) -> &[Song] {
        &self.catalog
    }

    // ===== Transport =====

    /// See [`PlaybackController::select_song`]
    pub fn select_song(&mut self, id: SongId) -> bool {
        let selected = self.controller.select_song(id);
        self.pump();
        selected
    }

    /// See [`PlaybackController::play_song`]
    pub fn play_song(&mut self, id: SongId) -> bool {
        let selected = self.controller.play_song(id);
        self.pump();
        selected
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        self.controller.play();
        self.pump();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.controller.pause();
        self.pump();
    }

    /// Toggle between playing and paused
    pub fn toggle_play_pause(&mut self) {
        self.controller.toggle_play_pause();
        self.pump();
    }

    /// Seek to a percentage of the current song
    pub fn seek(&mut self, percent: f64) {
        self.controller.seek(percent);
        self.pump();
    }

    /// Set volume (0.0-1.0)
    pub fn set_volume(&mut self, level: f64) {
        self.controller.set_volume(level);
        self.pump();
    }

    /// Mute or restore volume
    pub fn toggle_mute(&mut self) {
        self.controller.toggle_mute();
        self.pump();
    }

    /// Skip to the next song of the active view
    pub fn play_next(&mut self) {
        self.controller.play_next();
        self.pump();
    }

    /// Go to the previous song of the active view
    pub fn play_previous(&mut self) {
        self.controller.play_previous();
        self.pump();
    }

    /// Feed an audio handle notification into the session
    pub fn handle_media_event(&mut self, notification: MediaNotification) {
        self.controller.handle_media_event(notification);
        self.pump();
    }

    // ===== Favorites =====

    /// Toggle a song's favorite status
    ///
    /// Returns the new status, or `None` if `id` is unknown.
    pub fn toggle_favorite(&mut self, id: SongId) -> Option<bool> {
        let Some(song) = self.resolve_song(id) else {
            tracing::debug!(song_id = %id, "Cannot toggle favorite of unknown song");
            return None;
        };

        let now_favorite = self.projections.toggle_favorite(&song);

        if self.view == ActiveView::Favorites {
            self.controller
                .set_active_list(self.projections.favorites().to_vec());
            self.pump();
        }

        self.publish(&SessionEvent::FavoritesChanged {
            favorites: self.projections.favorites().to_vec(),
        });
        Some(now_favorite)
    }

    /// Toggle the current song's favorite status
    pub fn toggle_current_favorite(&mut self) -> Option<bool> {
        let id = self.controller.current_song_id()?;
        self.toggle_favorite(id)
    }

    /// Check whether a song is a favorite
    pub fn is_favorite(&self, id: SongId) -> bool {
        self.projections.is_favorite(id)
    }

    // ===== Projections =====

    /// Current favorites
    pub fn favorites(&self) -> &[Song] {
        self.projections.favorites()
    }

    /// Recently played, most recent first
    pub fn recently_played(&self) -> Vec<Song> {
        self.projections.recently_played()
    }

    /// Songs ranked by play count
    pub fn top_played(&self) -> Vec<Song> {
        self.projections.top_played()
    }

    /// Play count of a song
    pub fn play_count(&self, id: SongId) -> u32 {
        self.projections.play_count(id)
    }

    // ===== State =====

    /// Transport snapshot
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    /// Read access to the controller
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Whether [`Session::shutdown`] already ran
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ===== Subscriptions =====

    /// Register a callback for session events
    pub fn subscribe(&mut self, callback: impl FnMut(&SessionEvent) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    // ===== Lifecycle =====

    /// Release the audio handle and notify subscribers of the final state
    pub fn shutdown(mut self) {
        self.close();
        self.pump();
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.controller.release();
        tracing::info!("Session closed");
    }

    // ===== Internals =====

    fn songs_for(&self, view: ActiveView) -> Vec<Song> {
        match view {
            ActiveView::Catalog => self.catalog.clone(),
            ActiveView::RecentlyPlayed => self.projections.recently_played(),
            ActiveView::TopPlayed => self.projections.top_played(),
            ActiveView::Favorites => self.projections.favorites().to_vec(),
        }
    }

    fn resolve_song(&self, id: SongId) -> Option<Song> {
        self.controller
            .current_song()
            .filter(|s| s.id == id)
            .or_else(|| self.catalog.iter().find(|s| s.id == id))
            .or_else(|| self.controller.active_list().iter().find(|s| s.id == id))
            .cloned()
    }

    /// Route queued controller events to the projections, then publish them
    fn pump(&mut self) {
        for event in self.controller.drain_events() {
            match &event {
                PlaybackEvent::SongChanged {
                    selection, song, ..
                } => {
                    self.projections.record_selection(*selection, song);
                }
                PlaybackEvent::PlaybackStarted { selection, song } => {
                    self.projections.record_playback_started(*selection, song);
                }
                _ => {}
            }
            self.publish(&SessionEvent::Playback { event });
        }
    }

    fn publish(&mut self, event: &SessionEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("controller", &self.controller)
            .field("view", &self.view)
            .field("catalog_len", &self.catalog.len())
            .field("subscribers", &self.subscribers.len())
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::MockAudio;
    use crate::audio::MediaEvent;
    use crate::types::{PlayCountPolicy, PlaybackState};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn catalog() -> Vec<Song> {
        ["A", "B", "C"]
            .iter()
            .zip(1u64..)
            .map(|(title, id)| {
                Song::new(SongId::new(id), *title, format!("https://cdn.example/{id}.mp3"))
                    .with_artist("Artist")
                    .with_duration("3:30")
            })
            .collect()
    }

    fn session_with(config: &PlaybackConfig) -> (Session, Rc<RefCell<crate::audio::mock::MockState>>) {
        let (audio, state) = MockAudio::new();
        let session = Session::new(config, catalog(), Box::new(audio), ListStore::in_memory());
        (session, state)
    }

    fn session() -> (Session, Rc<RefCell<crate::audio::mock::MockState>>) {
        session_with(&PlaybackConfig::default())
    }

    fn ids(songs: &[Song]) -> Vec<u64> {
        songs.iter().map(|s| s.id.get()).collect()
    }

    #[test]
    fn test_starts_on_catalog_view() {
        let (session, _) = session();
        assert_eq!(session.active_view(), ActiveView::Catalog);
        assert_eq!(ids(session.active_list()), vec![1, 2, 3]);
        assert!(session.recently_played().is_empty());
    }

    #[test]
    fn test_next_wraps_over_catalog() {
        let (mut session, _) = session();

        session.select_song(SongId::new(2));
        session.play_next();
        assert_eq!(session.controller().current_song_id(), Some(SongId::new(3)));
        session.play_next();
        assert_eq!(session.controller().current_song_id(), Some(SongId::new(1)));
    }

    #[test]
    fn test_selection_updates_recent_and_top() {
        let (mut session, _) = session();

        session.select_song(SongId::new(1));
        session.select_song(SongId::new(2));
        session.select_song(SongId::new(1));

        assert_eq!(ids(&session.recently_played()), vec![1, 2]);
        let top = session.top_played();
        assert_eq!(ids(&top), vec![1, 2]);
        assert_eq!(top[0].play_count, Some(2));
        assert_eq!(top[1].play_count, Some(1));
    }

    #[test]
    fn test_same_song_three_times_counts_three() {
        let (mut session, _) = session();

        for _ in 0..3 {
            session.select_song(SongId::new(1));
        }

        let top = session.top_played();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, SongId::new(1));
        assert_eq!(top[0].play_count, Some(3));
    }

    #[test]
    fn test_playback_start_policy_ignores_blocked_selections() {
        let config = PlaybackConfig {
            play_count_policy: PlayCountPolicy::OnPlaybackStart,
            ..PlaybackConfig::default()
        };
        let (mut session, audio) = session_with(&config);
        audio.borrow_mut().block_play = true;

        session.play_song(SongId::new(1));
        session.handle_media_event(MediaNotification::new(SongId::new(1), MediaEvent::LoadedData));
        assert_eq!(session.play_count(SongId::new(1)), 0);
        assert_eq!(ids(&session.recently_played()), vec![1]);

        audio.borrow_mut().block_play = false;
        session.play();
        assert_eq!(session.snapshot().state, PlaybackState::Playing);
        assert_eq!(session.play_count(SongId::new(1)), 1);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let (mut session, _) = session();

        assert_eq!(session.toggle_favorite(SongId::new(1)), Some(true));
        assert_eq!(ids(session.favorites()), vec![1]);
        assert!(session.is_favorite(SongId::new(1)));

        assert_eq!(session.toggle_favorite(SongId::new(1)), Some(false));
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_toggle_unknown_favorite() {
        let (mut session, _) = session();
        assert_eq!(session.toggle_favorite(SongId::new(42)), None);
        assert_eq!(session.toggle_current_favorite(), None);
    }

    #[test]
    fn test_toggle_current_favorite() {
        let (mut session, _) = session();
        session.select_song(SongId::new(3));

        assert_eq!(session.toggle_current_favorite(), Some(true));
        assert!(session.is_favorite(SongId::new(3)));
    }

    #[test]
    fn test_favorites_view_refreshes_on_toggle() {
        let (mut session, _) = session();
        session.toggle_favorite(SongId::new(1));
        session.toggle_favorite(SongId::new(2));

        session.set_active_view(ActiveView::Favorites);
        assert_eq!(ids(session.active_list()), vec![1, 2]);

        session.toggle_favorite(SongId::new(1));
        assert_eq!(ids(session.active_list()), vec![2]);
    }

    #[test]
    fn test_view_switch_keeps_current_song() {
        let (mut session, _) = session();
        session.play_song(SongId::new(2));
        session.play_song(SongId::new(3));

        session.set_active_view(ActiveView::RecentlyPlayed);

        assert_eq!(ids(session.active_list()), vec![3, 2]);
        assert_eq!(session.controller().current_song_id(), Some(SongId::new(3)));

        session.play_next();
        assert_eq!(session.controller().current_song_id(), Some(SongId::new(2)));
    }

    #[test]
    fn test_subscribers_receive_events_in_order() {
        let (mut session, _) = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.subscribe(move |event| {
            let name = match event {
                SessionEvent::Playback { event } => event.name(),
                SessionEvent::FavoritesChanged { .. } => "favoritesChanged",
                SessionEvent::ViewChanged { .. } => "viewChanged",
            };
            sink.borrow_mut().push(name);
        });

        session.select_song(SongId::new(1));
        session.toggle_favorite(SongId::new(1));

        let seen = seen.borrow();
        assert_eq!(seen.first(), Some(&"songChanged"));
        assert_eq!(seen.last(), Some(&"favoritesChanged"));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let (mut session, _) = session();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let id = session.subscribe(move |_| *sink.borrow_mut() += 1);

        session.set_volume(0.5);
        let after_first = *count.borrow();
        assert!(after_first > 0);

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.set_volume(0.2);
        assert_eq!(*count.borrow(), after_first);
    }

    #[test]
    fn test_shutdown_releases_audio() {
        let (mut session, audio) = session();
        session.play_song(SongId::new(1));

        session.shutdown();

        assert!(audio.borrow().released);
    }

    #[test]
    fn test_drop_releases_audio() {
        let (session, audio) = session();
        drop(session);
        assert!(audio.borrow().released);
    }
}
