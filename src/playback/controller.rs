use std::time::{Duration, Instant};

use crate::app::{Cursor, ViewStateStore};

use super::locator::StreamLocator;
use super::media::{LoadId, MediaElement, MediaEvent};
use super::now_playing::NowPlaying;

/// Display settings the controller needs.
#[derive(Debug, Clone)]
pub struct PlaybackOptions {
    /// Title shown when nothing is playing.
    pub placeholder_title: String,
    /// Delay between starting a track and swapping its cover in.
    pub cover_transition: Duration,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            placeholder_title: "Choose track".to_string(),
            cover_transition: Duration::from_millis(300),
        }
    }
}

/// Owns the media element and is the only place that starts, advances or
/// stops playback.
///
/// Every operation reads the current view state from the store and writes a
/// complete new one back. Requests naming playlists or tracks that are no
/// longer in the library are dropped; the next reconciliation fixes up
/// whatever stale UI produced them.
pub struct PlaybackController<M: MediaElement> {
    media: M,
    locator: StreamLocator,
    options: PlaybackOptions,
    now_playing: NowPlaying,
    current_load: Option<LoadId>,
    last_load: u64,
    paused: bool,
}

impl<M: MediaElement> PlaybackController<M> {
    pub fn new(media: M, locator: StreamLocator, options: PlaybackOptions) -> Self {
        let now_playing = NowPlaying::new(&options.placeholder_title);
        Self {
            media,
            locator,
            options,
            now_playing,
            current_load: None,
            last_load: 0,
            paused: false,
        }
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_loaded(&self) -> bool {
        self.current_load.is_some()
    }

    /// Show `playlist` in the track pane with nothing highlighted.
    pub fn select(&mut self, store: &mut ViewStateStore, playlist: &str) {
        let state = store.get();
        if !state.library.contains(playlist) {
            log::debug!("select: playlist {playlist:?} is gone, ignoring");
            return;
        }
        let mut next = state.clone();
        next.browsing = Cursor::at_playlist(playlist);
        store.replace(next);
    }

    /// Highlight `filename` in the browsing playlist.
    pub fn highlight(&mut self, store: &mut ViewStateStore, filename: &str) {
        let state = store.get();
        let Some(pl) = state.browsing_playlist() else {
            return;
        };
        if pl.track(filename).is_none() {
            log::debug!("highlight: {filename:?} not in {:?}, ignoring", pl.name);
            return;
        }
        let mut next = state.clone();
        next.browsing.track = Some(filename.to_string());
        store.replace(next);
    }

    /// Move the highlight one row down, wrapping to the top.
    pub fn highlight_next(&mut self, store: &mut ViewStateStore) {
        self.step_highlight(store, true);
    }

    /// Move the highlight one row up, wrapping to the bottom.
    pub fn highlight_prev(&mut self, store: &mut ViewStateStore) {
        self.step_highlight(store, false);
    }

    fn step_highlight(&mut self, store: &mut ViewStateStore, forward: bool) {
        let state = store.get();
        let Some(pl) = state.browsing_playlist() else {
            return;
        };
        let len = pl.tracks.len();
        if len == 0 {
            return;
        }

        let current = state.browsing.track.as_deref().and_then(|f| pl.position_of(f));
        let idx = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
            (None, false) => len - 1,
        };

        let filename = pl.tracks[idx].filename.clone();
        let mut next = state.clone();
        next.browsing.track = Some(filename);
        store.replace(next);
    }

    /// Start `filename` from `playlist`.
    ///
    /// Returns false without touching anything if either is missing from the
    /// current library.
    pub fn play(
        &mut self,
        store: &mut ViewStateStore,
        playlist: &str,
        filename: &str,
        now: Instant,
    ) -> bool {
        let state = store.get();
        let Some(track) = state.library.track(playlist, filename) else {
            log::debug!("play: {playlist:?}/{filename:?} is not in the library, ignoring");
            return false;
        };

        let url = self.locator.track_url(playlist, filename);
        self.last_load += 1;
        let id = LoadId(self.last_load);
        self.media.load(id, &url);
        self.media.play();
        self.current_load = Some(id);
        self.paused = false;

        self.now_playing
            .show(track, now + self.options.cover_transition);

        let mut next = state.clone();
        next.playing = Cursor::at_track(playlist, filename);
        // Keep the highlight on the playing row while watching the playing list.
        if next.browsing.playlist.as_deref() == Some(playlist) {
            next.browsing.track = Some(filename.to_string());
        }
        store.replace(next);

        log::info!("playing {playlist}/{filename} ({id})");
        true
    }

    /// Play the highlighted track of the browsing playlist, or its first
    /// track when nothing is highlighted.
    pub fn play_browsing(&mut self, store: &mut ViewStateStore, now: Instant) -> bool {
        let state = store.get();
        let Some(pl) = state.browsing_playlist() else {
            return false;
        };
        let filename = match state.browsing.track.as_deref() {
            Some(f) => f.to_string(),
            None => match pl.tracks.first() {
                Some(t) => t.filename.clone(),
                None => return false,
            },
        };
        let playlist = pl.name.clone();
        self.play(store, &playlist, &filename, now)
    }

    /// Move to the next track of the playing playlist, wrapping to the first.
    ///
    /// The browsing cursor is left alone except for the highlight rule in `play`.
    pub fn advance(&mut self, store: &mut ViewStateStore, now: Instant) {
        let state = store.get();
        if state.playing.track.is_none() {
            return;
        }
        let Some(pl) = state.playing_playlist() else {
            return;
        };
        let len = pl.tracks.len();
        if len == 0 {
            return;
        }

        let idx = match state.playing.track.as_deref().and_then(|f| pl.position_of(f)) {
            Some(i) => (i + 1) % len,
            None => 0,
        };

        let playlist = pl.name.clone();
        let filename = pl.tracks[idx].filename.clone();
        self.play(store, &playlist, &filename, now);
    }

    /// Silence the media element and clear the playing cursor.
    pub fn stop(&mut self, store: &mut ViewStateStore) {
        self.media.pause();
        self.media.clear();
        self.current_load = None;
        self.paused = false;
        self.now_playing.reset(&self.options.placeholder_title);

        let state = store.get();
        if !state.playing.is_empty() {
            let mut next = state.clone();
            next.playing = Cursor::empty();
            store.replace(next);
            log::info!("playback stopped");
        }
    }

    /// Re-read title and cover of the playing track from the current library.
    pub fn refresh_now_playing(&mut self, store: &ViewStateStore) {
        if self.current_load.is_none() {
            return;
        }
        if let Some(track) = store.get().playing_track() {
            self.now_playing.refresh(track);
        }
    }

    /// Pause or resume the loaded source. Cursors are not touched.
    pub fn toggle_pause(&mut self) {
        if self.current_load.is_none() {
            return;
        }
        if self.paused {
            self.media.play();
        } else {
            self.media.pause();
        }
        self.paused = !self.paused;
    }

    pub fn on_media_event(&mut self, store: &mut ViewStateStore, event: MediaEvent, now: Instant) {
        match event {
            MediaEvent::Ended(id) if Some(id) == self.current_load => {
                self.advance(store, now);
            }
            MediaEvent::Failed(id, reason) if Some(id) == self.current_load => {
                log::warn!("playback failed ({id}): {reason}");
                self.stop(store);
            }
            stale => {
                log::debug!("ignoring stale media event {stale:?}");
            }
        }
    }

    /// Apply a due cover swap. Returns true if anything visible changed.
    pub fn poll_cover(&mut self, now: Instant) -> bool {
        self.now_playing.poll(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.now_playing.next_deadline()
    }
}
