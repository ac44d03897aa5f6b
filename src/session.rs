//! The single owner of view state.
//!
//! `Session` ties the store, the playback controller and the connection
//! supervisor together. The runtime feeds it one event at a time and every
//! handler runs to completion before the next event is looked at, which is
//! what keeps the two cursors from being corrupted by interleaved updates.

use std::time::Instant;

use crate::app::{ConnectionStatus, ViewState, ViewStateStore, reconcile};
use crate::connection::{ConnectionId, SocketEvent, Supervisor};
use crate::library::LibrarySnapshot;
use crate::playback::{MediaElement, MediaEvent, PlaybackController};

/// User-level requests coming from the key bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    SelectNextPlaylist,
    SelectPrevPlaylist,
    HighlightNext,
    HighlightPrev,
    /// Play the highlighted track of the browsing playlist (or its first track).
    PlayHighlighted,
    Play { playlist: String, filename: String },
    TogglePause,
    /// Skip to the next track of the playing playlist.
    Skip,
    Stop,
}

pub struct Session<M: MediaElement> {
    store: ViewStateStore,
    controller: PlaybackController<M>,
    supervisor: Supervisor,
}

impl<M: MediaElement> Session<M> {
    pub fn new(controller: PlaybackController<M>, supervisor: Supervisor) -> Self {
        let mut session = Self {
            store: ViewStateStore::default(),
            controller,
            supervisor,
        };
        session.sync_connection_status();
        session
    }

    pub fn state(&self) -> &ViewState {
        self.store.get()
    }

    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    pub fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }

    /// Reconcile the current state against a full snapshot.
    pub fn apply_snapshot(&mut self, snapshot: LibrarySnapshot) {
        let result = reconcile(self.store.get(), snapshot);
        self.store.replace(result.state);
        if result.stop_playback {
            log::info!("playing track disappeared from the library");
            self.controller.stop(&mut self.store);
        } else {
            self.controller.refresh_now_playing(&self.store);
        }
    }

    /// Begin the first push connection. The caller spawns the socket.
    pub fn start_connection(&mut self) -> ConnectionId {
        let id = self.supervisor.connect();
        self.sync_connection_status();
        id
    }

    pub fn on_socket_event(&mut self, event: SocketEvent, now: Instant) {
        match event {
            SocketEvent::Opened(id) => self.supervisor.on_opened(id),
            SocketEvent::Message(id, text) => {
                if let Some(snapshot) = self.supervisor.on_message(id, &text) {
                    self.apply_snapshot(snapshot);
                }
            }
            SocketEvent::Closed(id, reason) => {
                self.supervisor.on_closed(id, reason.as_deref(), now)
            }
        }
        self.sync_connection_status();
    }

    pub fn on_media_event(&mut self, event: MediaEvent, now: Instant) {
        self.controller.on_media_event(&mut self.store, event, now);
    }

    /// Fire due timers. Returns a connection id if a reconnect should be started.
    pub fn tick(&mut self, now: Instant) -> Option<ConnectionId> {
        self.controller.poll_cover(now);
        let reconnect = self.supervisor.poll_retry(now);
        self.sync_connection_status();
        reconnect
    }

    /// Earliest time `tick` has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.supervisor.next_deadline(), self.controller.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn handle(&mut self, command: Command, now: Instant) {
        match command {
            Command::Select(name) => self.controller.select(&mut self.store, &name),
            Command::SelectNextPlaylist => self.step_playlist(true),
            Command::SelectPrevPlaylist => self.step_playlist(false),
            Command::HighlightNext => self.controller.highlight_next(&mut self.store),
            Command::HighlightPrev => self.controller.highlight_prev(&mut self.store),
            Command::PlayHighlighted => {
                self.controller.play_browsing(&mut self.store, now);
            }
            Command::Play { playlist, filename } => {
                self.controller.play(&mut self.store, &playlist, &filename, now);
            }
            Command::TogglePause => self.controller.toggle_pause(),
            Command::Skip => self.controller.advance(&mut self.store, now),
            Command::Stop => self.controller.stop(&mut self.store),
        }
    }

    fn step_playlist(&mut self, forward: bool) {
        let state = self.store.get();
        let names = state.library.sorted_names();
        if names.is_empty() {
            return;
        }
        let len = names.len();
        let current = state
            .browsing
            .playlist
            .as_deref()
            .and_then(|p| names.iter().position(|n| *n == p));
        let idx = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(0), false) => len - 1,
            (Some(i), false) => i - 1,
            (None, _) => 0,
        };
        let name = names[idx].to_string();
        self.controller.select(&mut self.store, &name);
    }

    fn sync_connection_status(&mut self) {
        let status: ConnectionStatus = self.supervisor.status();
        if self.store.get().connection != status {
            let mut next = self.store.get().clone();
            next.connection = status;
            self.store.replace(next);
        }
    }
}

#[cfg(test)]
mod tests;
