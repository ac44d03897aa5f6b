//! View state types: `Cursor`, `ConnectionStatus`, `ViewState` and the
//! `ViewStateStore` that holds the current value.
//!
//! Nothing here validates or performs I/O. Keeping cursors well-formed is
//! the job of the reconciler and the playback controller.

use std::sync::Arc;

use crate::library::{LibrarySnapshot, Playlist, Track};

/// An identity-based reference to a playlist and optionally a track in it.
///
/// Cursors never hold positions; an index is derived from the filename only
/// when needed for arithmetic and dropped straight after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub playlist: Option<String>,
    pub track: Option<String>,
}

impl Cursor {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn at_playlist(playlist: impl Into<String>) -> Self {
        Self {
            playlist: Some(playlist.into()),
            track: None,
        }
    }

    pub fn at_track(playlist: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            playlist: Some(playlist.into()),
            track: Some(track.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_none() && self.track.is_none()
    }

    /// True if this cursor names exactly `playlist` / `track`.
    pub fn points_at(&self, playlist: &str, track: &str) -> bool {
        self.playlist.as_deref() == Some(playlist) && self.track.as_deref() == Some(track)
    }

    /// Resolve the playlist against `library`.
    pub fn resolve_playlist<'a>(&self, library: &'a LibrarySnapshot) -> Option<&'a Playlist> {
        self.playlist.as_deref().and_then(|name| library.playlist(name))
    }

    /// Resolve the track against `library`.
    pub fn resolve_track<'a>(&self, library: &'a LibrarySnapshot) -> Option<&'a Track> {
        let track = self.track.as_deref()?;
        self.resolve_playlist(library)?.track(track)
    }
}

/// State of the push connection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Open,
    ClosedPendingRetry,
}

/// Everything the render layer and the controller need to know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub browsing: Cursor,
    pub playing: Cursor,
    pub connection: ConnectionStatus,
    /// Last applied snapshot, kept for name lookups.
    pub library: Arc<LibrarySnapshot>,
}

impl ViewState {
    /// The playlist currently shown in the track pane.
    pub fn browsing_playlist(&self) -> Option<&Playlist> {
        self.browsing.resolve_playlist(&self.library)
    }

    /// The playlist currently playing.
    pub fn playing_playlist(&self) -> Option<&Playlist> {
        self.playing.resolve_playlist(&self.library)
    }

    pub fn playing_track(&self) -> Option<&Track> {
        self.playing.resolve_track(&self.library)
    }
}

/// Holder of the current `ViewState`.
///
/// Updates always swap in a complete new value through `replace`.
#[derive(Debug, Default)]
pub struct ViewStateStore {
    state: ViewState,
}

impl ViewStateStore {
    pub fn new(state: ViewState) -> Self {
        Self { state }
    }

    pub fn get(&self) -> &ViewState {
        &self.state
    }

    pub fn replace(&mut self, state: ViewState) {
        self.state = state;
    }
}
