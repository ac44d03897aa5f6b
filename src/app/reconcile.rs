//! Re-resolution of both cursors against a fresh library snapshot.
//!
//! Positions are unstable across snapshots (the server re-sorts, inserts and
//! deletes freely), so cursors are re-located strictly by playlist name and
//! track filename. Both cursors are resolved against the same snapshot in a
//! single pass.

use std::sync::Arc;

use crate::library::LibrarySnapshot;

use super::model::{Cursor, ViewState};

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub state: ViewState,
    /// The previously playing track is gone; the media element must be stopped.
    pub stop_playback: bool,
}

/// Derive the next `ViewState` from `previous` and a new `snapshot`.
pub fn reconcile(previous: &ViewState, snapshot: LibrarySnapshot) -> Reconciliation {
    let browsing = reconcile_browsing(&previous.browsing, &snapshot);
    let playing = reconcile_playing(&previous.playing, &snapshot);

    let stop_playback = previous.playing.track.is_some() && playing.track.is_none();

    Reconciliation {
        state: ViewState {
            browsing,
            playing,
            connection: previous.connection,
            library: Arc::new(snapshot),
        },
        stop_playback,
    }
}

fn reconcile_browsing(previous: &Cursor, snapshot: &LibrarySnapshot) -> Cursor {
    let kept = previous
        .playlist
        .as_deref()
        .and_then(|name| snapshot.playlist(name));

    match kept {
        Some(pl) => Cursor {
            playlist: Some(pl.name.clone()),
            track: previous
                .track
                .as_deref()
                .filter(|f| pl.track(f).is_some())
                .map(str::to_string),
        },
        // Fall back to the first playlist by name; the old highlight never carries over.
        None => match snapshot.first_name() {
            Some(first) => Cursor::at_playlist(first),
            None => Cursor::empty(),
        },
    }
}

fn reconcile_playing(previous: &Cursor, snapshot: &LibrarySnapshot) -> Cursor {
    let Some(pl) = previous
        .playlist
        .as_deref()
        .and_then(|name| snapshot.playlist(name))
    else {
        return Cursor::empty();
    };

    Cursor {
        playlist: Some(pl.name.clone()),
        track: previous
            .track
            .as_deref()
            .filter(|f| pl.track(f).is_some())
            .map(str::to_string),
    }
}
