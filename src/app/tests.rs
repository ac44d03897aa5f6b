use super::*;
use crate::library::{LibrarySnapshot, Playlist, Track};
use std::sync::Arc;

fn t(filename: &str) -> Track {
    Track {
        filename: filename.into(),
        title: None,
        duration: None,
        cover: None,
    }
}

fn snap(playlists: &[(&str, &[&str])]) -> LibrarySnapshot {
    LibrarySnapshot::from_playlists(playlists.iter().map(|(name, files)| Playlist {
        name: (*name).into(),
        tracks: files.iter().map(|f| t(f)).collect(),
    }))
}

fn state(browsing: Cursor, playing: Cursor, library: LibrarySnapshot) -> ViewState {
    ViewState {
        browsing,
        playing,
        connection: ConnectionStatus::Open,
        library: Arc::new(library),
    }
}

#[test]
fn initial_state_falls_back_to_first_playlist_by_name() {
    let r = reconcile(&ViewState::default(), snap(&[("zeta", &[]), ("alpha", &["a.mp3"])]));

    assert_eq!(r.state.browsing, Cursor::at_playlist("alpha"));
    assert!(r.state.playing.is_empty());
    assert!(!r.stop_playback);
}

#[test]
fn empty_snapshot_collapses_both_cursors_and_requests_stop() {
    let prev = state(
        Cursor::at_track("P", "a.mp3"),
        Cursor::at_track("P", "a.mp3"),
        snap(&[("P", &["a.mp3"])]),
    );

    let r = reconcile(&prev, LibrarySnapshot::new());
    assert!(r.state.browsing.is_empty());
    assert!(r.state.playing.is_empty());
    assert!(r.stop_playback);
}

#[test]
fn reconcile_is_idempotent() {
    let library = snap(&[("P", &["a.mp3", "b.mp3"]), ("Q", &["c.mp3"])]);
    let cases = [
        ViewState::default(),
        state(Cursor::at_track("P", "b.mp3"), Cursor::at_track("Q", "c.mp3"), library.clone()),
        state(Cursor::at_track("gone", "x.mp3"), Cursor::at_track("P", "x.mp3"), library.clone()),
        state(Cursor::at_playlist("Q"), Cursor::at_track("gone", "a.mp3"), library.clone()),
    ];
    let next = snap(&[("P", &["b.mp3"]), ("R", &[])]);

    for s in cases {
        let once = reconcile(&s, next.clone());
        let twice = reconcile(&once.state, next.clone());
        assert_eq!(once.state, twice.state);
        assert!(!twice.stop_playback);
    }
}

#[test]
fn playing_cursor_follows_identity_not_position() {
    let prev = state(
        Cursor::at_playlist("P"),
        Cursor::at_track("P", "b.mp3"),
        snap(&[("P", &["a.mp3", "b.mp3"])]),
    );

    let r = reconcile(&prev, snap(&[("P", &["b.mp3", "a.mp3"])]));
    assert_eq!(r.state.playing, Cursor::at_track("P", "b.mp3"));
    assert!(!r.stop_playback);
}

#[test]
fn disappearing_track_clears_playing_track_and_requests_stop() {
    let prev = state(
        Cursor::at_playlist("P"),
        Cursor::at_track("P", "x.mp3"),
        snap(&[("P", &["x.mp3", "y.mp3"])]),
    );

    let r = reconcile(&prev, snap(&[("P", &["y.mp3"])]));
    assert_eq!(r.state.playing.playlist.as_deref(), Some("P"));
    assert_eq!(r.state.playing.track, None);
    assert!(r.stop_playback);
}

#[test]
fn disappearing_playing_playlist_clears_without_fallback() {
    let prev = state(
        Cursor::at_playlist("Q"),
        Cursor::at_track("P", "x.mp3"),
        snap(&[("P", &["x.mp3"]), ("Q", &["q.mp3"])]),
    );

    let r = reconcile(&prev, snap(&[("A", &["a.mp3"]), ("Q", &["q.mp3"])]));
    assert!(r.state.playing.is_empty());
    assert!(r.stop_playback);
    // Browsing is unaffected by the playing playlist vanishing.
    assert_eq!(r.state.browsing, Cursor::at_playlist("Q"));
}

#[test]
fn browsing_highlight_is_kept_or_cleared_by_filename() {
    let prev = state(
        Cursor::at_track("P", "b.mp3"),
        Cursor::empty(),
        snap(&[("P", &["a.mp3", "b.mp3"])]),
    );

    let kept = reconcile(&prev, snap(&[("P", &["b.mp3"])]));
    assert_eq!(kept.state.browsing, Cursor::at_track("P", "b.mp3"));

    let cleared = reconcile(&prev, snap(&[("P", &["a.mp3"])]));
    assert_eq!(cleared.state.browsing, Cursor::at_playlist("P"));
    assert!(!cleared.stop_playback);
}

#[test]
fn mixed_case_fallback_picks_first_name_ignoring_case() {
    let prev = state(
        Cursor::at_playlist("gone"),
        Cursor::empty(),
        snap(&[("gone", &[])]),
    );

    let r = reconcile(&prev, snap(&[("Zebra", &[]), ("apple", &[]), ("Ärger", &[])]));
    assert_eq!(r.state.browsing, Cursor::at_playlist("apple"));
}

#[test]
fn browsing_fallback_never_carries_the_old_highlight() {
    let prev = state(
        Cursor::at_track("old", "a.mp3"),
        Cursor::empty(),
        snap(&[("old", &["a.mp3"])]),
    );

    // "new" happens to contain a track with the same filename.
    let r = reconcile(&prev, snap(&[("new", &["a.mp3"])]));
    assert_eq!(r.state.browsing, Cursor::at_playlist("new"));
}

#[test]
fn renamed_playlist_is_treated_as_delete_and_create() {
    let prev = state(
        Cursor::at_track("P", "a.mp3"),
        Cursor::at_track("P", "a.mp3"),
        snap(&[("P", &["a.mp3"])]),
    );

    let r = reconcile(&prev, snap(&[("P renamed", &["a.mp3"])]));
    assert!(r.state.playing.is_empty());
    assert!(r.stop_playback);
    assert_eq!(r.state.browsing, Cursor::at_playlist("P renamed"));
}

#[test]
fn connection_status_is_carried_over() {
    let prev = ViewState {
        connection: ConnectionStatus::ClosedPendingRetry,
        ..Default::default()
    };

    let r = reconcile(&prev, snap(&[("P", &[])]));
    assert_eq!(r.state.connection, ConnectionStatus::ClosedPendingRetry);
}

#[test]
fn cursor_resolution_helpers() {
    let library = snap(&[("P", &["a.mp3"])]);
    assert!(Cursor::at_track("P", "a.mp3").resolve_track(&library).is_some());
    assert!(Cursor::at_track("P", "b.mp3").resolve_track(&library).is_none());
    assert!(Cursor::at_playlist("P").resolve_track(&library).is_none());
    assert!(Cursor::at_track("P", "a.mp3").points_at("P", "a.mp3"));
    assert!(!Cursor::at_track("P", "a.mp3").points_at("Q", "a.mp3"));
}

#[test]
fn store_replace_swaps_whole_state() {
    let mut store = ViewStateStore::default();
    assert_eq!(store.get(), &ViewState::default());

    let next = state(Cursor::at_playlist("P"), Cursor::empty(), snap(&[("P", &[])]));
    store.replace(next.clone());
    assert_eq!(store.get(), &next);
}
