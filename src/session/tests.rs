use super::*;
use crate::app::Cursor;
use crate::playback::tests::{MediaCall, RecordingMedia};
use crate::playback::{PlaybackOptions, StreamLocator};
use std::time::Duration;

const DELAY: Duration = Duration::from_secs(3);

fn session() -> Session<RecordingMedia> {
    Session::new(
        PlaybackController::new(
            RecordingMedia::default(),
            StreamLocator::new("http://host:8085", "/stream"),
            PlaybackOptions::default(),
        ),
        Supervisor::new(DELAY),
    )
}

fn push(s: &mut Session<RecordingMedia>, id: ConnectionId, json: &str) {
    s.on_socket_event(SocketEvent::Message(id, json.to_string()), Instant::now());
}

fn open(s: &mut Session<RecordingMedia>) -> ConnectionId {
    let id = s.start_connection();
    s.on_socket_event(SocketEvent::Opened(id), Instant::now());
    id
}

#[test]
fn startup_seed_selects_first_playlist_and_plays_nothing() {
    let mut s = session();
    s.apply_snapshot(
        LibrarySnapshot::from_json(r#"[{"name": "b"}, {"name": "a", "tracks": [{"filename": "x.mp3"}]}]"#)
            .unwrap(),
    );

    assert_eq!(s.state().browsing, Cursor::at_playlist("a"));
    assert!(s.state().playing.is_empty());
    assert!(s.controller().media().calls.is_empty());
}

#[test]
fn push_removing_playing_track_stops_media() {
    let mut s = session();
    let id = open(&mut s);
    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "x.mp3"}, {"filename": "y.mp3"}]}]"#);
    s.handle(
        Command::Play {
            playlist: "P".into(),
            filename: "x.mp3".into(),
        },
        Instant::now(),
    );
    assert_eq!(s.state().playing, Cursor::at_track("P", "x.mp3"));

    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "y.mp3"}]}]"#);

    assert!(s.state().playing.is_empty());
    let calls = &s.controller().media().calls;
    assert_eq!(&calls[calls.len() - 2..], &[MediaCall::Pause, MediaCall::Clear]);
    assert_eq!(s.controller().now_playing().title, "Choose track");
    // Browsing stays on P; its highlight on x.mp3 is gone.
    assert_eq!(s.state().browsing, Cursor::at_playlist("P"));
}

#[test]
fn reordering_push_keeps_playback_running() {
    let mut s = session();
    let id = open(&mut s);
    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "a.mp3"}, {"filename": "b.mp3"}]}]"#);
    s.handle(
        Command::Play {
            playlist: "P".into(),
            filename: "b.mp3".into(),
        },
        Instant::now(),
    );
    let calls_before = s.controller().media().calls.len();

    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "b.mp3"}, {"filename": "a.mp3"}]}]"#);

    assert_eq!(s.state().playing, Cursor::at_track("P", "b.mp3"));
    assert_eq!(s.controller().media().calls.len(), calls_before);
}

#[test]
fn advance_after_playlist_emptied_does_not_play() {
    let mut s = session();
    let id = open(&mut s);
    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "a.mp3"}]}]"#);
    s.handle(Command::PlayHighlighted, Instant::now());
    let ended = s.controller().media().last_load_id().unwrap();

    push(&mut s, id, r#"[{"name": "P", "tracks": []}]"#);
    let loads_before = s.controller().media().loads().len();

    s.on_media_event(MediaEvent::Ended(ended), Instant::now());
    s.handle(Command::Skip, Instant::now());

    assert_eq!(s.controller().media().loads().len(), loads_before);
    assert!(s.state().playing.is_empty());
}

#[test]
fn selecting_another_playlist_leaves_playback_alone() {
    let mut s = session();
    let id = open(&mut s);
    push(
        &mut s,
        id,
        r#"[{"name": "P", "tracks": [{"filename": "a.mp3"}]}, {"name": "Q", "tracks": [{"filename": "q.mp3"}]}]"#,
    );
    s.handle(Command::PlayHighlighted, Instant::now());
    let calls_before = s.controller().media().calls.clone();

    s.handle(Command::Select("Q".into()), Instant::now());

    assert_eq!(s.state().browsing, Cursor::at_playlist("Q"));
    assert_eq!(s.state().playing, Cursor::at_track("P", "a.mp3"));
    assert_eq!(s.controller().media().calls, calls_before);
}

#[test]
fn malformed_push_leaves_state_untouched() {
    let mut s = session();
    let id = open(&mut s);
    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "a.mp3"}]}]"#);
    s.handle(Command::PlayHighlighted, Instant::now());
    let before = s.state().clone();

    push(&mut s, id, "<html>502 Bad Gateway</html>");
    push(&mut s, id, r#"{"name": "P"}"#);

    assert_eq!(s.state(), &before);
}

#[test]
fn connection_status_is_mirrored_into_view_state() {
    let mut s = session();
    let t0 = Instant::now();
    assert_eq!(s.state().connection, ConnectionStatus::Connecting);

    let id = s.start_connection();
    s.on_socket_event(SocketEvent::Opened(id), t0);
    assert_eq!(s.state().connection, ConnectionStatus::Open);

    s.on_socket_event(SocketEvent::Closed(id, Some("eof".into())), t0);
    assert_eq!(s.state().connection, ConnectionStatus::ClosedPendingRetry);
    assert_eq!(s.next_deadline(), Some(t0 + DELAY));

    assert_eq!(s.tick(t0 + Duration::from_secs(1)), None);
    let retry = s.tick(t0 + DELAY).unwrap();
    assert_ne!(retry, id);
    assert_eq!(s.state().connection, ConnectionStatus::Connecting);
}

#[test]
fn double_close_before_retry_starts_one_connection() {
    let mut s = session();
    let t0 = Instant::now();
    let id = open(&mut s);

    s.on_socket_event(SocketEvent::Closed(id, Some("error".into())), t0);
    s.on_socket_event(SocketEvent::Closed(id, None), t0);

    let started: Vec<ConnectionId> = (0..20)
        .filter_map(|i| s.tick(t0 + Duration::from_millis(i * 500)))
        .collect();
    assert_eq!(started.len(), 1);
}

#[test]
fn snapshot_after_reconnect_reconciles_against_current_state() {
    let mut s = session();
    let t0 = Instant::now();
    let first = open(&mut s);
    push(&mut s, first, r#"[{"name": "P", "tracks": [{"filename": "a.mp3"}, {"filename": "b.mp3"}]}]"#);
    s.handle(Command::HighlightNext, t0);
    s.handle(Command::HighlightNext, t0);
    s.handle(Command::PlayHighlighted, t0);
    assert_eq!(s.state().playing, Cursor::at_track("P", "b.mp3"));

    s.on_socket_event(SocketEvent::Closed(first, None), t0);
    let second = s.tick(t0 + DELAY).unwrap();
    s.on_socket_event(SocketEvent::Opened(second), t0 + DELAY);
    // A late message from the dead socket must not be applied.
    push(&mut s, first, r#"[]"#);
    push(&mut s, second, r#"[{"name": "P", "tracks": [{"filename": "b.mp3"}, {"filename": "c.mp3"}]}]"#);

    assert_eq!(s.state().playing, Cursor::at_track("P", "b.mp3"));
    assert_eq!(s.state().browsing, Cursor::at_track("P", "b.mp3"));
}

#[test]
fn playlist_stepping_wraps_in_name_order() {
    let mut s = session();
    s.apply_snapshot(LibrarySnapshot::from_json(r#"[{"name": "c"}, {"name": "a"}, {"name": "b"}]"#).unwrap());
    assert_eq!(s.state().browsing.playlist.as_deref(), Some("a"));

    s.handle(Command::SelectNextPlaylist, Instant::now());
    assert_eq!(s.state().browsing.playlist.as_deref(), Some("b"));
    s.handle(Command::SelectPrevPlaylist, Instant::now());
    s.handle(Command::SelectPrevPlaylist, Instant::now());
    assert_eq!(s.state().browsing.playlist.as_deref(), Some("c"));
    s.handle(Command::SelectNextPlaylist, Instant::now());
    assert_eq!(s.state().browsing.playlist.as_deref(), Some("a"));
}

#[test]
fn tick_applies_due_cover_swap() {
    let mut s = session();
    let t0 = Instant::now();
    s.apply_snapshot(
        LibrarySnapshot::from_json(
            r#"[{"name": "P", "tracks": [{"filename": "a.mp3", "cover_base64": "data:image/jpeg;base64,/9j/"}]}]"#,
        )
        .unwrap(),
    );
    s.handle(Command::PlayHighlighted, t0);
    assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(300)));

    s.tick(t0 + Duration::from_millis(300));
    assert_eq!(
        s.controller().now_playing().cover,
        crate::playback::Cover::Embedded("data:image/jpeg;base64,/9j/".into())
    );
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn push_with_new_metadata_refreshes_now_playing() {
    let mut s = session();
    let t0 = Instant::now();
    let id = open(&mut s);
    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "a.mp3", "title": "Old"}]}]"#);
    s.handle(Command::PlayHighlighted, t0);
    s.tick(t0 + Duration::from_millis(300));
    let loads_before = s.controller().media().loads().len();

    push(
        &mut s,
        id,
        r#"[{"name": "P", "tracks": [{"filename": "a.mp3", "title": "New", "cover_base64": "data:image/png;base64,AA"}]}]"#,
    );

    let np = s.controller().now_playing();
    assert_eq!(np.title, "New");
    assert_eq!(np.cover, crate::playback::Cover::Embedded("data:image/png;base64,AA".into()));
    assert_eq!(s.controller().media().loads().len(), loads_before);
}

#[test]
fn metadata_push_retargets_pending_cover_swap() {
    let mut s = session();
    let t0 = Instant::now();
    let id = open(&mut s);
    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "a.mp3", "cover_base64": "old"}]}]"#);
    s.handle(Command::PlayHighlighted, t0);

    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "a.mp3", "cover_base64": "new"}]}]"#);
    assert_eq!(s.controller().now_playing().cover, crate::playback::Cover::Default);

    s.tick(t0 + Duration::from_millis(300));
    assert_eq!(s.controller().now_playing().cover, crate::playback::Cover::Embedded("new".into()));
}

#[test]
fn metadata_push_with_nothing_playing_keeps_placeholder() {
    let mut s = session();
    let id = open(&mut s);
    push(&mut s, id, r#"[{"name": "P", "tracks": [{"filename": "a.mp3", "title": "Song"}]}]"#);

    assert_eq!(s.controller().now_playing().title, "Choose track");
}
