//! Pure projection of the view state into what the terminal shows.
//!
//! Nothing here touches the terminal, so the projection can be tested on
//! its own and recomputed after every transition.

use crate::app::{ConnectionStatus, ViewState};
use crate::playback::{Cover, NowPlaying};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRow {
    pub name: String,
    pub track_count: usize,
    /// Shown in the track pane.
    pub browsing: bool,
    /// Contains the playing track.
    pub playing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub title: String,
    pub duration: String,
    pub highlighted: bool,
    pub playing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub playlists: Vec<PlaylistRow>,
    pub browsing_name: Option<String>,
    pub tracks: Vec<TrackRow>,
    /// Row index of the highlighted track, derived for this frame only.
    pub highlighted_row: Option<usize>,
    pub playlist_row: Option<usize>,
    /// A track is loaded (playing or paused).
    pub active: bool,
    pub now_playing: String,
    pub cover: String,
    pub transitioning: bool,
    pub paused: bool,
    pub connection: &'static str,
}

fn connection_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connecting => "connecting",
        ConnectionStatus::Open => "live",
        ConnectionStatus::ClosedPendingRetry => "reconnecting",
    }
}

/// Short description of the cover art, e.g. `image/png art`.
fn cover_label(cover: &Cover) -> String {
    match cover {
        Cover::Default => "default cover".to_string(),
        Cover::Embedded(data) => data
            .strip_prefix("data:")
            .and_then(|rest| rest.split(&[';', ','][..]).next())
            .filter(|mime| !mime.is_empty())
            .map(|mime| format!("{mime} art"))
            .unwrap_or_else(|| "embedded art".to_string()),
    }
}

pub fn project(state: &ViewState, now_playing: &NowPlaying, paused: bool) -> ViewModel {
    let library = &state.library;
    let browsing_name = state.browsing.playlist.as_deref();
    let playing_name = state.playing.playlist.as_deref();

    let playlists: Vec<PlaylistRow> = library
        .sorted_names()
        .into_iter()
        .filter_map(|name| library.playlist(name))
        .map(|pl| PlaylistRow {
            name: pl.name.clone(),
            track_count: pl.tracks.len(),
            browsing: browsing_name == Some(pl.name.as_str()),
            playing: playing_name == Some(pl.name.as_str()) && state.playing.track.is_some(),
        })
        .collect();
    let playlist_row = playlists.iter().position(|r| r.browsing);

    let (tracks, highlighted_row) = match state.browsing_playlist() {
        Some(pl) => {
            let rows: Vec<TrackRow> = pl
                .tracks
                .iter()
                .map(|t| TrackRow {
                    title: t.display_title().to_string(),
                    duration: t.duration.clone().unwrap_or_default(),
                    highlighted: state.browsing.track.as_deref() == Some(t.filename.as_str()),
                    playing: state.playing.points_at(&pl.name, &t.filename),
                })
                .collect();
            let highlighted = rows.iter().position(|r| r.highlighted);
            (rows, highlighted)
        }
        None => (Vec::new(), None),
    };

    ViewModel {
        playlists,
        browsing_name: browsing_name.map(str::to_string),
        tracks,
        highlighted_row,
        playlist_row,
        active: state.playing.track.is_some(),
        now_playing: now_playing.title.clone(),
        cover: cover_label(&now_playing.cover),
        transitioning: now_playing.is_transitioning(),
        paused,
        connection: connection_label(state.connection),
    }
}
