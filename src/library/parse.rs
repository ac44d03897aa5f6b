//! JSON decoding of library payloads.
//!
//! The server sends the same shape from `GET /api/playlists` and on every
//! WebSocket push: an array of `{ name, tracks? }` objects. Decoding is
//! lenient below the playlist level (a bad track entry is skipped, a missing
//! or non-array `tracks` is an empty playlist) and strict above it.

use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::model::{LibrarySnapshot, Playlist, Track};

#[derive(Deserialize)]
struct WirePlaylist {
    name: String,
    #[serde(default, deserialize_with = "lenient_tracks")]
    tracks: Vec<WireTrack>,
}

#[derive(Deserialize)]
struct WireTrack {
    filename: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    cover_base64: Option<String>,
}

fn lenient_tracks<'de, D>(deserializer: D) -> Result<Vec<WireTrack>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<WireTrack>(item) {
            Ok(t) => Some(t),
            Err(e) => {
                log::debug!("skipping malformed track entry: {e}");
                None
            }
        })
        .collect())
}

/// Empty strings from the server mean "not set".
fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

impl From<WireTrack> for Track {
    fn from(w: WireTrack) -> Self {
        Self {
            filename: w.filename,
            title: non_empty(w.title),
            duration: non_empty(w.duration),
            cover: non_empty(w.cover_base64),
        }
    }
}

impl From<WirePlaylist> for Playlist {
    fn from(w: WirePlaylist) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut tracks = Vec::with_capacity(w.tracks.len());
        for t in w.tracks {
            if !seen.insert(t.filename.clone()) {
                log::debug!("duplicate track {:?} in playlist {:?}, keeping first", t.filename, w.name);
                continue;
            }
            tracks.push(Track::from(t));
        }
        Self {
            name: w.name,
            tracks,
        }
    }
}

impl LibrarySnapshot {
    /// Decode a snapshot from a JSON payload.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let wire: Vec<WirePlaylist> = serde_json::from_str(text)?;
        Ok(Self::from_playlists(wire.into_iter().map(Playlist::from)))
    }

    /// Decode a snapshot straight from an HTTP response body.
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        let wire: Vec<WirePlaylist> = serde_json::from_reader(reader)?;
        Ok(Self::from_playlists(wire.into_iter().map(Playlist::from)))
    }
}
