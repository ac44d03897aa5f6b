use std::cmp::Ordering;
use std::collections::HashMap;

/// A single audio file inside a playlist, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Unique within its playlist; the identity used by every cursor.
    pub filename: String,
    pub title: Option<String>,
    /// Display string as produced by the server (e.g. `3m25s`).
    pub duration: Option<String>,
    /// Embedded cover art reference (a `data:` URI or a bare base64 payload).
    pub cover: Option<String>,
}

impl Track {
    /// Title to show for this track, falling back to the filename.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.filename)
    }
}

/// A named, ordered list of tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn track(&self, filename: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.filename == filename)
    }

    /// Position of `filename` in snapshot order. Only meaningful until the next snapshot.
    pub fn position_of(&self, filename: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.filename == filename)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A complete image of the server library at one point in time.
///
/// Playlists are keyed by name. Every snapshot replaces the previous one
/// wholesale; there are no partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibrarySnapshot {
    playlists: HashMap<String, Playlist>,
}

impl LibrarySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from playlists in arrival order.
    ///
    /// A repeated playlist name keeps its first occurrence.
    pub fn from_playlists(playlists: impl IntoIterator<Item = Playlist>) -> Self {
        let mut map: HashMap<String, Playlist> = HashMap::new();
        for pl in playlists {
            if map.contains_key(&pl.name) {
                log::debug!("duplicate playlist {:?} in snapshot, keeping first", pl.name);
                continue;
            }
            map.insert(pl.name.clone(), pl);
        }
        Self { playlists: map }
    }

    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.get(name)
    }

    pub fn track(&self, playlist: &str, filename: &str) -> Option<&Track> {
        self.playlist(playlist).and_then(|pl| pl.track(filename))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.playlists.contains_key(name)
    }

    /// Playlist names in presentation order (see `compare_names`).
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.playlists.keys().map(String::as_str).collect();
        names.sort_unstable_by(|a, b| compare_names(a, b));
        names
    }

    /// First playlist in presentation order, if any.
    pub fn first_name(&self) -> Option<&str> {
        self.playlists
            .keys()
            .map(String::as_str)
            .min_by(|a, b| compare_names(a, b))
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

/// Presentation order for playlist names.
///
/// Letters compare without regard to case or Latin accents first, so `apple`
/// and `Ärger` both sort before `Zebra`. Ties fall back to lowercase and then
/// raw byte order, which keeps the order total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| s.chars().flat_map(char::to_lowercase).map(fold_accent).collect::<String>();
    primary(a)
        .cmp(&primary(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Base letter of a lowercase Latin-1 accented letter.
fn fold_accent(c: char) -> char {
    match c {
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}
