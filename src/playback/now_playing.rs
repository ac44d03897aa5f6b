//! Display-only "now playing" state: the title line and the cover art.
//!
//! The cover swap is delayed by a short transition so it lines up with the
//! fade in the render layer. None of this affects which track is playing.

use std::time::Instant;

use crate::library::Track;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cover {
    /// The stock image shown when nothing is playing or a track has no art.
    #[default]
    Default,
    /// Embedded art shipped with the track.
    Embedded(String),
}

impl Cover {
    fn for_track(track: &Track) -> Self {
        match &track.cover {
            Some(c) => Cover::Embedded(c.clone()),
            None => Cover::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingCover {
    due: Instant,
    cover: Cover,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub cover: Cover,
    pending: Option<PendingCover>,
}

impl NowPlaying {
    pub fn new(placeholder: &str) -> Self {
        Self {
            title: placeholder.to_string(),
            cover: Cover::Default,
            pending: None,
        }
    }

    /// Show `track`: the title changes now, the cover at `cover_due`.
    pub fn show(&mut self, track: &Track, cover_due: Instant) {
        self.title = track.display_title().to_string();
        self.pending = Some(PendingCover {
            due: cover_due,
            cover: Cover::for_track(track),
        });
    }

    /// Pick up new metadata for the track already shown.
    ///
    /// A pending swap is retargeted; otherwise the new cover shows at once.
    pub fn refresh(&mut self, track: &Track) {
        self.title = track.display_title().to_string();
        let cover = Cover::for_track(track);
        match self.pending.as_mut() {
            Some(p) => p.cover = cover,
            None => self.cover = cover,
        }
    }

    /// Back to the placeholder title and default cover, dropping any pending swap.
    pub fn reset(&mut self, placeholder: &str) {
        self.title = placeholder.to_string();
        self.cover = Cover::Default;
        self.pending = None;
    }

    /// True while a cover swap is scheduled.
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Apply the pending cover swap if it is due. Returns true if the cover changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(p) if p.due <= now => {
                self.cover = p.cover;
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }
}
