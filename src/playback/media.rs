//! The seam between the playback controller and whatever actually produces
//! sound.

use std::fmt;

/// Tag attached to every `load` so events from a replaced source can be
/// told apart from events for the current one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(pub u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Signals reported back by a media element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The source loaded under this id played to its natural end.
    Ended(LoadId),
    /// The source loaded under this id could not be fetched or decoded.
    Failed(LoadId, String),
}

/// A single-source audio output, modeled on a browser `<audio>` element.
pub trait MediaElement {
    /// Replace the current source with `url`. Playback does not start until `play`.
    fn load(&mut self, id: LoadId, url: &str);
    /// Start or resume the current source.
    fn play(&mut self);
    fn pause(&mut self);
    /// Drop the current source entirely.
    fn clear(&mut self);
}
