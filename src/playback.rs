//! Playback control: the `MediaElement` seam, stream locators, the
//! now-playing display state and the controller that ties them to the view
//! state.

mod controller;
mod locator;
mod media;
mod now_playing;

pub use controller::{PlaybackController, PlaybackOptions};
pub use locator::StreamLocator;
pub use media::{LoadId, MediaElement, MediaEvent};
pub use now_playing::{Cover, NowPlaying};
