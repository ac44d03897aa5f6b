//! Audio output: a `rodio`-backed `MediaElement`.
//!
//! A dedicated thread owns the output stream and the current sink. Stream
//! bytes are downloaded on short-lived fetch threads and handed back to it
//! tagged with their `LoadId`, so a slow download for a track the user has
//! already skipped never starts playing.

mod fetch;
mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
