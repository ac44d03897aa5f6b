//! Commands understood by the audio thread.

use crate::playback::LoadId;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current source; bytes are fetched in the background.
    Load { id: LoadId, url: String },
    /// Start or resume the current source (as soon as it is buffered).
    Play,
    /// Pause the current source.
    Pause,
    /// Drop the current source.
    Clear,
    /// A background fetch finished. Ignored unless `id` is still current.
    Buffered {
        id: LoadId,
        result: Result<Vec<u8>, String>,
    },
    /// Stop playback and end the audio thread.
    Quit,
}
