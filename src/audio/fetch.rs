//! Background download of stream bytes.

use std::io::Read;
use std::sync::mpsc::Sender;
use std::thread;

use crate::error::ClientError;
use crate::playback::LoadId;

use super::types::AudioCmd;

/// Read at most `max_bytes` from `reader`, failing if there is more.
pub(super) fn read_limited(reader: impl Read, max_bytes: u64) -> Result<Vec<u8>, ClientError> {
    let mut buf = Vec::new();
    reader.take(max_bytes.saturating_add(1)).read_to_end(&mut buf)?;
    if buf.len() as u64 > max_bytes {
        return Err(ClientError::Io(std::io::Error::other(format!(
            "stream exceeds {max_bytes} bytes"
        ))));
    }
    Ok(buf)
}

fn fetch_stream(agent: &ureq::Agent, url: &str, max_bytes: u64) -> Result<Vec<u8>, ClientError> {
    let response = agent.get(url).call()?;
    read_limited(response.into_reader(), max_bytes)
}

/// Fetch `url` on its own thread and post the result back to the audio thread.
pub(super) fn spawn_fetch(
    agent: ureq::Agent,
    id: LoadId,
    url: String,
    max_bytes: u64,
    tx: Sender<AudioCmd>,
) {
    let spawned = thread::Builder::new()
        .name(format!("fetch-{}", id.0))
        .spawn({
            let tx = tx.clone();
            move || {
                log::debug!("fetching {url} ({id})");
                let result = fetch_stream(&agent, &url, max_bytes).map_err(|e| e.to_string());
                let _ = tx.send(AudioCmd::Buffered { id, result });
            }
        });

    if let Err(e) = spawned {
        let _ = tx.send(AudioCmd::Buffered {
            id,
            result: Err(format!("failed to start fetch: {e}")),
        });
    }
}
