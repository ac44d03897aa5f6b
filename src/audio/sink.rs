//! Utilities for creating `rodio` sinks from buffered stream bytes.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};

/// Decode `bytes` into a paused `Sink` on `stream`.
pub(super) fn create_sink(stream: &OutputStream, bytes: Vec<u8>, volume: f32) -> Result<Sink, String> {
    let source = Decoder::new(Cursor::new(bytes)).map_err(|e| format!("cannot decode stream: {e}"))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
