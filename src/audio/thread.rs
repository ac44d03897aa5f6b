use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::playback::{LoadId, MediaEvent};

use super::fetch::spawn_fetch;
use super::sink::create_sink;
use super::types::AudioCmd;

/// The one loaded source and whether the user wants it audible.
struct Deck {
    current: Option<LoadId>,
    sink: Option<Sink>,
    want_playing: bool,
}

impl Deck {
    fn new() -> Self {
        Self {
            current: None,
            sink: None,
            want_playing: false,
        }
    }

    fn drop_source(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.current = None;
        self.want_playing = false;
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    self_tx: Sender<AudioCmd>,
    events: Sender<MediaEvent>,
    agent: ureq::Agent,
    audio_settings: AudioSettings,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new().name("audio".to_string()).spawn(move || {
        let stream: Option<OutputStream> = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped, which would
                // scribble over the TUI.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                log::error!("no audio output device: {e}");
                None
            }
        };

        let mut deck = Deck::new();

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { id, url } => {
                        deck.drop_source();
                        deck.current = Some(id);
                        spawn_fetch(
                            agent.clone(),
                            id,
                            url,
                            audio_settings.max_stream_bytes,
                            self_tx.clone(),
                        );
                    }
                    AudioCmd::Play => {
                        deck.want_playing = true;
                        if let Some(s) = deck.sink.as_ref() {
                            s.play();
                        }
                    }
                    AudioCmd::Pause => {
                        deck.want_playing = false;
                        if let Some(s) = deck.sink.as_ref() {
                            s.pause();
                        }
                    }
                    AudioCmd::Clear => deck.drop_source(),
                    AudioCmd::Buffered { id, result } => {
                        if deck.current != Some(id) {
                            log::debug!("discarding buffer for superseded {id}");
                            continue;
                        }

                        let sink = match (stream.as_ref(), result) {
                            (None, _) => Err("no audio output device".to_string()),
                            (Some(_), Err(e)) => Err(e),
                            (Some(stream), Ok(bytes)) => {
                                create_sink(stream, bytes, audio_settings.volume)
                            }
                        };

                        match sink {
                            Ok(s) => {
                                if deck.want_playing {
                                    s.play();
                                }
                                deck.sink = Some(s);
                            }
                            Err(reason) => {
                                deck.drop_source();
                                let _ = events.send(MediaEvent::Failed(id, reason));
                            }
                        }
                    }
                    AudioCmd::Quit => {
                        deck.drop_source();
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic check for natural end-of-track
                    let finished = deck.want_playing
                        && deck.sink.as_ref().is_some_and(|s| s.empty());
                    if finished {
                        if let Some(id) = deck.current {
                            deck.drop_source();
                            let _ = events.send(MediaEvent::Ended(id));
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
