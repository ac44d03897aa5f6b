use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::playback::{LoadId, MediaElement, MediaEvent};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// `MediaElement` backed by the audio thread.
///
/// Every call is a non-blocking command send; results come back as
/// `MediaEvent`s on the receiver handed out by `new`.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(
        audio_settings: AudioSettings,
        request_timeout: Duration,
    ) -> std::io::Result<(Self, Receiver<MediaEvent>)> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(request_timeout)
            .timeout_read(request_timeout)
            .build();

        let audio_handle = spawn_audio_thread(rx, tx.clone(), event_tx, agent, audio_settings)?;

        Ok((
            Self {
                tx,
                join: Mutex::new(Some(audio_handle)),
            },
            event_rx,
        ))
    }

    #[cfg(test)]
    pub(super) fn detached(tx: Sender<AudioCmd>) -> Self {
        Self {
            tx,
            join: Mutex::new(None),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            log::warn!("audio thread is gone, dropping command");
        }
    }

    /// Stop playback and wait for the audio thread to finish.
    pub fn quit(&self) {
        let _ = self.tx.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaElement for AudioPlayer {
    fn load(&mut self, id: LoadId, url: &str) {
        self.send(AudioCmd::Load {
            id,
            url: url.to_string(),
        });
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn clear(&mut self) {
        self.send(AudioCmd::Clear);
    }
}
