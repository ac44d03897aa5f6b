use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::connection::{ConnectionId, SocketEvent, spawn_socket};
use crate::playback::{MediaElement, MediaEvent};
use crate::session::{Command, Session};
use crate::ui;

/// Longest the loop blocks on terminal input before redrawing.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Starts socket threads for the connection ids the supervisor hands out.
pub struct SocketSpawner {
    url: String,
    idle_timeout: Duration,
    tx: Sender<SocketEvent>,
}

impl SocketSpawner {
    pub fn new(url: String, idle_timeout: Duration, tx: Sender<SocketEvent>) -> Self {
        Self {
            url,
            idle_timeout,
            tx,
        }
    }

    /// A thread that cannot be started counts as a closed connection, so the
    /// supervisor schedules the next attempt as usual.
    pub fn spawn<M: MediaElement>(&self, session: &mut Session<M>, id: ConnectionId) {
        log::info!("connecting {id} to {}", self.url);
        if let Err(e) = spawn_socket(self.url.clone(), id, self.idle_timeout, self.tx.clone()) {
            log::error!("failed to start socket thread for {id}: {e}");
            session.on_socket_event(SocketEvent::Closed(id, Some(e.to_string())), Instant::now());
        }
    }
}

/// Main terminal event loop: drains socket and media events, fires timers,
/// draws, and handles keys. Returns `Ok(())` when the user quits.
pub fn run<M: MediaElement>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session<M>,
    sockets: &SocketSpawner,
    socket_rx: &Receiver<SocketEvent>,
    media_rx: &Receiver<MediaEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = socket_rx.try_recv() {
            session.on_socket_event(ev, Instant::now());
        }
        while let Ok(ev) = media_rx.try_recv() {
            session.on_media_event(ev, Instant::now());
        }
        if let Some(id) = session.tick(Instant::now()) {
            sockets.spawn(session, id);
        }

        let vm = ui::project(
            session.state(),
            session.controller().now_playing(),
            session.controller().is_paused(),
        );
        terminal.draw(|f| ui::draw(f, &vm, &settings.ui))?;

        let timeout = session
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()).min(INPUT_POLL))
            .unwrap_or(INPUT_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key_command(key) {
                    KeyAction::Quit => break,
                    KeyAction::Command(cmd) => session.handle(cmd, Instant::now()),
                    KeyAction::None => {}
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Command(Command),
    None,
}

fn key_command(key: KeyEvent) -> KeyAction {
    let cmd = match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => Command::HighlightNext,
        KeyCode::Char('k') | KeyCode::Up => Command::HighlightPrev,
        KeyCode::Char('J') | KeyCode::Tab => Command::SelectNextPlaylist,
        KeyCode::Char('K') | KeyCode::BackTab => Command::SelectPrevPlaylist,
        KeyCode::Enter => Command::PlayHighlighted,
        KeyCode::Char(' ') | KeyCode::Char('p') => Command::TogglePause,
        KeyCode::Char('n') => Command::Skip,
        KeyCode::Char('x') => Command::Stop,
        _ => return KeyAction::None,
    };
    KeyAction::Command(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(key_command(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(
            key_command(key(KeyCode::Enter)),
            KeyAction::Command(Command::PlayHighlighted)
        );
        assert_eq!(
            key_command(key(KeyCode::Char('J'))),
            KeyAction::Command(Command::SelectNextPlaylist)
        );
        assert_eq!(
            key_command(key(KeyCode::Char(' '))),
            KeyAction::Command(Command::TogglePause)
        );
        assert_eq!(key_command(key(KeyCode::Char('z'))), KeyAction::None);
    }
}
