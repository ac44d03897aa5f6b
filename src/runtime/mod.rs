use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioPlayer;
use crate::connection::{SocketEvent, Supervisor, socket_url};
use crate::playback::{PlaybackController, PlaybackOptions, StreamLocator};
use crate::session::Session;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();
    let cli = settings::parse_args(env::args().skip(1));
    settings::apply_args(&mut settings, &cli)?;

    if cli.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    startup::init_logging(&settings.logging);
    log::info!("starting against {}", settings.server.base_url);

    let request_timeout = Duration::from_millis(settings.server.request_timeout_ms);
    let agent = startup::http_agent(request_timeout);
    let ws_url = socket_url(&settings.server.base_url, &settings.server.socket_path)?;

    let (audio_player, media_rx) = AudioPlayer::new(settings.audio.clone(), request_timeout)?;
    let controller = PlaybackController::new(
        audio_player,
        StreamLocator::new(&settings.server.base_url, &settings.server.stream_path),
        PlaybackOptions {
            placeholder_title: settings.ui.placeholder_title.clone(),
            cover_transition: Duration::from_millis(settings.ui.cover_transition_ms),
        },
    );
    let supervisor = Supervisor::new(Duration::from_millis(settings.server.reconnect_delay_ms));
    let mut session = Session::new(controller, supervisor);

    if let Some(snapshot) = startup::initial_snapshot(&agent, &settings.server) {
        session.apply_snapshot(snapshot);
    }

    let (socket_tx, socket_rx) = mpsc::channel::<SocketEvent>();
    let sockets = event_loop::SocketSpawner::new(
        ws_url,
        Duration::from_millis(settings.server.idle_timeout_ms),
        socket_tx,
    );
    let first = session.start_connection();
    sockets.spawn(&mut session, first);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut session,
        &sockets,
        &socket_rx,
        &media_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.controller().media().quit();
    log::info!("shut down");

    run_result
}
