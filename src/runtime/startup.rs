use std::fs::{self, OpenOptions};
use std::time::Duration;

use crate::config;
use crate::connection::fetch_snapshot;
use crate::library::LibrarySnapshot;

/// Route `log` output to a file so it never draws over the terminal UI.
///
/// `RUST_LOG` wins over `logging.level`. Without a usable log file, logging
/// stays off.
pub fn init_logging(settings: &config::LoggingSettings) {
    let Some(path) = settings.file.clone().or_else(config::default_log_path) else {
        return;
    };
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("mixtape: cannot create log directory {}: {e}", dir.display());
            return;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("mixtape: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let env = env_logger::Env::default().default_filter_or(settings.level.as_str());
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
}

pub fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .build()
}

/// One-shot library fetch used to seed the view before the push socket opens.
///
/// Failure is not fatal: the socket sends a full snapshot as soon as it
/// connects.
pub fn initial_snapshot(agent: &ureq::Agent, settings: &config::ServerSettings) -> Option<LibrarySnapshot> {
    let url = settings.playlists_url();
    match fetch_snapshot(agent, &url) {
        Ok(snapshot) => {
            log::info!("fetched {} playlists from {url}", snapshot.len());
            Some(snapshot)
        }
        Err(e) => {
            log::warn!("initial fetch from {url} failed: {e}");
            None
        }
    }
}
