use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mixtape/config.toml` or `~/.config/mixtape/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MIXTAPE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub ui: UiSettings,
    pub audio: AudioSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Base URL of the playlist server, e.g. `http://localhost:8085`.
    pub base_url: String,
    /// Path of the one-shot library endpoint.
    pub playlists_path: String,
    /// Path of the push WebSocket.
    pub socket_path: String,
    /// Prefix of the streaming endpoint.
    pub stream_path: String,
    /// Flat delay before reconnecting after the push socket closes (milliseconds).
    pub reconnect_delay_ms: u64,
    /// Timeout for HTTP requests (milliseconds).
    pub request_timeout_ms: u64,
    /// Close the push socket after this long without any frame (milliseconds).
    /// The server rebroadcasts the library every 30 s.
    pub idle_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8085".to_string(),
            playlists_path: "/api/playlists".to_string(),
            socket_path: "/ws".to_string(),
            stream_path: "/stream".to_string(),
            reconnect_delay_ms: 3000,
            request_timeout_ms: 10_000,
            idle_timeout_ms: 90_000,
        }
    }
}

impl ServerSettings {
    pub fn playlists_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.playlists_path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Title shown when nothing is playing.
    pub placeholder_title: String,
    /// Delay before the cover art swaps to the new track (milliseconds).
    pub cover_transition_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ mixtape ~ ".to_string(),
            placeholder_title: "Choose track".to_string(),
            cover_transition_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume, 1.0 is unity gain.
    pub volume: f32,
    /// Refuse to buffer streams larger than this many bytes.
    pub max_stream_bytes: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            max_stream_bytes: 256 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter, overridden by `RUST_LOG`.
    pub level: String,
    /// Log file; defaults to `$XDG_STATE_HOME/mixtape/mixtape.log`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
