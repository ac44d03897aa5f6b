//! Blocking transport helpers: the startup fetch and the socket reader thread.

use std::net::TcpStream;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tungstenite::Message;
use tungstenite::stream::MaybeTlsStream;

use crate::error::ClientError;
use crate::library::LibrarySnapshot;

use super::supervisor::{ConnectionId, SocketEvent};

/// One-shot `GET` of the full library.
pub fn fetch_snapshot(agent: &ureq::Agent, url: &str) -> Result<LibrarySnapshot, ClientError> {
    let response = agent.get(url).call()?;
    let snapshot = LibrarySnapshot::from_reader(response.into_reader())?;
    Ok(snapshot)
}

/// Derive the push channel URL from the HTTP base URL.
pub fn socket_url(base_url: &str, socket_path: &str) -> Result<String, ClientError> {
    let base = base_url.trim_end_matches('/');
    let rest = if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else {
        return Err(ClientError::Url {
            url: base_url.to_string(),
            reason: "expected an http:// or https:// url".to_string(),
        });
    };
    Ok(format!("{rest}/{}", socket_path.trim_start_matches('/')))
}

/// Connect to `url` on a new thread and forward everything it receives.
///
/// The thread always ends with exactly one `Closed` for `id`, unless the
/// receiving side is already gone. A socket that stays silent for
/// `idle_timeout` is treated as dead and closed.
pub fn spawn_socket(
    url: String,
    id: ConnectionId,
    idle_timeout: Duration,
    tx: Sender<SocketEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("socket-{}", id.0))
        .spawn(move || {
            let reason = match read_socket(&url, id, idle_timeout, &tx) {
                Ok(()) => None,
                Err(e) => Some(e.to_string()),
            };
            let _ = tx.send(SocketEvent::Closed(id, reason));
        })
}

/// Bound every read on the socket's TCP stream by `timeout`.
pub(super) fn set_idle_timeout(
    stream: &MaybeTlsStream<TcpStream>,
    timeout: Duration,
) -> std::io::Result<()> {
    match stream {
        MaybeTlsStream::Plain(s) => s.set_read_timeout(Some(timeout)),
        MaybeTlsStream::NativeTls(s) => s.get_ref().set_read_timeout(Some(timeout)),
        _ => Ok(()),
    }
}

fn read_socket(
    url: &str,
    id: ConnectionId,
    idle_timeout: Duration,
    tx: &Sender<SocketEvent>,
) -> Result<(), ClientError> {
    let (mut socket, _response) = tungstenite::connect(url)?;
    set_idle_timeout(socket.get_ref(), idle_timeout)?;
    if tx.send(SocketEvent::Opened(id)).is_err() {
        return Ok(());
    }

    loop {
        let text = match socket.read() {
            Ok(Message::Text(text)) => text,
            Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(_) => {
                    log::debug!("ignoring non-utf8 binary frame on {id}");
                    continue;
                }
            },
            Ok(Message::Close(_)) => return Ok(()),
            // Pings are answered by tungstenite on the next read.
            Ok(_) => continue,
            Err(tungstenite::Error::ConnectionClosed) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        if tx.send(SocketEvent::Message(id, text)).is_err() {
            let _ = socket.close(None);
            return Ok(());
        }
    }
}
