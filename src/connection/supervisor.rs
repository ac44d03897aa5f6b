use std::fmt;
use std::time::{Duration, Instant};

use crate::app::ConnectionStatus;
use crate::library::LibrarySnapshot;

/// Identifies one connection attempt. Events from any other attempt are stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn#{}", self.0)
    }
}

/// What a socket thread reports back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Opened(ConnectionId),
    Message(ConnectionId, String),
    /// Clean close or error; `reason` is for the log only.
    Closed(ConnectionId, Option<String>),
}

/// Lifecycle of the push connection:
/// `Connecting -> Open -> ClosedPendingRetry -> Connecting -> ...`.
///
/// Pure state; the caller spawns the socket for each id returned by
/// `connect` / `poll_retry`. Only one id is active at a time, and a retry is
/// scheduled at most once per close, so bursts of close events cannot fan
/// out into duplicate connections.
#[derive(Debug)]
pub struct Supervisor {
    status: ConnectionStatus,
    active: Option<ConnectionId>,
    last_id: u64,
    retry_at: Option<Instant>,
    reconnect_delay: Duration,
}

impl Supervisor {
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            active: None,
            last_id: 0,
            retry_at: None,
            reconnect_delay,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn active(&self) -> Option<ConnectionId> {
        self.active
    }

    /// Begin a new attempt, superseding any previous one.
    pub fn connect(&mut self) -> ConnectionId {
        self.last_id += 1;
        let id = ConnectionId(self.last_id);
        self.active = Some(id);
        self.status = ConnectionStatus::Connecting;
        self.retry_at = None;
        log::info!("connecting ({id})");
        id
    }

    fn is_active(&self, id: ConnectionId) -> bool {
        self.active == Some(id)
    }

    pub fn on_opened(&mut self, id: ConnectionId) {
        if !self.is_active(id) {
            log::debug!("ignoring open from stale {id}");
            return;
        }
        self.status = ConnectionStatus::Open;
        log::info!("connected ({id})");
    }

    /// Decode a pushed payload. Malformed payloads are logged and dropped.
    pub fn on_message(&mut self, id: ConnectionId, text: &str) -> Option<LibrarySnapshot> {
        if !self.is_active(id) {
            log::debug!("ignoring message from stale {id}");
            return None;
        }
        match LibrarySnapshot::from_json(text) {
            Ok(snapshot) => {
                log::debug!("received snapshot with {} playlists", snapshot.len());
                Some(snapshot)
            }
            Err(e) => {
                log::warn!("dropping malformed push on {id}: {e}");
                None
            }
        }
    }

    /// Schedule a reconnect after the active connection closed.
    pub fn on_closed(&mut self, id: ConnectionId, reason: Option<&str>, now: Instant) {
        if !self.is_active(id) {
            log::debug!("ignoring close from stale {id}");
            return;
        }
        if self.retry_at.is_some() {
            return;
        }
        self.status = ConnectionStatus::ClosedPendingRetry;
        self.retry_at = Some(now + self.reconnect_delay);
        log::warn!(
            "disconnected ({id}{}), reconnecting in {:?}",
            reason.map(|r| format!(": {r}")).unwrap_or_default(),
            self.reconnect_delay
        );
    }

    /// Fire the retry timer if it is due. Returns the id to connect with.
    pub fn poll_retry(&mut self, now: Instant) -> Option<ConnectionId> {
        let due = self.retry_at?;
        if due > now {
            return None;
        }
        self.retry_at = None;
        if self.status != ConnectionStatus::ClosedPendingRetry {
            return None;
        }
        Some(self.connect())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.retry_at
    }
}
