//! Push connection handling.
//!
//! `Supervisor` is the connection state machine and decides when to
//! (re)connect; `transport` holds the blocking HTTP fetch and the socket
//! reader thread that feed it.

mod supervisor;
mod transport;

pub use supervisor::{ConnectionId, SocketEvent, Supervisor};
pub use transport::{fetch_snapshot, socket_url, spawn_socket};
