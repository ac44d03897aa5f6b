//! Errors from talking to the server.
//!
//! The engine itself never fails; these only come out of the transport
//! helpers and are logged where they are caught.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(Box<ureq::Error>),

    #[error("socket error: {0}")]
    Socket(#[from] tungstenite::Error),

    #[error("malformed library payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid server url {url:?}: {reason}")]
    Url { url: String, reason: String },
}

impl From<ureq::Error> for ClientError {
    fn from(e: ureq::Error) -> Self {
        Self::Http(Box::new(e))
    }
}
