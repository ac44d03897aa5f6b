//! Library snapshot types and their JSON decoding.
//!
//! A `LibrarySnapshot` is the client's read-only copy of the server's
//! playlists. It is rebuilt from scratch on every push.

mod model;
mod parse;

pub use model::*;
