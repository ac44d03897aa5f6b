//! Application model: the view state store and the reconciler.
//!
//! `ViewState` holds the browsing and playing cursors, the connection status
//! and the last applied library snapshot. `reconcile` derives a new state
//! from an old one and a fresh snapshot.

mod model;
mod reconcile;

pub use model::*;
pub use reconcile::{Reconciliation, reconcile};

#[cfg(test)]
mod tests;
