//! Sessions against the music player daemon.
//!
//! `client` holds the [`MusicService`] trait and its implementation on top
//! of the `mpd` crate, and `manager` the [`SessionManager`] that connects and
//! authenticates a fresh client for every top-level operation.

mod client;
mod error;
mod manager;

pub use client::{ListEntry, MpdClient, MusicService};
pub use error::SessionError;
pub use manager::{Session, SessionManager};

#[cfg(test)]
pub(crate) mod testing;
