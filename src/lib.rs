//! Album catalog and queue control for a music player daemon.
//!
//! [`library::CatalogBuilder`] turns the daemon's flat track listing into a
//! sorted, de-duplicated list of albums; [`queue::QueueCommander`] replaces
//! or extends the play queue with the files of selected albums. Both open
//! their own session through [`session::SessionManager`].

pub mod config;
pub mod host;
pub mod library;
pub mod logging;
pub mod queue;
pub mod runtime;
pub mod session;
