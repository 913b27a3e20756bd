//! Queue mutation: replacing or extending the daemon's play queue with the
//! files of selected albums.

mod command;
mod commander;

pub use command::{QueueCommand, QueueIntent, plan};
pub use commander::{QueueCommander, QueueOutcome};
