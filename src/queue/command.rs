//! Queue commands and the planner that orders them.

use std::fmt;

use crate::library::AlbumEntry;
use crate::session::{MusicService, SessionError};

/// What to do with the current queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QueueIntent {
    /// Clear the queue, add the selection and start playback.
    Replace,
    /// Add the selection after whatever is queued.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueCommand {
    /// Empty the queue.
    Clear,
    /// Append one file to the queue.
    Add(String),
    /// Start playback.
    Play,
}

impl QueueCommand {
    /// Issue the command on `client`, once.
    pub fn send<C: MusicService + ?Sized>(&self, client: &mut C) -> Result<(), SessionError> {
        match self {
            Self::Clear => client.clear(),
            Self::Add(file) => client.add(file),
            Self::Play => client.play(),
        }
    }
}

impl fmt::Display for QueueCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => f.write_str("clear"),
            Self::Add(file) => write!(f, "add {file:?}"),
            Self::Play => f.write_str("play"),
        }
    }
}

/// Commands for `intent` over `selection`: albums in selection order, each
/// album's files in record order.
pub fn plan<'a, I>(intent: QueueIntent, selection: I) -> Vec<QueueCommand>
where
    I: IntoIterator<Item = &'a AlbumEntry>,
{
    let mut commands = Vec::new();
    if intent == QueueIntent::Replace {
        commands.push(QueueCommand::Clear);
    }
    for entry in selection {
        commands.extend(entry.files().map(|f| QueueCommand::Add(f.to_string())));
    }
    if intent == QueueIntent::Replace {
        commands.push(QueueCommand::Play);
    }
    commands
}
