use log::{debug, warn};

use super::command::{QueueIntent, plan};
use crate::library::AlbumEntry;
use crate::session::{MpdClient, MusicService, SessionManager};

/// How many commands were issued and how many of them failed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct QueueOutcome {
    pub issued: usize,
    pub failed: usize,
}

impl QueueOutcome {
    /// Every command went through.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Turns album selections into queue mutations on the daemon.
pub struct QueueCommander<C = MpdClient> {
    sessions: SessionManager<C>,
}

impl<C: MusicService> QueueCommander<C> {
    pub fn new(sessions: SessionManager<C>) -> Self {
        Self { sessions }
    }

    /// Clear the queue, add every file of `selection`, then start playback.
    pub fn replace(&self, selection: &[AlbumEntry]) -> QueueOutcome {
        self.run(QueueIntent::Replace, selection)
    }

    /// Add every file of `selection` to the end of the queue.
    pub fn append(&self, selection: &[AlbumEntry]) -> QueueOutcome {
        self.run(QueueIntent::Append, selection)
    }

    /// Open a session and issue the planned commands.
    ///
    /// Each command is tried exactly once. Failures are logged and counted,
    /// never raised, so the remaining commands are still attempted.
    pub fn run(&self, intent: QueueIntent, selection: &[AlbumEntry]) -> QueueOutcome {
        let mut session = self.sessions.session();
        let mut outcome = QueueOutcome::default();

        for command in plan(intent, selection) {
            outcome.issued += 1;
            if let Err(err) = command.send(&mut *session) {
                outcome.failed += 1;
                warn!("{command} failed: {err}");
            }
        }

        debug!(
            "{intent:?} of {} album(s): {} command(s), {} failed",
            selection.len(),
            outcome.issued,
            outcome.failed
        );
        outcome
    }
}
