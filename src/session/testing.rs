//! In-memory daemon used by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use super::client::{ListEntry, MusicService};
use super::error::SessionError;
use super::manager::SessionManager;
use crate::config::MpdSettings;
use crate::library::TrackRecord;

/// Every command a client sent, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect(String, String),
    Password(String),
    ListAll,
    ListAllInfo(String),
    Clear,
    Add(String),
    Play,
}

#[derive(Default)]
struct DaemonState {
    listing: Vec<ListEntry>,
    info: HashMap<String, Vec<TrackRecord>>,
    rejected: HashSet<String>,
    broken: HashSet<String>,
    unreachable: bool,
    password: Option<String>,
    calls: Vec<Call>,
    queue: Vec<String>,
    playing: bool,
}

/// Shared fake daemon; hand out clients with [`FakeDaemon::manager`].
#[derive(Clone, Default)]
pub struct FakeDaemon {
    state: Arc<Mutex<DaemonState>>,
}

impl FakeDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    /// A daemon whose database lists `records`, in order.
    pub fn with_records(records: Vec<TrackRecord>) -> Self {
        let daemon = Self::new();
        for record in records {
            daemon.add_record(record);
        }
        daemon
    }

    fn state(&self) -> MutexGuard<'_, DaemonState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_record(&self, record: TrackRecord) {
        let mut state = self.state();
        state.listing.push(ListEntry::File(record.file.clone()));
        state.info.entry(record.file.clone()).or_default().push(record);
    }

    /// Extra metadata for an already listed file.
    pub fn add_info(&self, record: TrackRecord) {
        self.state().info.entry(record.file.clone()).or_default().push(record);
    }

    /// List a file the daemon has no metadata for.
    pub fn add_bare_file(&self, file: &str) {
        self.state().listing.push(ListEntry::File(file.to_string()));
    }

    /// List a file whose metadata lookup the daemon refuses.
    pub fn add_rejected_file(&self, file: &str) {
        let mut state = self.state();
        state.listing.push(ListEntry::File(file.to_string()));
        state.rejected.insert(file.to_string());
    }

    /// List a file whose metadata lookup drops the connection.
    pub fn add_broken_file(&self, file: &str) {
        let mut state = self.state();
        state.listing.push(ListEntry::File(file.to_string()));
        state.broken.insert(file.to_string());
    }

    pub fn add_entry(&self, entry: ListEntry) {
        self.state().listing.push(entry);
    }

    pub fn set_unreachable(&self) {
        self.state().unreachable = true;
    }

    pub fn require_password(&self, password: &str) {
        self.state().password = Some(password.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Calls after the session setup (connect and password).
    pub fn commands(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Connect(..) | Call::Password(_)))
            .collect()
    }

    pub fn queue(&self) -> Vec<String> {
        self.state().queue.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state().playing
    }

    pub fn client(&self) -> FakeClient {
        FakeClient {
            daemon: self.clone(),
            connected: false,
            authorized: false,
        }
    }

    pub fn manager(&self) -> SessionManager<FakeClient> {
        self.manager_with(MpdSettings::default())
    }

    pub fn manager_with(&self, settings: MpdSettings) -> SessionManager<FakeClient> {
        let daemon = self.clone();
        SessionManager::with_client(settings, move || daemon.client())
    }
}

pub struct FakeClient {
    daemon: FakeDaemon,
    connected: bool,
    authorized: bool,
}

impl FakeClient {
    /// Record the call, then check that the session may issue commands.
    fn record(&self, call: Call) -> Result<MutexGuard<'_, DaemonState>, SessionError> {
        let mut state = self.daemon.state();
        state.calls.push(call);
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        if state.password.is_some() && !self.authorized {
            return Err(SessionError::Ack {
                code: 4,
                command: "unknown".into(),
                message: "you don't have permission".into(),
            });
        }
        Ok(state)
    }
}

impl MusicService for FakeClient {
    fn connect(&mut self, host: &str, port: &str) -> Result<(), SessionError> {
        let mut state = self.daemon.state();
        state.calls.push(Call::Connect(host.into(), port.into()));
        if state.unreachable {
            return Err(SessionError::Connect {
                address: format!("{host}:{port}"),
                source: mpd::error::Error::Io(std::io::ErrorKind::ConnectionRefused.into()),
            });
        }
        self.connected = true;
        Ok(())
    }

    fn password(&mut self, password: &str) -> Result<(), SessionError> {
        let mut state = self.daemon.state();
        state.calls.push(Call::Password(password.into()));
        if !self.connected {
            return Err(SessionError::NotConnected);
        }
        if state.password.as_deref() != Some(password) {
            return Err(SessionError::Ack {
                code: SessionError::ACK_PASSWORD,
                command: "password".into(),
                message: "incorrect password".into(),
            });
        }
        drop(state);
        self.authorized = true;
        Ok(())
    }

    fn list_all(&mut self) -> Result<Vec<ListEntry>, SessionError> {
        let state = self.record(Call::ListAll)?;
        Ok(state.listing.clone())
    }

    fn list_all_info(&mut self, uri: &str) -> Result<Vec<TrackRecord>, SessionError> {
        let state = self.record(Call::ListAllInfo(uri.into()))?;
        if state.rejected.contains(uri) {
            return Err(SessionError::Ack {
                code: SessionError::ACK_NO_EXIST,
                command: "lsinfo".into(),
                message: "No such directory".into(),
            });
        }
        if state.broken.contains(uri) {
            return Err(SessionError::Io(std::io::ErrorKind::BrokenPipe.into()));
        }
        Ok(state.info.get(uri).cloned().unwrap_or_default())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        let mut state = self.record(Call::Clear)?;
        state.queue.clear();
        state.playing = false;
        Ok(())
    }

    fn add(&mut self, uri: &str) -> Result<(), SessionError> {
        let mut state = self.record(Call::Add(uri.into()))?;
        state.queue.push(uri.to_string());
        Ok(())
    }

    fn play(&mut self) -> Result<(), SessionError> {
        let mut state = self.record(Call::Play)?;
        state.playing = !state.queue.is_empty();
        Ok(())
    }
}
