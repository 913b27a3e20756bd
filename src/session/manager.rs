use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use log::debug;

use super::client::{MpdClient, MusicService};
use super::error::SessionError;
use crate::config::MpdSettings;

type ClientFactory<C> = Arc<dyn Fn() -> C + Send + Sync>;

/// Opens fresh, authenticated sessions against the daemon.
///
/// Nothing is pooled: every call to [`SessionManager::session`] builds a new
/// client and connects it.
pub struct SessionManager<C = MpdClient> {
    settings: MpdSettings,
    new_client: ClientFactory<C>,
}

impl<C> Clone for SessionManager<C> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            new_client: Arc::clone(&self.new_client),
        }
    }
}

impl SessionManager<MpdClient> {
    pub fn new(settings: MpdSettings) -> Self {
        Self::with_client(settings, MpdClient::new)
    }
}

impl<C: MusicService> SessionManager<C> {
    /// Use `new_client` to build the client of each session.
    pub fn with_client<F>(settings: MpdSettings, new_client: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        Self {
            settings,
            new_client: Arc::new(new_client),
        }
    }

    pub fn settings(&self) -> &MpdSettings {
        &self.settings
    }

    /// Connect `client` to the configured host and port.
    pub fn connect(&self, client: &mut C) -> Result<(), SessionError> {
        client.connect(self.settings.host.trim(), self.settings.port.trim())
    }

    /// Send the configured password; a blank password sends nothing.
    pub fn authenticate(&self, client: &mut C) -> Result<(), SessionError> {
        if self.settings.password.is_empty() {
            return Ok(());
        }
        client.password(&self.settings.password)
    }

    /// Open a session. Always hands back a client, connected or not.
    pub fn session(&self) -> Session<C> {
        let mut client = (self.new_client)();
        let status = self
            .connect(&mut client)
            .and_then(|()| self.authenticate(&mut client));

        match &status {
            Ok(()) => debug!("connected to mpd at {}", self.settings.address()),
            Err(err) => debug!("failed to connect to mpd at {}: {err}", self.settings.address()),
        }

        Session { client, status }
    }
}

/// A client plus the outcome of connecting and authenticating it.
///
/// Derefs to the client, so commands can be issued whether or not the
/// session came up; on a failed session they fail individually.
pub struct Session<C> {
    client: C,
    status: Result<(), SessionError>,
}

impl<C> Session<C> {
    pub fn is_connected(&self) -> bool {
        self.status.is_ok()
    }

    /// Why connecting or authenticating failed, if it did.
    pub fn failure(&self) -> Option<&SessionError> {
        self.status.as_ref().err()
    }

    /// The client handle and whether the session is connected.
    pub fn into_parts(self) -> (C, bool) {
        let connected = self.is_connected();
        (self.client, connected)
    }
}

impl<C> Deref for Session<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.client
    }
}

impl<C> DerefMut for Session<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.client
    }
}
