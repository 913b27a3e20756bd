use thiserror::Error;

/// Errors raised while talking to the daemon.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("unable to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: mpd::error::Error,
    },
    #[error("server rejected `{command}` (error {code}): {message}")]
    Ack {
        code: u32,
        command: String,
        message: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("not connected")]
    NotConnected,
}

impl SessionError {
    /// Server-side error code for a bad password.
    pub const ACK_PASSWORD: u32 = 3;
    /// Server-side error code for a missing file or directory.
    pub const ACK_NO_EXIST: u32 = 50;

    /// Whether the daemon refused our credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Ack { code, .. } if *code == Self::ACK_PASSWORD)
    }

    /// Whether the daemon answered, but refused this one command.
    ///
    /// The connection is still usable afterwards.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Ack { .. })
    }
}

impl From<mpd::error::Error> for SessionError {
    fn from(err: mpd::error::Error) -> Self {
        match err {
            mpd::error::Error::Io(e) => Self::Io(e),
            mpd::error::Error::Server(e) => Self::Ack {
                code: e.code as u32,
                command: e.command,
                message: e.detail,
            },
            other => Self::Protocol(other.to_string()),
        }
    }
}
