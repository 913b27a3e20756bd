use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mpdalbums/config.toml` or `~/.config/mpdalbums/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MPDALBUMS__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub mpd: MpdSettings,
    pub log: LogSettings,
}

/// Where the music player daemon lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MpdSettings {
    /// The hostname of the daemon.
    pub host: String,
    /// Port number, kept as a string the way it is entered by users.
    pub port: String,
    /// Leave blank if the daemon does not require a password.
    pub password: String,
}

impl Default for MpdSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: "6600".to_string(),
            password: String::new(),
        }
    }
}

impl MpdSettings {
    /// `host:port`, as handed to the socket layer.
    pub fn address(&self) -> String {
        socket_address(&self.host, &self.port)
    }
}

/// Join a host and port, bracketing IPv6 literals such as `::1`.
pub fn socket_address(host: &str, port: &str) -> String {
    let (host, port) = (host.trim(), port.trim());
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum level written to stderr.
    pub level: LogLevelSetting,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevelSetting::Info,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevelSetting {
    #[serde(alias = "none")]
    Off,
    Error,
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelSetting> for log::LevelFilter {
    fn from(level: LogLevelSetting) -> Self {
        match level {
            LogLevelSetting::Off => log::LevelFilter::Off,
            LogLevelSetting::Error => log::LevelFilter::Error,
            LogLevelSetting::Warn => log::LevelFilter::Warn,
            LogLevelSetting::Info => log::LevelFilter::Info,
            LogLevelSetting::Debug => log::LevelFilter::Debug,
            LogLevelSetting::Trace => log::LevelFilter::Trace,
        }
    }
}
