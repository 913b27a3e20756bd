use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::schema::Settings;

/// Prefix of environment overrides, e.g. `MPDALBUMS__MPD__HOST`.
pub const ENV_PREFIX: &str = "MPDALBUMS";
/// Explicit config file location.
pub const CONFIG_PATH_VAR: &str = "MPDALBUMS_CONFIG_PATH";

impl Settings {
    /// Layer the process environment over the file at `path`, if any, over
    /// struct defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        Self::load_from(path, None)
    }

    /// Like [`Settings::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_from(
        path: Option<&Path>,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        // Ports must stay strings, so no `try_parsing` here.
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(env),
        );

        builder.build()?.try_deserialize()
    }

    /// Load and validate, falling back to defaults on any problem. The reason
    /// for a fallback is handed back so it can be logged once logging is up.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<String>) {
        match Self::load(path) {
            Ok(settings) => match settings.validate() {
                Ok(()) => (settings, None),
                Err(msg) => (Self::default(), Some(format!("invalid config, using defaults: {msg}"))),
            },
            Err(err) => (
                Self::default(),
                Some(format!("failed to load config, using defaults: {err}")),
            ),
        }
    }

    /// Reject a blank host or a port that does not fit a `u16`.
    pub fn validate(&self) -> Result<(), String> {
        if self.mpd.host.trim().is_empty() {
            return Err("mpd.host must not be empty".to_string());
        }
        if self.mpd.port.trim().parse::<u16>().is_err() {
            return Err(format!(
                "mpd.port must be a port number, got {:?}",
                self.mpd.port
            ));
        }
        Ok(())
    }

    /// Render the effective settings as TOML with the password masked.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if !shown.mpd.password.is_empty() {
            shown.mpd.password = "********".to_string();
        }
        toml::to_string_pretty(&shown)
    }
}

/// The config file to read: `$MPDALBUMS_CONFIG_PATH`, else
/// `$XDG_CONFIG_HOME/mpdalbums/config.toml`, else
/// `~/.config/mpdalbums/config.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    config_path_from(
        env::var_os(CONFIG_PATH_VAR),
        env::var_os("XDG_CONFIG_HOME"),
        env::var_os("HOME"),
    )
}

pub(super) fn config_path_from(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.into());
    }
    xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".config")))
        .map(|dir| dir.join("mpdalbums").join("config.toml"))
}
