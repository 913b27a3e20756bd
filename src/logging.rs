//! stderr logging for the binary.

use crate::config::LogSettings;

/// Install the global logger at the configured level.
///
/// Only the first call has an effect.
pub fn init(settings: &LogSettings) {
    let mut clog = colog::default_builder();
    clog.filter(None, settings.level.into());
    if clog.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
