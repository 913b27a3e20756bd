//! Command-line flags for the `mpdalbums` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Browse the albums of a music player daemon and queue them up.
#[derive(Debug, Parser)]
#[command(name = "mpdalbums", version = env!("CARGO_PKG_VERSION"), about)]
pub struct Flags {
    /// config file path, instead of `$MPDALBUMS_CONFIG_PATH` or the XDG default
    #[clap(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// subcommand to run, `list` when omitted
    #[clap(subcommand)]
    pub subcommand: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List albums, numbered
    #[clap(alias = "ls")]
    List,
    /// Replace the queue with the given albums and start playback
    Play {
        /// album numbers, as printed by `list`
        #[clap(required = true, value_parser = album_number)]
        albums: Vec<usize>,
    },
    /// Append the given albums to the queue
    #[clap(alias = "add")]
    Enqueue {
        /// album numbers, as printed by `list`
        #[clap(required = true, value_parser = album_number)]
        albums: Vec<usize>,
    },
    /// Print the effective configuration
    Config,
}

fn album_number(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("`{arg}` is not an album number")),
    }
}
