//! Configuration loader and schema types.
//!
//! This module exposes the connection and logging settings and helpers to
//! load them from the environment and disk.

mod load;
mod schema;

pub use load::{CONFIG_PATH_VAR, ENV_PREFIX, resolve_config_path};
pub use schema::*;
