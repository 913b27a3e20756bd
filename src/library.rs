//! Album catalog built from the daemon's flat track listing.
//!
//! `model` holds the record and album value types, `catalog` the grouping,
//! sorting and de-duplication, and `index` a pre-grouped lookup of album
//! files.

mod catalog;
mod index;
mod model;

pub use catalog::*;
pub use index::AlbumIndex;
pub use model::*;
