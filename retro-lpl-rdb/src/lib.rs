//! RetroArch database (`.rdb`) support.
//!
//! Decodes the tag-length-value catalog format, caches catalogs per run, and
//! classifies how a (name, identity) pair relates to catalog contents.

pub mod error;
pub mod index;
pub mod matcher;
pub mod rdb;
pub mod systems;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use error::RdbError;
pub use index::CatalogIndex;
pub use matcher::{SearchResult, find_game, find_game_in_catalogs, find_game_in_catalogs_with};
pub use rdb::{Catalog, GameRecord, RDB_MAGIC, parse_rdb, parse_rdb_file};
pub use systems::catalogs_for_extension;
pub use value::Value;
