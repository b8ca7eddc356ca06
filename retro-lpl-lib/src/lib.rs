//! Playlist checks for RetroArch `.lpl` files.
//!
//! Validates and updates declared CRCs and serials, cross-checks entries
//! against RetroArch catalogs, and audits entry paths.

pub mod audit;
pub mod error;
pub mod findings;
pub mod playlist;
pub mod settings;
pub mod validate;

pub use audit::{add_missing, find_missing, validate_paths};
pub use error::LplError;
pub use findings::Findings;
pub use playlist::{Playlist, PlaylistEntry};
pub use settings::{MissingSettings, Settings, SettingsFile};
pub use validate::{CrcMode, CrcReport, check_database, validate_crcs};
