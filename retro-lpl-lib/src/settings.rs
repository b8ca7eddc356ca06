//! User settings (helper tool, catalog directory, missing-entry exclusions).
//!
//! The settings file is `~/.config/retro-lpl/settings.toml`. Path settings
//! resolve through a priority chain: command-line flag, then environment
//! variable, then the settings file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LplError;

pub const CHD_SERIAL_ENV: &str = "RETRO_LPL_CHD_SERIAL";
pub const RDB_DIR_ENV: &str = "RETRO_LPL_RDB_DIR";

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub paths: PathSettings,
    pub missing: MissingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// External serial helper for compressed disc images
    pub chd_serial: Option<PathBuf>,
    /// Directory holding `<catalog>.rdb` files
    pub rdb_dir: Option<PathBuf>,
}

/// Files to ignore when looking for missing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingSettings {
    /// Exact file names, e.g. "desktop.ini"
    pub name_exclusions: Vec<String>,
    /// Extensions with the dot, e.g. ".sav"
    pub extension_exclusions: Vec<String>,
}

/// Canonical path to the settings file: `~/.config/retro-lpl/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("retro-lpl").join("settings.toml")
}

/// Read settings from `path`. A missing file gives the defaults.
pub fn load_settings_from(path: &Path) -> Result<SettingsFile, LplError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(SettingsFile::default());
        }
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&contents)
        .map_err(|e| LplError::config(format!("{}: {}", path.display(), e)))
}

/// Read the settings file at its canonical location.
pub fn load_settings() -> Result<SettingsFile, LplError> {
    load_settings_from(&settings_path())
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    CommandLine,
    EnvVar(&'static str),
    ConfigFile,
    Missing,
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// A path setting and its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: Option<PathBuf>,
    pub source: SettingSource,
}

impl Resolved {
    fn pick(
        cli: Option<PathBuf>,
        env_var: &'static str,
        file: Option<&PathBuf>,
        env: &impl Fn(&str) -> Option<String>,
    ) -> Self {
        if let Some(p) = cli {
            return Self {
                value: Some(p),
                source: SettingSource::CommandLine,
            };
        }
        if let Some(v) = env(env_var).filter(|v| !v.is_empty()) {
            return Self {
                value: Some(PathBuf::from(v)),
                source: SettingSource::EnvVar(env_var),
            };
        }
        match file.filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => Self {
                value: Some(p.clone()),
                source: SettingSource::ConfigFile,
            },
            None => Self {
                value: None,
                source: SettingSource::Missing,
            },
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.value.as_deref()
    }
}

/// Settings after applying command-line and environment overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub chd_serial: Resolved,
    pub rdb_dir: Resolved,
    pub missing: MissingSettings,
}

impl Settings {
    /// Resolve against the process environment.
    pub fn resolve(
        file: SettingsFile,
        cli_chd_serial: Option<PathBuf>,
        cli_rdb_dir: Option<PathBuf>,
    ) -> Self {
        Self::resolve_with(file, cli_chd_serial, cli_rdb_dir, |var| {
            std::env::var(var).ok()
        })
    }

    /// Resolve with a caller-supplied environment lookup.
    pub fn resolve_with(
        file: SettingsFile,
        cli_chd_serial: Option<PathBuf>,
        cli_rdb_dir: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            chd_serial: Resolved::pick(
                cli_chd_serial,
                CHD_SERIAL_ENV,
                file.paths.chd_serial.as_ref(),
                &env,
            ),
            rdb_dir: Resolved::pick(cli_rdb_dir, RDB_DIR_ENV, file.paths.rdb_dir.as_ref(), &env),
            missing: file.missing,
        }
    }
}
