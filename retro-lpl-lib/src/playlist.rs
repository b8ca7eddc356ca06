//! RetroArch playlist (`.lpl`) documents.
//!
//! Playlists are JSON. Entries are kept as ordered maps so that rewriting a
//! playlist changes only the fields that were updated: unknown keys and key
//! order survive a round trip.

use std::fs;
use std::path::Path;

use retro_lpl_core::util::{file_extension, file_stem};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LplError;

/// One playlist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistEntry(Map<String, Value>);

impl PlaylistEntry {
    /// Build an entry from the three fields the tools read.
    pub fn new(path: &str, label: &str, crc32: &str) -> Self {
        let mut entry = Self(Map::new());
        entry.set_path(path);
        entry.set_label(label);
        entry.set_crc32(crc32);
        entry
    }

    /// A string field, or "" when absent or not a string.
    pub fn field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    fn set_field(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), Value::String(value.to_string()));
    }

    pub fn path(&self) -> &str {
        self.field("path")
    }

    pub fn label(&self) -> &str {
        self.field("label")
    }

    pub fn crc32(&self) -> &str {
        self.field("crc32")
    }

    pub fn set_path(&mut self, path: &str) {
        self.set_field("path", path);
    }

    pub fn set_label(&mut self, label: &str) {
        self.set_field("label", label);
    }

    pub fn set_crc32(&mut self, crc32: &str) {
        self.set_field("crc32", crc32);
    }

    /// Lowercased extension of `path`, with the dot.
    pub fn extension(&self) -> String {
        file_extension(Path::new(self.path()))
    }

    /// File name of `path` without its extension.
    pub fn path_stem(&self) -> String {
        file_stem(Path::new(self.path()))
    }
}

/// A parsed playlist and the name it was loaded under.
#[derive(Debug, Clone)]
pub struct Playlist {
    /// File stem, e.g. "Nintendo - GameCube"
    name: String,
    /// Root object; its `items` value is carried in `items` until serialized
    root: Map<String, Value>,
    items: Vec<PlaylistEntry>,
}

impl Playlist {
    /// Parse playlist JSON. The root must contain an `items` array.
    pub fn parse(text: &str, name: impl Into<String>) -> Result<Self, LplError> {
        let mut root = match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            _ => return Err(LplError::MissingItems),
        };
        let items = match root.get_mut("items").map(Value::take) {
            Some(items @ Value::Array(_)) => serde_json::from_value(items)?,
            _ => return Err(LplError::MissingItems),
        };

        Ok(Self {
            name: name.into(),
            root,
            items,
        })
    }

    /// Read a playlist file, naming it after the file stem.
    pub fn load(path: &Path) -> Result<Self, LplError> {
        log::debug!("Loading playlist {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::parse(&text, file_stem(path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[PlaylistEntry] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<PlaylistEntry> {
        &mut self.items
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, LplError> {
        let mut root = self.root.clone();
        root.insert("items".to_string(), serde_json::to_value(&self.items)?);
        let mut text = serde_json::to_string_pretty(&Value::Object(root))?;
        text.push('\n');
        Ok(text)
    }

    /// Write the playlist over `path` by way of a temporary file.
    pub fn save(&self, path: &Path) -> Result<(), LplError> {
        let serialized = self.to_pretty_string()?;
        let tmp = path.with_extension("lpl.tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, path)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/playlist_tests.rs"]
mod tests;
