use std::path::Path;

use retro_lpl_core::util::format_crc32;

use crate::error::RdbError;
use crate::value::{Value, ValueReader};

/// File magic: "RARCHDB" followed by a NUL.
pub const RDB_MAGIC: &[u8; 8] = b"RARCHDB\0";

/// Records start right after the magic and metadata offset.
const RECORDS_OFFSET: usize = 0x10;

/// A single game entry from an RDB catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    pub name: String,
    pub rom_name: String,
    pub size: u64,
    /// CRC32 checksum (8 uppercase hex digits), if present
    pub crc32: Option<String>,
    /// Serial number, if present and non-empty
    pub serial: Option<String>,
}

impl GameRecord {
    /// Build a record from a decoded top-level map. Unknown keys are ignored;
    /// a repeated key overwrites the earlier value.
    fn from_entries(entries: Vec<(String, Value)>) -> Self {
        let mut game = GameRecord::default();

        for (key, value) in entries {
            match key.as_str() {
                "name" => {
                    if let Some(s) = value.as_str() {
                        game.name = s.to_string();
                    }
                }
                "rom_name" => {
                    if let Some(s) = value.as_str() {
                        game.rom_name = s.to_string();
                    }
                }
                "size" => {
                    if let Some(size) = value.as_be_uint() {
                        game.size = size;
                    }
                }
                "crc" => match value.as_be_uint().map(u32::try_from) {
                    Some(Ok(crc)) => game.crc32 = Some(format_crc32(crc)),
                    _ => log::warn!("Ignoring unreadable crc for '{}'", game.name),
                },
                "serial" => {
                    game.serial = value
                        .as_str()
                        .filter(|s| !s.is_empty())
                        .map(str::to_string);
                }
                _ => {}
            }
        }

        game
    }

    /// Whether `identity` equals this record's CRC or its serial.
    pub fn matches_identity(&self, identity: &str) -> bool {
        self.crc32.as_deref() == Some(identity) || self.serial.as_deref() == Some(identity)
    }

    /// The identity to report for this record: CRC, else serial.
    pub fn identity(&self) -> &str {
        self.crc32
            .as_deref()
            .or(self.serial.as_deref())
            .unwrap_or_default()
    }
}

/// A named, immutable list of game records in decode order.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    games: Vec<GameRecord>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, games: Vec<GameRecord>) -> Self {
        Self {
            name: name.into(),
            games,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Read the `{count: N}` metadata map at `offset`.
fn read_expected_count(data: &[u8], offset: u64) -> Result<u64, RdbError> {
    let offset = usize::try_from(offset)
        .map_err(|_| RdbError::format(format!("metadata offset {offset:#x} out of range")))?;
    let metadata = ValueReader::new(data, offset).read_value()?;
    if !matches!(metadata, Value::Map(_)) {
        return Err(RdbError::format("metadata is not a map"));
    }
    metadata
        .get("count")
        .and_then(Value::as_be_uint)
        .ok_or_else(|| RdbError::format("metadata has no count"))
}

/// Decode the game records of an RDB buffer.
pub fn parse_rdb(data: &[u8]) -> Result<Vec<GameRecord>, RdbError> {
    if data.len() < RDB_MAGIC.len() || &data[..RDB_MAGIC.len()] != RDB_MAGIC {
        return Err(RdbError::format("bad magic"));
    }
    if data.len() < RECORDS_OFFSET {
        return Err(RdbError::format("unexpected end of data in header"));
    }

    let mut offset_bytes = [0u8; 8];
    offset_bytes.copy_from_slice(&data[8..RECORDS_OFFSET]);
    let metadata_offset = u64::from_be_bytes(offset_bytes);

    let expected = if metadata_offset == 0 {
        None
    } else {
        Some(read_expected_count(data, metadata_offset)?)
    };

    let mut reader = ValueReader::new(data, RECORDS_OFFSET);
    let mut games = Vec::new();

    while expected.is_none_or(|n| (games.len() as u64) < n) && !reader.is_at_end() {
        let Value::Map(entries) = reader.read_value()? else {
            continue;
        };
        // The metadata map itself, re-encountered when the count is unknown
        if reader.is_at_end() && entries.len() == 1 && entries[0].0 == "count" {
            continue;
        }
        games.push(GameRecord::from_entries(entries));
    }

    match expected {
        Some(n) if n != games.len() as u64 => log::warn!(
            "Actual count ({}) differs from expected count ({})",
            games.len(),
            n
        ),
        _ => log::info!("RDB entry count: {}", games.len()),
    }

    Ok(games)
}

/// Load an RDB file. The catalog is named after the file stem.
pub fn parse_rdb_file(path: &Path) -> Result<Catalog, RdbError> {
    log::info!("Reading {}...", path.display());
    let data = std::fs::read(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Catalog::new(name, parse_rdb(&data)?))
}

#[cfg(test)]
#[path = "tests/rdb_tests.rs"]
mod tests;
