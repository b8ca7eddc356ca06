//! Disc serial extraction.
//!
//! GameCube and Wii images carry their game ID at a fixed offset, which moves
//! when the image is wrapped in a WBFS, RVZ or WIA container. CHD images for
//! other consoles are handed to an external helper that prints the serial.

use std::fs::File;
use std::io::{Read, SeekFrom};
use std::path::Path;
use std::process::Command;

use crate::ReadSeek;
use crate::disc::disc_suffix;
use crate::error::IdentityError;
use crate::region::Region;

/// Prefix of every GameCube product serial.
pub const GAMECUBE_SERIAL_PREFIX: &str = "DL-DOL-";

/// RVZ and WIA containers store the disc header copy at 0x58.
const COMPRESSED_SIGNATURES: [&[u8]; 2] = [b"RVZ", b"WIA"];
const COMPRESSED_ID_OFFSET: u64 = 0x58;

/// WBFS containers put the disc header in the second 512-byte sector.
const WBFS_SIGNATURE: &[u8] = b"WBFS";
const WBFS_ID_OFFSET: u64 = 0x200;

const GAMECUBE_ID_LEN: usize = 4;
const WII_ID_LEN: usize = 6;

/// How the serial of a system's disc images is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialFamily {
    /// `DL-DOL-` + 4-character game code + disc + region suffix
    GameCube,
    /// 6-character game ID + disc suffix
    Wii,
    /// Serial printed by the external CHD helper
    External,
}

impl SerialFamily {
    /// Look up the family for a playlist/system name.
    pub fn for_system(system: &str) -> Option<Self> {
        match system {
            "Nintendo - GameCube" => Some(Self::GameCube),
            "Nintendo - Wii" => Some(Self::Wii),
            "Sega - Dreamcast"
            | "Sega - Mega-CD - Sega CD"
            | "Sega - Saturn"
            | "Sony - PlayStation"
            | "Sony - PlayStation 2"
            | "Sony - PlayStation Portable" => Some(Self::External),
            _ => None,
        }
    }
}

/// Read exactly `len` bytes at `offset`, failing if the stream is shorter.
pub fn read_at_offset(
    reader: &mut dyn ReadSeek,
    offset: u64,
    len: usize,
) -> Result<Vec<u8>, IdentityError> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::with_capacity(len);
    Read::take(&mut *reader, len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(IdentityError::ShortRead {
            offset,
            expected: len,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

fn is_compressed(raw: &[u8]) -> bool {
    COMPRESSED_SIGNATURES.iter().any(|sig| raw.starts_with(sig))
}

fn decode_game_id(raw: Vec<u8>) -> Result<String, IdentityError> {
    String::from_utf8(raw).map_err(|_| IdentityError::format("game ID is not valid UTF-8"))
}

/// GameCube serial, e.g. `DL-DOL-GALE-USA` or `DL-DOL-GALE-1-USA` for disc 2.
///
/// `path` is only consulted for its "(Disc N)" tag.
pub fn gamecube_serial(reader: &mut dyn ReadSeek, path: &str) -> Result<String, IdentityError> {
    let mut raw = read_at_offset(reader, 0, GAMECUBE_ID_LEN)?;
    if is_compressed(&raw) {
        raw = read_at_offset(reader, COMPRESSED_ID_OFFSET, GAMECUBE_ID_LEN)?;
    }

    let code = decode_game_id(raw)?;
    let region = code.chars().nth(3).and_then(Region::from_code_char);

    let mut serial = format!("{GAMECUBE_SERIAL_PREFIX}{code}{}", disc_suffix(path));
    if let Some(region) = region {
        serial.push('-');
        serial.push_str(region.code());
    }
    Ok(serial)
}

/// Wii serial: the 6-character game ID plus disc suffix, e.g. `RMCE01`.
pub fn wii_serial(reader: &mut dyn ReadSeek, path: &str) -> Result<String, IdentityError> {
    let mut raw = read_at_offset(reader, 0, WII_ID_LEN)?;
    if raw.starts_with(WBFS_SIGNATURE) {
        raw = read_at_offset(reader, WBFS_ID_OFFSET, WII_ID_LEN)?;
    }
    if is_compressed(&raw) {
        raw = read_at_offset(reader, COMPRESSED_ID_OFFSET, WII_ID_LEN)?;
    }

    Ok(format!("{}{}", decode_game_id(raw)?, disc_suffix(path)))
}

/// Run `<tool> <file>` and return its trimmed stdout. Blocks until the tool exits.
pub fn external_serial(tool: &Path, file: &Path) -> Result<String, IdentityError> {
    if tool.as_os_str().is_empty() {
        return Err(IdentityError::unsupported(
            "no serial helper configured (set chd_serial in settings)",
        ));
    }

    let output = Command::new(tool).arg(file).output()?;
    if !output.status.success() {
        let captured = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        log::error!("Serial helper failed. Output was:\n{}", captured);
        return Err(IdentityError::ExternalTool {
            tool: tool.display().to_string(),
            status: output.status.to_string(),
            output: captured.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Extract the serial of `path` using the rule for `system`.
pub fn extract_serial(
    path: &Path,
    system: &str,
    helper: Option<&Path>,
) -> Result<String, IdentityError> {
    let family = SerialFamily::for_system(system)
        .ok_or_else(|| IdentityError::unsupported(format!("No serial support for system {system}")))?;
    log::debug!("Extracting {:?} serial from {}", family, path.display());

    match family {
        SerialFamily::GameCube => {
            let mut file = File::open(path)?;
            gamecube_serial(&mut file, &path.to_string_lossy())
        }
        SerialFamily::Wii => {
            let mut file = File::open(path)?;
            wii_serial(&mut file, &path.to_string_lossy())
        }
        SerialFamily::External => external_serial(helper.unwrap_or(Path::new("")), path),
    }
}

#[cfg(test)]
#[path = "tests/serial_tests.rs"]
mod tests;
