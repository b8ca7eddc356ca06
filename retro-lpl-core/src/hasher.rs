use std::fs::File;
use std::io::{Read, SeekFrom};
use std::path::Path;

use crate::ReadSeek;
use crate::error::IdentityError;
use crate::util::{file_extension, format_crc32};

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Leading bytes of an iNES / NES 2.0 image ("NES" + EOF).
pub const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Size of the iNES header that precedes the ROM data.
pub const INES_HEADER_SIZE: u64 = 0x10;

/// CRC-32 checksums for a cartridge image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrcIdentity {
    /// CRC-32 of the whole file
    pub file_crc: String,
    /// CRC-32 with the format header stripped, only for headered images
    pub rom_crc: Option<String>,
}

/// How a declared CRC relates to a [`CrcIdentity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrcComparison {
    Match,
    Mismatch,
    /// Declared value is the whole-file CRC of a headered image. Byte-equal
    /// but not a match: catalogs record the header-stripped CRC.
    StaleFileCrc,
}

impl CrcIdentity {
    /// The CRC that should be declared for this file.
    pub fn expected(&self) -> &str {
        self.rom_crc.as_deref().unwrap_or(&self.file_crc)
    }

    pub fn is_headered(&self) -> bool {
        self.rom_crc.is_some()
    }

    pub fn compare(&self, declared: &str) -> CrcComparison {
        match &self.rom_crc {
            Some(rom_crc) => {
                if declared == self.file_crc {
                    CrcComparison::StaleFileCrc
                } else if declared == rom_crc {
                    CrcComparison::Match
                } else {
                    CrcComparison::Mismatch
                }
            }
            None if declared == self.file_crc => CrcComparison::Match,
            None => CrcComparison::Mismatch,
        }
    }
}

/// Compute the CRC-32 of everything from `offset` to end of stream,
/// reading in 64KB chunks.
pub fn compute_crc32(reader: &mut dyn ReadSeek, offset: u64) -> Result<String, IdentityError> {
    reader.seek(SeekFrom::Start(offset))?;

    let mut hasher = crc32fast::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format_crc32(hasher.finalize()))
}

/// Compute the whole-file CRC-32 and the CRC-32 after skipping `skip` bytes
/// in a single streaming pass.
pub fn compute_crc32_pair(
    reader: &mut dyn ReadSeek,
    skip: u64,
) -> Result<(String, String), IdentityError> {
    reader.seek(SeekFrom::Start(0))?;

    let mut full = crc32fast::Hasher::new();
    let mut stripped = crc32fast::Hasher::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut consumed: u64 = 0;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        full.update(&buf[..n]);
        let start = skip.saturating_sub(consumed).min(n as u64) as usize;
        stripped.update(&buf[start..n]);
        consumed += n as u64;
    }

    Ok((format_crc32(full.finalize()), format_crc32(stripped.finalize())))
}

/// Check for the iNES signature. Files shorter than the signature are not headered.
pub fn has_ines_header(reader: &mut dyn ReadSeek) -> Result<bool, IdentityError> {
    reader.seek(SeekFrom::Start(0))?;
    let mut magic = Vec::with_capacity(INES_MAGIC.len());
    Read::take(&mut *reader, INES_MAGIC.len() as u64).read_to_end(&mut magic)?;
    Ok(magic == INES_MAGIC)
}

/// Compute the CRC identity of a reader. When `headered_format` is set and
/// the iNES signature is present, the header-stripped CRC is computed too.
pub fn compute_crc_identity(
    reader: &mut dyn ReadSeek,
    headered_format: bool,
) -> Result<CrcIdentity, IdentityError> {
    if headered_format && has_ines_header(reader)? {
        let (file_crc, rom_crc) = compute_crc32_pair(reader, INES_HEADER_SIZE)?;
        return Ok(CrcIdentity {
            file_crc,
            rom_crc: Some(rom_crc),
        });
    }

    Ok(CrcIdentity {
        file_crc: compute_crc32(reader, 0)?,
        rom_crc: None,
    })
}

/// Whether files with this extension may carry a strippable header.
pub fn is_headered_format(extension: &str) -> bool {
    extension == ".nes"
}

/// Open a file and compute its CRC identity, choosing the header rule by extension.
pub fn crc_identity_for_path(path: &Path) -> Result<CrcIdentity, IdentityError> {
    let headered = is_headered_format(&file_extension(path));
    let mut file = File::open(path)?;
    compute_crc_identity(&mut file, headered)
}

#[cfg(test)]
#[path = "tests/hasher_tests.rs"]
mod tests;
