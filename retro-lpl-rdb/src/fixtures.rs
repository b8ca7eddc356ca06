//! Byte builders for hand-assembled RDB buffers used in unit tests.

use crate::rdb::RDB_MAGIC;

pub(crate) fn str_val(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = if bytes.len() < 32 {
        vec![0xa0 | bytes.len() as u8]
    } else {
        vec![0xd9, bytes.len() as u8]
    };
    out.extend_from_slice(bytes);
    out
}

pub(crate) fn bin_val(bytes: &[u8]) -> Vec<u8> {
    let mut out = vec![0xc4, bytes.len() as u8];
    out.extend_from_slice(bytes);
    out
}

pub(crate) fn uint_val(v: u64) -> Vec<u8> {
    let mut out = vec![0xcf];
    out.extend_from_slice(&v.to_be_bytes());
    out
}

pub(crate) fn map_val(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    assert!(entries.len() < 16);
    let mut out = vec![0x80 | entries.len() as u8];
    for (key, value) in entries {
        out.extend(str_val(key));
        out.extend_from_slice(value);
    }
    out
}

/// A game record the way RetroArch writes them: CRC as 4 bytes of binary.
pub(crate) fn game(name: &str, crc: u32) -> Vec<u8> {
    map_val(&[
        ("name", str_val(name)),
        ("rom_name", str_val(&format!("{name}.bin"))),
        ("size", uint_val(1024)),
        ("crc", bin_val(&crc.to_be_bytes())),
    ])
}

pub(crate) fn serial_game(name: &str, serial: &str) -> Vec<u8> {
    map_val(&[("name", str_val(name)), ("serial", str_val(serial))])
}

/// Assemble a full RDB file: header, records, nil terminator, then a
/// `{count: N}` metadata map that the header points at.
pub(crate) fn rdb_with_metadata(records: &[Vec<u8>], count: u64) -> Vec<u8> {
    let mut out = RDB_MAGIC.to_vec();
    out.extend_from_slice(&[0u8; 8]);
    for record in records {
        out.extend_from_slice(record);
    }
    out.push(0xc0);
    let metadata_offset = out.len() as u64;
    out.extend(map_val(&[("count", uint_val(count))]));
    out[8..16].copy_from_slice(&metadata_offset.to_be_bytes());
    out
}

/// Assemble an RDB file with a zero metadata offset.
pub(crate) fn rdb_without_metadata(values: &[Vec<u8>]) -> Vec<u8> {
    let mut out = RDB_MAGIC.to_vec();
    out.extend_from_slice(&[0u8; 8]);
    for value in values {
        out.extend_from_slice(value);
    }
    out
}
