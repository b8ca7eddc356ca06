use super::*;
use std::io::Cursor;

fn ines_rom(payload: &[u8]) -> Vec<u8> {
    let mut data = INES_MAGIC.to_vec();
    data.extend_from_slice(&[0x02, 0x01, 0x01, 0x00]);
    data.extend_from_slice(&[0u8; 8]);
    data.extend_from_slice(payload);
    data
}

#[test]
fn test_crc32_empty() {
    let mut cursor = Cursor::new(Vec::<u8>::new());
    assert_eq!(compute_crc32(&mut cursor, 0).unwrap(), "00000000");
}

#[test]
fn test_crc32_check_value() {
    // Standard CRC-32 check value
    let mut cursor = Cursor::new(b"123456789".to_vec());
    assert_eq!(compute_crc32(&mut cursor, 0).unwrap(), "CBF43926");
}

#[test]
fn test_crc32_from_offset() {
    let mut cursor = Cursor::new(b"XXXX123456789".to_vec());
    assert_eq!(compute_crc32(&mut cursor, 4).unwrap(), "CBF43926");
}

#[test]
fn test_crc32_offset_past_end() {
    let mut cursor = Cursor::new(b"abc".to_vec());
    assert_eq!(compute_crc32(&mut cursor, 100).unwrap(), "00000000");
}

#[test]
fn test_crc32_spans_chunks() {
    // Three and a bit chunks so the boundary handling is exercised
    let data: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
    let expected = format_crc32(crc32fast::hash(&data));
    let mut cursor = Cursor::new(data);
    assert_eq!(compute_crc32(&mut cursor, 0).unwrap(), expected);
}

#[test]
fn test_crc32_pair_matches_separate_passes() {
    let data: Vec<u8> = (0..(CHUNK_SIZE + 100)).map(|i| (i % 7) as u8).collect();
    let mut cursor = Cursor::new(data);
    let (full, stripped) = compute_crc32_pair(&mut cursor, 16).unwrap();
    assert_eq!(full, compute_crc32(&mut cursor, 0).unwrap());
    assert_eq!(stripped, compute_crc32(&mut cursor, 16).unwrap());
}

#[test]
fn test_ines_header_detection() {
    let mut headered = Cursor::new(ines_rom(b"PRG"));
    assert!(has_ines_header(&mut headered).unwrap());

    let mut raw = Cursor::new(b"\x00\x01\x02\x03PRG".to_vec());
    assert!(!has_ines_header(&mut raw).unwrap());

    let mut short = Cursor::new(b"NES".to_vec());
    assert!(!has_ines_header(&mut short).unwrap());
}

#[test]
fn test_headered_identity_strips_header() {
    let mut cursor = Cursor::new(ines_rom(b"123456789"));
    let identity = compute_crc_identity(&mut cursor, true).unwrap();
    assert!(identity.is_headered());
    assert_eq!(identity.rom_crc.as_deref(), Some("CBF43926"));
    assert_ne!(identity.file_crc, "CBF43926");
    assert_eq!(identity.expected(), "CBF43926");
}

#[test]
fn test_header_ignored_for_other_formats() {
    let mut cursor = Cursor::new(ines_rom(b"123456789"));
    let identity = compute_crc_identity(&mut cursor, false).unwrap();
    assert!(!identity.is_headered());
    assert_eq!(identity.expected(), identity.file_crc);
}

#[test]
fn test_headered_compare_flags_file_crc() {
    let mut cursor = Cursor::new(ines_rom(b"123456789"));
    let identity = compute_crc_identity(&mut cursor, true).unwrap();

    assert_eq!(identity.compare("CBF43926"), CrcComparison::Match);
    // The declared value equals the raw bytes' CRC, but that's stale
    assert_eq!(
        identity.compare(&identity.file_crc.clone()),
        CrcComparison::StaleFileCrc
    );
    assert_eq!(identity.compare("00000000"), CrcComparison::Mismatch);
}

#[test]
fn test_plain_compare() {
    let identity = CrcIdentity {
        file_crc: "CBF43926".into(),
        rom_crc: None,
    };
    assert_eq!(identity.compare("CBF43926"), CrcComparison::Match);
    assert_eq!(identity.compare("cbf43926"), CrcComparison::Mismatch);
}

#[test]
fn test_crc_identity_for_path() {
    let dir = tempfile::TempDir::new().unwrap();

    let nes = dir.path().join("Game (USA).nes");
    std::fs::write(&nes, ines_rom(b"123456789")).unwrap();
    let identity = crc_identity_for_path(&nes).unwrap();
    assert_eq!(identity.rom_crc.as_deref(), Some("CBF43926"));

    let gba = dir.path().join("Game (USA).gba");
    std::fs::write(&gba, b"123456789").unwrap();
    let identity = crc_identity_for_path(&gba).unwrap();
    assert_eq!(identity.file_crc, "CBF43926");
    assert!(identity.rom_crc.is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = crc_identity_for_path(Path::new("/nonexistent/rom.gba")).unwrap_err();
    assert!(matches!(err, IdentityError::Io(_)));
}
