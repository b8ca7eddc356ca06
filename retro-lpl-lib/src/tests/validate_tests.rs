use super::*;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

const CHECK_CRC: &str = "CBF43926"; // CRC-32 of "123456789"

fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

fn playlist(name: &str, entries: &[(&PathBuf, &str, &str)]) -> Playlist {
    let items: Vec<_> = entries
        .iter()
        .map(|(path, label, crc)| json!({"path": path, "label": label, "crc32": crc}))
        .collect();
    Playlist::parse(&json!({ "items": items }).to_string(), name).unwrap()
}

fn headered_nes(dir: &TempDir) -> (PathBuf, String, String) {
    let mut data = vec![0x4E, 0x45, 0x53, 0x1A];
    data.extend([0u8; 12]);
    data.extend(b"123456789");
    let path = write_file(dir, "Game (USA).nes", &data);
    let crc = crc_identity_for_path(&path).unwrap();
    (path, crc.file_crc.clone(), crc.expected().to_string())
}

#[test]
fn test_matching_crc_has_no_findings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.gba", b"123456789");
    let mut pl = playlist("Nintendo - Game Boy Advance", &[(&path, "Game", "CBF43926|crc")]);

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert!(!report.modified);
    assert!(report.findings.is_empty());
}

#[test]
fn test_mismatch_in_validate_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.gba", b"123456789");
    let mut pl = playlist("x", &[(&path, "Game", "DEADBEEF|crc")]);

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert!(!report.modified);
    assert_eq!(
        report.findings.errors,
        vec![format!("Game: DEADBEEF vs {CHECK_CRC} (existing vs calculated)")]
    );
    assert_eq!(pl.items()[0].crc32(), "DEADBEEF|crc");
}

#[test]
fn test_mismatch_in_update_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.gba", b"123456789");
    let mut pl = playlist("x", &[(&path, "Game", "DEADBEEF|crc")]);

    let report = validate_crcs(&mut pl, CrcMode::Update, None).unwrap();
    assert!(report.modified);
    assert!(report.findings.errors.is_empty());
    assert_eq!(
        report.findings.changes,
        vec![format!("Game: CRC updated from DEADBEEF to {CHECK_CRC}")]
    );
    assert_eq!(pl.items()[0].crc32(), format!("{CHECK_CRC}|crc"));
}

#[test]
fn test_detect_entries() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.gba", b"123456789");

    let mut pl = playlist("x", &[(&path, "Game", "DETECT")]);
    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert_eq!(report.findings.warnings, vec!["[CRC] Game has no CRC"]);
    assert!(report.findings.errors.is_empty());

    let report = validate_crcs(&mut pl, CrcMode::Update, None).unwrap();
    assert!(report.modified);
    assert!(report.findings.warnings.is_empty());
    assert_eq!(pl.items()[0].crc32(), format!("{CHECK_CRC}|crc"));
}

#[test]
fn test_m3u_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Game.m3u");
    let mut pl = playlist(
        "x",
        &[(&path, "Good", "DETECT"), (&path, "Bad", "12345678|crc")],
    );

    for mode in [CrcMode::Validate, CrcMode::Update] {
        let report = validate_crcs(&mut pl, mode, None).unwrap();
        assert!(!report.modified);
        assert_eq!(report.findings.warnings, vec!["[.M3U] Bad doesn't have DETECT"]);
        assert!(report.findings.errors.is_empty());
    }
}

#[test]
fn test_invalid_suffix_aborts() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.gba", b"123456789");
    let mut pl = playlist("x", &[(&path, "Game", "CBF43926")]);

    let err = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap_err();
    assert_eq!(err.to_string(), "crc32 field for Game is invalid");
}

#[test]
fn test_wrong_suffix_warns() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.gba", b"123456789");
    let mut pl = playlist("x", &[(&path, "Game", "CBF43926|serial")]);

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert_eq!(report.findings.warnings, vec!["Game: should have suffix '|crc'"]);
    assert_eq!(report.findings.errors.len(), 1);
}

#[test]
fn test_missing_file_aborts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Gone.gba");
    let mut pl = playlist("x", &[(&path, "Gone", "CBF43926|crc")]);

    let err = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap_err();
    assert!(matches!(err, LplError::Identity(retro_lpl_core::IdentityError::Io(_))));
}

// -- Headered cartridges --

#[test]
fn test_nes_rom_crc_matches() {
    let dir = TempDir::new().unwrap();
    let (path, _, rom_crc) = headered_nes(&dir);
    assert_eq!(rom_crc, CHECK_CRC);
    let mut pl = playlist("x", &[(&path, "Game", format!("{rom_crc}|crc").as_str())]);

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert!(report.findings.is_empty());
}

#[test]
fn test_nes_file_crc_is_stale() {
    let dir = TempDir::new().unwrap();
    let (path, file_crc, rom_crc) = headered_nes(&dir);
    let mut pl = playlist("x", &[(&path, "Game", format!("{file_crc}|crc").as_str())]);

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert_eq!(
        report.findings.warnings,
        vec![format!(
            "[COMPARE .nes] Game: existing CRC ({file_crc}) matches with FILE CRC ({file_crc}) instead of ROM CRC ({rom_crc})"
        )]
    );
    assert_eq!(
        report.findings.errors,
        vec![format!("Game: {file_crc} vs {rom_crc} (existing vs calculated)")]
    );
}

#[test]
fn test_nes_without_header() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.nes", b"123456789");
    let mut pl = playlist("x", &[(&path, "Game", "CBF43926|crc")]);

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert_eq!(report.findings.warnings, vec!["[HEADER] Game has no header"]);
    assert!(report.findings.errors.is_empty());
}

// -- Serials --

fn gamecube_image(dir: &TempDir, name: &str) -> PathBuf {
    let mut data = vec![0u8; 0x100];
    data[..6].copy_from_slice(b"GALE01");
    write_file(dir, name, &data)
}

#[test]
fn test_gamecube_serial_matches() {
    let dir = TempDir::new().unwrap();
    let path = gamecube_image(&dir, "Melee (USA).rvz");
    let mut pl = playlist(
        "Nintendo - GameCube",
        &[(&path, "Melee", "DL-DOL-GALE-USA|serial")],
    );

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert!(report.findings.is_empty());
}

#[test]
fn test_serial_update_rewrites_suffix() {
    let dir = TempDir::new().unwrap();
    let path = gamecube_image(&dir, "Melee (Disc 2) (USA).rvz");
    let mut pl = playlist("Nintendo - GameCube", &[(&path, "Melee", "1234ABCD|crc")]);

    let report = validate_crcs(&mut pl, CrcMode::Update, None).unwrap();
    assert!(report.modified);
    assert_eq!(
        report.findings.warnings,
        vec!["Melee: should have suffix '|serial'"]
    );
    assert_eq!(
        report.findings.changes,
        vec!["Melee: CRC updated from 1234ABCD to DL-DOL-GALE-1-USA"]
    );
    assert_eq!(pl.items()[0].crc32(), "DL-DOL-GALE-1-USA|serial");
}

#[test]
fn test_serial_failure_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Short.rvz", b"GA");
    let mut pl = playlist("Nintendo - GameCube", &[(&path, "Short", "X|serial")]);

    let report = validate_crcs(&mut pl, CrcMode::Update, None).unwrap();
    assert!(!report.modified);
    assert_eq!(report.findings.warnings.len(), 1);
    assert!(report.findings.warnings[0].starts_with("[SKIPPING] Short could not get serial due to: "));
}

#[test]
fn test_unsupported_system_is_skipped_with_warning() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.chd", b"");
    let mut pl = playlist("Philips - CD-i", &[(&path, "Game", "X|serial")]);

    let report = validate_crcs(&mut pl, CrcMode::Validate, None).unwrap();
    assert_eq!(
        report.findings.warnings,
        vec!["[SKIPPING] Game could not get serial due to: Unsupported format: No serial support for system Philips - CD-i"]
    );
}

#[test]
fn test_excluded_systems_are_silent() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Game.chd", b"");
    for system in ["NEC - PC-FX", "NEC - PC Engine CD - TurboGrafx-CD"] {
        let mut pl = playlist(system, &[(&path, "Game", "X|serial")]);
        let report = validate_crcs(&mut pl, CrcMode::Update, None).unwrap();
        assert!(report.findings.is_empty());
        assert!(!report.modified);
    }
}

#[cfg(unix)]
#[test]
fn test_external_helper_serial() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let helper = write_file(&dir, "chdserial.sh", b"#!/bin/sh\necho '  SLUS-00594  '\n");
    std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o755)).unwrap();
    let path = write_file(&dir, "Metal Gear Solid (Disc 1).chd", b"");

    let mut pl = playlist("Sony - PlayStation", &[(&path, "MGS", "SLUS-00000|serial")]);
    let report = validate_crcs(&mut pl, CrcMode::Update, Some(helper.as_path())).unwrap();
    assert_eq!(pl.items()[0].crc32(), "SLUS-00594|serial");
    assert_eq!(
        report.findings.changes,
        vec!["MGS: CRC updated from SLUS-00000 to SLUS-00594"]
    );
}

#[cfg(unix)]
#[test]
fn test_external_helper_failure_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let helper = write_file(&dir, "fail.sh", b"#!/bin/sh\necho 'bad chd' >&2\nexit 2\n");
    std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o755)).unwrap();
    let path = write_file(&dir, "Game.chd", b"");

    let mut pl = playlist("Sony - PlayStation", &[(&path, "Game", "SLUS-00000|serial")]);
    let report = validate_crcs(&mut pl, CrcMode::Validate, Some(helper.as_path())).unwrap();
    assert_eq!(report.findings.warnings.len(), 1);
    assert!(report.findings.warnings[0].contains("bad chd"));
    assert!(report.findings.errors.is_empty());
}
