//! Checking declared identities against files and catalogs.

use std::collections::BTreeSet;
use std::path::Path;

use retro_lpl_core::hasher::crc_identity_for_path;
use retro_lpl_core::serial::extract_serial;
use retro_lpl_core::{CrcComparison, DETECT, DeclaredIdentity, IdentityKind, IdentityValue};
use retro_lpl_rdb::{CatalogIndex, SearchResult};

use crate::error::LplError;
use crate::findings::Findings;
use crate::playlist::{Playlist, PlaylistEntry};

/// Playlist references: their own identity is always `DETECT`.
const PLAYLIST_EXTENSION: &str = ".m3u";

/// Extensions identified by disc serial instead of CRC.
const SERIAL_EXTENSIONS: &[&str] = &[".chd", ".rvz"];

/// Systems whose disc images have no serial rule; entries are skipped.
const SERIAL_EXCLUDED_SYSTEMS: &[&str] = &["NEC - PC-FX", "NEC - PC Engine CD - TurboGrafx-CD"];

/// Whether CRC validation only reports or also rewrites entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrcMode {
    Validate,
    Update,
}

/// Outcome of [`validate_crcs`].
#[derive(Debug, Clone, Default)]
pub struct CrcReport {
    /// Whether any entry's `crc32` was rewritten
    pub modified: bool,
    pub findings: Findings,
}

fn parse_declared(entry: &PlaylistEntry) -> Result<DeclaredIdentity, LplError> {
    DeclaredIdentity::parse(entry.crc32())
        .map_err(|_| LplError::format(format!("crc32 field for {} is invalid", entry.label())))
}

/// Record a mismatch, or rewrite the entry in update mode.
fn apply_mismatch(
    entry: &mut PlaylistEntry,
    declared: &DeclaredIdentity,
    computed: IdentityValue,
    mode: CrcMode,
    report: &mut CrcReport,
) {
    let label = entry.label().to_string();

    if let Some(kind) = declared.kind().filter(|k| *k != computed.kind) {
        log::debug!("{}: declared kind {} differs from {}", label, kind, computed.kind);
        report
            .findings
            .warn(format!("{}: should have suffix '|{}'", label, computed.kind.suffix()));
    }

    match mode {
        CrcMode::Validate => report.findings.error(format!(
            "{}: {} vs {} (existing vs calculated)",
            label,
            declared.value(),
            computed.value
        )),
        CrcMode::Update => {
            entry.set_crc32(&computed.encode());
            report.modified = true;
            report.findings.change(format!(
                "{}: CRC updated from {} to {}",
                label,
                declared.value(),
                computed.value
            ));
        }
    }
}

/// Compare one disc entry's declared serial with the extracted one.
fn check_serial_entry(
    entry: &mut PlaylistEntry,
    declared: &DeclaredIdentity,
    system: &str,
    helper: Option<&Path>,
    mode: CrcMode,
    report: &mut CrcReport,
) {
    if SERIAL_EXCLUDED_SYSTEMS.contains(&system) {
        log::debug!("Skipping {}: no serial support for {}", entry.label(), system);
        return;
    }

    let serial = match extract_serial(Path::new(entry.path()), system, helper) {
        Ok(serial) => serial,
        Err(e) => {
            report.findings.warn(format!(
                "[SKIPPING] {} could not get serial due to: {}",
                entry.label(),
                e
            ));
            return;
        }
    };

    if declared.kind() != Some(IdentityKind::Serial) || declared.value() != serial {
        apply_mismatch(entry, declared, IdentityValue::serial(serial), mode, report);
    }
}

/// Compare one cartridge entry's declared CRC with the file's.
fn check_crc_entry(
    entry: &mut PlaylistEntry,
    declared: &DeclaredIdentity,
    mode: CrcMode,
    report: &mut CrcReport,
) -> Result<(), LplError> {
    let extension = entry.extension();
    let crc = crc_identity_for_path(Path::new(entry.path()))?;

    if retro_lpl_core::hasher::is_headered_format(&extension) && !crc.is_headered() {
        report
            .findings
            .warn(format!("[HEADER] {} has no header", entry.label()));
    }

    let matches = declared.kind() == Some(IdentityKind::Crc)
        && match crc.compare(declared.value()) {
            CrcComparison::Match => true,
            CrcComparison::Mismatch => false,
            CrcComparison::StaleFileCrc => {
                report.findings.warn(format!(
                    "[COMPARE {}] {}: existing CRC ({}) matches with FILE CRC ({}) instead of ROM CRC ({})",
                    extension,
                    entry.label(),
                    declared.value(),
                    crc.file_crc,
                    crc.expected()
                ));
                false
            }
        };

    if !matches {
        let computed = IdentityValue::crc(crc.expected());
        apply_mismatch(entry, declared, computed, mode, report);
    }
    Ok(())
}

/// Check every entry's declared identity against its file.
///
/// `helper` is the external serial tool used for disc images of systems
/// without a direct serial rule. Serial failures are downgraded to warnings;
/// every other failure aborts the run.
pub fn validate_crcs(
    playlist: &mut Playlist,
    mode: CrcMode,
    helper: Option<&Path>,
) -> Result<CrcReport, LplError> {
    let system = playlist.name().to_string();
    let mut report = CrcReport::default();

    for entry in playlist.items_mut() {
        let extension = entry.extension();

        if extension == PLAYLIST_EXTENSION {
            if entry.crc32() != DETECT {
                report
                    .findings
                    .warn(format!("[.M3U] {} doesn't have DETECT", entry.label()));
            }
            continue;
        }

        if mode == CrcMode::Validate && entry.crc32() == DETECT {
            report
                .findings
                .warn(format!("[CRC] {} has no CRC", entry.label()));
            continue;
        }

        let declared = parse_declared(entry)?;

        if SERIAL_EXTENSIONS.contains(&extension.as_str()) {
            log::debug!("{}: checking serial", entry.label());
            check_serial_entry(entry, &declared, &system, helper, mode, &mut report);
        } else {
            log::debug!("{}: checking CRC", entry.label());
            check_crc_entry(entry, &declared, mode, &mut report)?;
        }
    }

    Ok(report)
}

/// Look every non-`DETECT` entry up in the catalogs for its extension.
///
/// Catalogs are loaded into `index` as needed; the playlist's own catalog
/// is searched first.
pub fn check_database(playlist: &Playlist, index: &mut CatalogIndex) -> Result<Findings, LplError> {
    let pending: Vec<&PlaylistEntry> = playlist
        .items()
        .iter()
        .filter(|e| e.crc32() != DETECT)
        .collect();

    let extensions: BTreeSet<String> = pending.iter().map(|e| e.extension()).collect();
    index.load_for_extensions(extensions.iter().map(String::as_str))?;

    let mut findings = Findings::new();
    for entry in pending {
        let declared = parse_declared(entry)?;
        let name = entry.label();
        let crc = declared.value();

        match index.find_game(name, crc, Some(playlist.name())) {
            SearchResult::Found => {}
            SearchResult::CrcMatchOnly { db_name } => findings.warn(format!(
                "CRC MATCH ONLY: {name} with CRC {crc} didn't match name found in database ({db_name})."
            )),
            SearchResult::NameMatchOnly { db_identity } => findings.error(format!(
                "NAME MATCH ONLY: {name} with CRC {crc} didn't match CRC found in database ({db_identity})."
            )),
            SearchResult::NotFound if name.contains("(English)") => findings.warn(format!(
                "PATCH: {name} with CRC {crc} not found in database (English patch)."
            )),
            SearchResult::NotFound => findings.warn(format!(
                "MISSING: {name} with CRC {crc} not found in database."
            )),
        }
    }

    Ok(findings)
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
