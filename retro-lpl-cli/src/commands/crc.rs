use std::path::Path;

use retro_lpl_lib::{CrcMode, validate_crcs};

use crate::CliError;
use crate::commands::{load_playlist, print_findings, print_list, print_warnings, save_playlist};

/// Report declared values that do not match the files.
pub(crate) fn run_validate_crc(path: &Path, helper: Option<&Path>) -> Result<(), CliError> {
    let mut playlist = load_playlist(path)?;
    let report = validate_crcs(&mut playlist, CrcMode::Validate, helper)?;
    print_findings(&report.findings, "non-matching CRC(s) found", "All CRCs match.");
    Ok(())
}

/// Rewrite declared values that do not match the files.
pub(crate) fn run_update_crc(path: &Path, helper: Option<&Path>) -> Result<(), CliError> {
    let mut playlist = load_playlist(path)?;
    let report = validate_crcs(&mut playlist, CrcMode::Update, helper)?;
    if report.modified {
        save_playlist(&playlist, path)?;
    }
    print_warnings(&report.findings.warnings);
    print_list(&report.findings.changes, "CRC(s) updated", "No changes to be made.");
    Ok(())
}
