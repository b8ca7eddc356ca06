use std::path::Path;

use retro_lpl_lib::validate_paths;

use crate::CliError;
use crate::commands::{load_playlist, print_findings};

pub(crate) fn run_validate_paths(path: &Path) -> Result<(), CliError> {
    let playlist = load_playlist(path)?;
    let findings = validate_paths(&playlist);
    print_findings(&findings, "invalid path(s) found", "All paths valid.");
    Ok(())
}
