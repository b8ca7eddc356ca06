use std::path::Path;

use retro_lpl_lib::{MissingSettings, add_missing, find_missing};

use crate::CliError;
use crate::commands::{load_playlist, print_list, save_playlist};

pub(crate) fn run_find_missing(path: &Path, exclusions: &MissingSettings) -> Result<(), CliError> {
    let playlist = load_playlist(path)?;
    let missing: Vec<String> = find_missing(&playlist, exclusions)?
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    print_list(&missing, "missing item(s) found", "No missing items found.");
    Ok(())
}

pub(crate) fn run_add_missing(path: &Path, exclusions: &MissingSettings) -> Result<(), CliError> {
    let mut playlist = load_playlist(path)?;
    let missing = find_missing(&playlist, exclusions)?;
    let mut changes = Vec::new();
    if !missing.is_empty() {
        changes = add_missing(&mut playlist, &missing)?.changes;
        save_playlist(&playlist, path)?;
    }
    print_list(
        &changes,
        "missing item(s) added",
        "No missing items to be added.",
    );
    Ok(())
}
