//! Path checks and discovery of files a playlist does not list yet.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use retro_lpl_core::DETECT;
use retro_lpl_core::util::file_stem;

use crate::error::LplError;
use crate::findings::Findings;
use crate::playlist::Playlist;
use crate::settings::MissingSettings;

/// Report entries whose file is missing or whose label differs from the file name.
pub fn validate_paths(playlist: &Playlist) -> Findings {
    let mut findings = Findings::new();

    for entry in playlist.items() {
        if !Path::new(entry.path()).is_file() {
            findings.error(entry.path());
        }
        let stem = entry.path_stem();
        if stem != entry.label() {
            findings.warn(format!(
                "[LABEL] {} is inconsistent with [PATH] {}",
                entry.label(),
                stem
            ));
        }
    }

    findings
}

/// Whether a directory listing should consider `name`.
fn is_candidate(name: &str, exclusions: &MissingSettings) -> bool {
    if exclusions.name_exclusions.iter().any(|n| n == name) {
        return false;
    }
    let extension = Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    !exclusions.extension_exclusions.contains(&extension)
}

/// Files referenced by an `.m3u`, resolved against its directory.
fn m3u_references(m3u: &Path, folder: &Path) -> Result<Vec<PathBuf>, LplError> {
    let contents = fs::read_to_string(m3u)?;
    Ok(contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(|line| folder.join(line))
        .collect())
}

/// Files in the playlist's directories that no entry refers to, sorted.
///
/// Every directory holding an entry is listed. Excluded names and
/// extensions are dropped, as are files an `.m3u` in the same directory
/// points at.
pub fn find_missing(
    playlist: &Playlist,
    exclusions: &MissingSettings,
) -> Result<Vec<PathBuf>, LplError> {
    let existing: BTreeSet<PathBuf> = playlist
        .items()
        .iter()
        .map(|e| PathBuf::from(e.path()))
        .collect();
    let folders: BTreeSet<PathBuf> = existing
        .iter()
        .map(|p| p.parent().map(Path::to_path_buf).unwrap_or_default())
        .collect();

    let mut found = BTreeSet::new();
    for folder in &folders {
        let listing_dir = if folder.as_os_str().is_empty() {
            Path::new(".")
        } else {
            folder.as_path()
        };
        log::debug!("Scanning {}", listing_dir.display());

        let mut current = BTreeSet::new();
        for dir_entry in fs::read_dir(listing_dir)? {
            let dir_entry = dir_entry?;
            if !dir_entry.path().is_file() {
                continue;
            }
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            if is_candidate(&name, exclusions) {
                current.insert(folder.join(name));
            }
        }

        let m3us: Vec<PathBuf> = current
            .iter()
            .filter(|p| p.extension().is_some_and(|e| e == "m3u"))
            .cloned()
            .collect();
        for m3u in m3us {
            for referenced in m3u_references(&m3u, folder)? {
                current.remove(&referenced);
            }
        }

        found.extend(current);
    }

    Ok(found.difference(&existing).cloned().collect())
}

/// Add an entry for each file in `missing`, cloned from the first item.
///
/// New entries get `label` from the file name and a `DETECT` identity, and
/// are placed at the front of the playlist in the order given.
pub fn add_missing(playlist: &mut Playlist, missing: &[PathBuf]) -> Result<Findings, LplError> {
    let template = playlist
        .items()
        .first()
        .cloned()
        .ok_or_else(|| LplError::format("Need at least one existing item to be a template"))?;

    let mut findings = Findings::new();
    for (i, path) in missing.iter().enumerate() {
        let path_str = path.to_string_lossy();
        let mut entry = template.clone();
        entry.set_path(&path_str);
        entry.set_label(&file_stem(path));
        entry.set_crc32(DETECT);
        playlist.items_mut().insert(i, entry);
        findings.change(format!("Entry added for '{path_str}'"));
    }

    Ok(findings)
}

#[cfg(test)]
#[path = "tests/audit_tests.rs"]
mod tests;
