pub(crate) mod config;
pub(crate) mod crc;
pub(crate) mod db;
pub(crate) mod missing;
pub(crate) mod paths;

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_lpl_lib::{Findings, Playlist};

use crate::CliError;

pub(crate) fn load_playlist(path: &Path) -> Result<Playlist, CliError> {
    log::debug!("Loading {}", path.display());
    Ok(Playlist::load(path)?)
}

pub(crate) fn save_playlist(playlist: &Playlist, path: &Path) -> Result<(), CliError> {
    playlist.save(path)?;
    log::info!(
        "{} {}",
        "Saved".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

pub(crate) fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    log::info!(
        "{}",
        "Found warnings:".if_supports_color(Stdout, |t| t.yellow()),
    );
    log::info!("");
    for warning in warnings {
        log::info!("  {}", warning);
    }
    log::info!("{}", "-".repeat(10));
}

/// Print `lines` under a `<count> <header>:` heading, or the all-clear
/// message when there are none.
pub(crate) fn print_list(lines: &[String], header: &str, all_clear: &str) {
    if lines.is_empty() {
        log::info!("{}", all_clear.if_supports_color(Stdout, |t| t.green()));
        return;
    }
    log::info!(
        "{}",
        format!("{} {}:", lines.len(), header).if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    for line in lines {
        log::info!("  {}", line);
    }
}

/// Warnings first, then errors.
pub(crate) fn print_findings(findings: &Findings, header: &str, all_clear: &str) {
    print_warnings(&findings.warnings);
    print_list(&findings.errors, header, all_clear);
}
