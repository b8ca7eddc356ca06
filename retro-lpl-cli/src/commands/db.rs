use std::path::Path;

use retro_lpl_lib::check_database;
use retro_lpl_rdb::CatalogIndex;

use crate::CliError;
use crate::commands::{load_playlist, print_findings};

pub(crate) fn run_check_db(path: &Path, rdb_dir: Option<&Path>) -> Result<(), CliError> {
    let rdb_dir = rdb_dir.ok_or_else(|| {
        CliError::config("no catalog directory; pass --rdb-dir or set paths.rdb_dir")
    })?;
    if !rdb_dir.is_dir() {
        return Err(CliError::config(format!(
            "catalog directory {} does not exist",
            rdb_dir.display()
        )));
    }

    let playlist = load_playlist(path)?;
    let mut index = CatalogIndex::new(rdb_dir);
    let findings = check_database(&playlist, &mut index)?;
    log::debug!("Consulted {} catalog(s)", index.len());
    print_findings(
        &findings,
        "non-matching CRC(s) found",
        "All CRCs match with database.",
    );
    Ok(())
}
