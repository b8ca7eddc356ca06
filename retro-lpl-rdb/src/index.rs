use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::RdbError;
use crate::matcher::{self, SearchResult};
use crate::rdb::{self, Catalog};
use crate::systems;

/// Catalogs loaded from one directory, cached by name for the run.
///
/// A catalog is read at most once: later requests for the same name, from
/// any extension, reuse the cached copy.
pub struct CatalogIndex {
    base_dir: PathBuf,
    catalogs: BTreeMap<String, Catalog>,
}

impl CatalogIndex {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            catalogs: BTreeMap::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Catalog names that may hold files with `extension` (with dot).
    pub fn resolve(extension: &str) -> Result<&'static [&'static str], RdbError> {
        systems::catalogs_for_extension(extension).ok_or_else(|| {
            RdbError::unsupported(format!("No database for extension type {extension}"))
        })
    }

    /// Path of the `.rdb` file backing `name`.
    pub fn catalog_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.rdb"))
    }

    /// Load every named catalog that is not cached yet.
    pub fn load(&mut self, names: &[&str]) -> Result<(), RdbError> {
        for &name in names {
            if self.catalogs.contains_key(name) {
                log::debug!("Catalog '{}' already loaded", name);
                continue;
            }
            let catalog = rdb::parse_rdb_file(&self.catalog_path(name))?;
            self.catalogs.insert(name.to_string(), catalog);
        }
        Ok(())
    }

    /// Resolve and load the catalogs for each extension.
    pub fn load_for_extensions<'a, I>(&mut self, extensions: I) -> Result<(), RdbError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for extension in extensions {
            let names = Self::resolve(extension)?;
            self.load(names)?;
        }
        Ok(())
    }

    /// Add an already-parsed catalog. A cached catalog of the same name is kept.
    pub fn insert(&mut self, catalog: Catalog) {
        self.catalogs
            .entry(catalog.name().to_string())
            .or_insert(catalog);
    }

    pub fn get(&self, name: &str) -> Option<&Catalog> {
        self.catalogs.get(name)
    }

    pub fn catalogs(&self) -> &BTreeMap<String, Catalog> {
        &self.catalogs
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Search all loaded catalogs, `preferred` first.
    pub fn find_game(&self, name: &str, identity: &str, preferred: Option<&str>) -> SearchResult {
        matcher::find_game_in_catalogs(&self.catalogs, name, identity, preferred)
    }
}
