use std::collections::BTreeMap;

use crate::rdb::Catalog;

/// How a (name, identity) pair relates to catalog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// A record matched on both name and identity
    Found,
    /// A record has the identity under a different name
    CrcMatchOnly { db_name: String },
    /// A record has the name but a different identity
    NameMatchOnly { db_identity: String },
    NotFound,
}

impl SearchResult {
    /// Lower is more definitive.
    pub fn severity(&self) -> u8 {
        match self {
            SearchResult::Found => 0,
            SearchResult::CrcMatchOnly { .. } => 1,
            SearchResult::NameMatchOnly { .. } => 2,
            SearchResult::NotFound => 3,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found)
    }
}

/// Keep the more definitive of two results; ties keep `current`.
fn least_severe(current: SearchResult, candidate: SearchResult) -> SearchResult {
    if candidate.severity() < current.severity() {
        candidate
    } else {
        current
    }
}

/// Scan one catalog for `name` and `identity`.
///
/// An exact match stops the scan. Otherwise the last identity-only match
/// wins, and a name-only match is kept only while no identity-only match has
/// been seen.
pub fn find_game(catalog: &Catalog, name: &str, identity: &str) -> SearchResult {
    let mut result = SearchResult::NotFound;

    for game in catalog.games() {
        let identity_matches = game.matches_identity(identity);
        let name_matches = game.name == name;

        if identity_matches && name_matches {
            return SearchResult::Found;
        } else if identity_matches {
            result = SearchResult::CrcMatchOnly {
                db_name: game.name.clone(),
            };
        } else if name_matches && !matches!(result, SearchResult::CrcMatchOnly { .. }) {
            result = SearchResult::NameMatchOnly {
                db_identity: game.identity().to_string(),
            };
        }
    }

    result
}

/// Search every catalog, returning the most definitive result.
///
/// `preferred` (usually the playlist name) is scanned first and a `Found`
/// there skips the remaining catalogs.
pub fn find_game_in_catalogs(
    catalogs: &BTreeMap<String, Catalog>,
    name: &str,
    identity: &str,
    preferred: Option<&str>,
) -> SearchResult {
    find_game_in_catalogs_with(catalogs, name, identity, preferred, find_game)
}

/// [`find_game_in_catalogs`] with a caller-supplied per-catalog scan.
pub fn find_game_in_catalogs_with<F>(
    catalogs: &BTreeMap<String, Catalog>,
    name: &str,
    identity: &str,
    preferred: Option<&str>,
    mut scan: F,
) -> SearchResult
where
    F: FnMut(&Catalog, &str, &str) -> SearchResult,
{
    let mut result = SearchResult::NotFound;

    let preferred = preferred.filter(|p| catalogs.contains_key(*p));
    if let Some(catalog) = preferred.and_then(|p| catalogs.get(p)) {
        result = least_severe(result, scan(catalog, name, identity));
        if result.is_found() {
            return result;
        }
    }

    for (key, catalog) in catalogs {
        if Some(key.as_str()) == preferred {
            continue;
        }
        result = least_severe(result, scan(catalog, name, identity));
        if result.is_found() {
            break;
        }
    }

    result
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
