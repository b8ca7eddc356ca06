/// Mapping from a file extension to the catalogs that may contain it.
#[derive(Debug, Clone)]
pub struct CatalogMapping {
    /// Lowercase extension including the dot (e.g., ".gba")
    pub extension: &'static str,
    /// Catalog names, searched in this order; each is `<name>.rdb` on disk
    pub catalogs: &'static [&'static str],
}

/// All supported extension mappings.
pub static CATALOGS: &[CatalogMapping] = &[
    CatalogMapping {
        extension: ".zip",
        catalogs: &["FBNeo - Arcade Games", "Sega - Naomi"],
    },
    CatalogMapping {
        extension: ".fds",
        catalogs: &["Nintendo - Family Computer Disk System"],
    },
    CatalogMapping {
        extension: ".gba",
        catalogs: &["Nintendo - Game Boy Advance"],
    },
    CatalogMapping {
        extension: ".gbc",
        catalogs: &["Nintendo - Game Boy Color"],
    },
    CatalogMapping {
        extension: ".gb",
        catalogs: &["Nintendo - Game Boy"],
    },
    CatalogMapping {
        extension: ".rvz",
        catalogs: &["Nintendo - GameCube", "Nintendo - Wii"],
    },
    CatalogMapping {
        extension: ".z64",
        catalogs: &["Nintendo - Nintendo 64"],
    },
    CatalogMapping {
        extension: ".nds",
        catalogs: &["Nintendo - Nintendo DS"],
    },
    CatalogMapping {
        extension: ".nes",
        catalogs: &["Nintendo - Nintendo Entertainment System"],
    },
    CatalogMapping {
        extension: ".bs",
        catalogs: &["Nintendo - Satellaview"],
    },
    CatalogMapping {
        extension: ".sfc",
        catalogs: &["Nintendo - Super Nintendo Entertainment System"],
    },
    CatalogMapping {
        extension: ".vb",
        catalogs: &["Nintendo - Virtual Boy"],
    },
    CatalogMapping {
        extension: ".sms",
        catalogs: &["Sega - Master System - Mark III"],
    },
    CatalogMapping {
        extension: ".md",
        catalogs: &["Sega - Mega Drive - Genesis"],
    },
    CatalogMapping {
        extension: ".ngc",
        catalogs: &["SNK - Neo Geo Pocket Color"],
    },
    CatalogMapping {
        extension: ".pce",
        catalogs: &["NEC - PC Engine - TurboGrafx 16"],
    },
    CatalogMapping {
        extension: ".chd",
        catalogs: &[
            "Sony - PlayStation",
            "Sony - PlayStation 2",
            "Sony - PlayStation Portable",
            "Sega - Dreamcast",
            "Sega - Saturn",
            "Sega - Mega-CD - Sega CD",
            "NEC - PC-FX",
            "NEC - PC Engine CD - TurboGrafx-CD",
            "Philips - CD-i",
        ],
    },
];

/// Look up the catalogs for an extension (with dot, any case).
pub fn catalogs_for_extension(extension: &str) -> Option<&'static [&'static str]> {
    CATALOGS
        .iter()
        .find(|m| m.extension.eq_ignore_ascii_case(extension))
        .map(|m| m.catalogs)
}

/// Get all extensions that have at least one catalog.
pub fn supported_extensions() -> Vec<&'static str> {
    CATALOGS.iter().map(|m| m.extension).collect()
}
