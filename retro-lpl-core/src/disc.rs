//! Disc-related filename utilities.
//!
//! Multi-disc sets are tagged "(Disc N)" in their file names. Serials of
//! discs after the first carry a zero-based disc suffix.

/// Extract the disc number from a file name or path.
///
/// Uses the first well-formed "(Disc N)" tag; malformed tags such as
/// "(Disc 2 of 3)" are skipped.
///
/// Examples:
/// - `"Final Fantasy VII (Disc 2) (USA).chd"` → `Some(2)`
/// - `"Crash Bandicoot (USA).chd"` → `None`
pub fn extract_disc_number(name: &str) -> Option<u32> {
    const PREFIX: &str = "(Disc ";
    name.match_indices(PREFIX).find_map(|(start, _)| {
        let after = &name[start + PREFIX.len()..];
        let close = after.find(')')?;
        let digits = &after[..close];
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            digits.parse().ok()
        } else {
            None
        }
    })
}

/// Serial suffix for the disc named in `path`: `"-1"` for "(Disc 2)",
/// empty when there is no tag (or the tag says disc 0).
pub fn disc_suffix(path: &str) -> String {
    match extract_disc_number(path) {
        Some(n) if n > 0 => format!("-{}", n - 1),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/disc_tests.rs"]
mod tests;
