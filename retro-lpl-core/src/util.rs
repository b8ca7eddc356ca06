use std::path::Path;

/// Render a CRC-32 as 8 uppercase hex digits.
pub fn format_crc32(crc: u32) -> String {
    format!("{:08X}", crc)
}

/// Lowercased extension of a path including the leading dot (e.g. ".nes"),
/// or an empty string when there is none.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// File name without its final extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
