// Path helper utilities shared across storage operations
use std::path::Path;

/// Strip leading slashes so paths are always relative to the filer root.
pub fn normalize_path(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

/// Directory form of a path: no leading slash, exactly one trailing '/'.
/// The root directory becomes the empty string.
pub fn directory_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

/// Extract a normalized basename from a remote path.
pub fn basename(path: &str) -> String {
    Path::new(path.trim_start_matches('/'))
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.trim_matches('/').to_string())
}
