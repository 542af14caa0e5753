//! Path normalization helpers shared by the scanner and the synthesizer.

use std::path::Path;

/// Replace every backslash with a forward slash.
pub fn to_forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}

/// Normalize a root-relative path into a comparison key.
///
/// Separators become `/`, empty and `.` segments are dropped, so `./a//b/`,
/// `a\b` and `a/b` all map to `a/b`. The root directory itself maps to `""`.
pub fn relative_key(s: &str) -> String {
    to_forward_slashes(s)
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// [`relative_key`] for a [`Path`].
pub fn path_key(path: &Path) -> String {
    relative_key(&path.to_string_lossy())
}

/// Normalize an extension: strip a leading dot and lowercase it.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Lowercased extension of a path, without the dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
