//! Derivation of paths relative to the watched directory.

use std::path::{Component, Path, PathBuf};

use autoindex_core::{IndexError, PathMode};

/// Compute the path of `entry` relative to the watched directory.
///
/// `root` is the canonical watched directory the walk started from, `given_root`
/// the directory exactly as configured. Only [`PathMode::Legacy`] looks at
/// `given_root`.
pub fn relative_path(
    mode: PathMode,
    root: &Path,
    given_root: &Path,
    entry: &Path,
) -> Result<PathBuf, IndexError> {
    let relative = entry.strip_prefix(root).map_err(|_| IndexError::Walk {
        path: entry.to_path_buf(),
        message: format!("entry is outside {}", root.display()),
    })?;

    match mode {
        PathMode::Relative => Ok(relative.to_path_buf()),
        PathMode::Legacy => Ok(legacy_relative(given_root, relative)),
    }
}

/// Parent as seen from the configured root, minus its first segment, joined with the name.
fn legacy_relative(given_root: &Path, relative: &Path) -> PathBuf {
    let Some(name) = relative.file_name() else {
        return relative.to_path_buf();
    };

    match relative.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            strip_first_segment(&given_root.join(parent)).join(name)
        }
        _ => PathBuf::from(name),
    }
}

/// Drop the first segment of a path unless it is the only one. `.` segments are ignored.
pub fn strip_first_segment(path: &Path) -> PathBuf {
    let mut components = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir));

    let Some(first) = components.next() else {
        return PathBuf::new();
    };

    let rest: PathBuf = components.collect();
    if rest.as_os_str().is_empty() {
        PathBuf::from(first.as_os_str())
    } else {
        rest
    }
}
