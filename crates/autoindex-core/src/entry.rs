//! Entries discovered while walking the watched directory.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::path::{extension_of, path_key};

/// A filesystem entry found under the watched directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path on disk.
    pub absolute_path: PathBuf,

    /// Path relative to the watched directory, platform separators.
    pub relative_path: PathBuf,

    /// Base name of the entry.
    pub name: CompactString,

    /// Whether the entry is a regular file (directories are walked, never exported).
    pub is_file: bool,
}

impl FileEntry {
    /// Create a file entry.
    pub fn file(absolute_path: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self::new(absolute_path.into(), relative_path.into(), true)
    }

    /// Create a directory entry.
    pub fn directory(
        absolute_path: impl Into<PathBuf>,
        relative_path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(absolute_path.into(), relative_path.into(), false)
    }

    fn new(absolute_path: PathBuf, relative_path: PathBuf, is_file: bool) -> Self {
        let name = relative_path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_default();

        Self {
            absolute_path,
            relative_path,
            name,
            is_file,
        }
    }

    /// Normalized relative path, used for exclusion matching.
    pub fn key(&self) -> String {
        path_key(&self.relative_path)
    }

    /// Normalized directory portion of the relative path (`""` at the root).
    pub fn parent_key(&self) -> String {
        self.relative_path
            .parent()
            .map(path_key)
            .unwrap_or_default()
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.relative_path)
    }

    /// Base name with its last extension removed.
    pub fn stem(&self) -> CompactString {
        file_stem(&self.relative_path)
    }
}

/// Base name of `path` with its last extension removed.
///
/// A leading dot does not start an extension, so `.eslintrc` stays as is.
pub fn file_stem(path: &Path) -> CompactString {
    path.file_stem()
        .map(|s| CompactString::new(s.to_string_lossy()))
        .unwrap_or_default()
}

/// Why a discovered file was left out of the index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// The entry is the index file being generated.
    OutputFile,
    /// Listed in the excluded files.
    ExcludedFile,
    /// Its parent directory is listed in the excluded directories.
    ExcludedDir,
    /// Its extension is not allowed.
    Extension,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_keys() {
        let entry = FileEntry::file("/repo/src/utils/helpers.ts", "utils/helpers.ts");
        assert!(entry.is_file);
        assert_eq!(entry.name, "helpers.ts");
        assert_eq!(entry.key(), "utils/helpers.ts");
        assert_eq!(entry.parent_key(), "utils");
        assert_eq!(entry.extension().as_deref(), Some("ts"));
        assert_eq!(entry.stem(), "helpers");
    }

    #[test]
    fn test_root_level_parent_key() {
        let entry = FileEntry::file("/repo/src/a.ts", "a.ts");
        assert_eq!(entry.parent_key(), "");
    }

    #[test]
    fn test_stem_multi_dot() {
        assert_eq!(file_stem(Path::new("a.test.ts")), "a.test");
        assert_eq!(file_stem(Path::new(".eslintrc")), ".eslintrc");
    }

    #[test]
    fn test_directory_entry() {
        let entry = FileEntry::directory("/repo/src/utils", "utils");
        assert!(!entry.is_file);
        assert_eq!(entry.name, "utils");
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::ExcludedDir.to_string(), "excluded_dir");
        let name: &str = SkipReason::OutputFile.as_ref();
        assert_eq!(name, "output_file");
    }
}
