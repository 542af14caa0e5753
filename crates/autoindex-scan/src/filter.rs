//! Exclusion and extension rules applied to discovered files.

use std::collections::BTreeSet;
use std::path::PathBuf;

use autoindex_core::{FileEntry, IndexConfig, SkipReason};

/// Decides which discovered files are eligible for export synthesis.
///
/// Rules are checked in a fixed order: the output file itself, excluded
/// files, excluded directories, then the extension allow-list.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    excluded_files: BTreeSet<String>,
    excluded_dirs: BTreeSet<String>,
    extensions: BTreeSet<String>,
    output: Option<PathBuf>,
}

impl EntryFilter {
    /// Build a filter from a config. Keys are normalized once, here.
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            excluded_files: config.excluded_file_keys(),
            excluded_dirs: config.excluded_dir_keys(),
            extensions: config.extension_set(),
            output: None,
        }
    }

    /// Also skip any entry whose absolute path is `output`.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Why `entry` is not eligible, or `None` if it is.
    pub fn skip_reason(&self, entry: &FileEntry) -> Option<SkipReason> {
        if self
            .output
            .as_ref()
            .is_some_and(|output| *output == entry.absolute_path)
        {
            return Some(SkipReason::OutputFile);
        }

        if self.excluded_files.contains(&entry.key()) {
            return Some(SkipReason::ExcludedFile);
        }

        if self.excluded_dirs.contains(&entry.parent_key()) {
            return Some(SkipReason::ExcludedDir);
        }

        match entry.extension() {
            Some(ext) if self.extensions.contains(&ext) => None,
            _ => Some(SkipReason::Extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> EntryFilter {
        let config = IndexConfig::builder()
            .output("src/index.ts")
            .root("src")
            .exclude_files(vec!["main.ts".to_string(), "utils/old.ts".to_string()])
            .exclude_dirs(vec!["internal".to_string()])
            .build()
            .unwrap();
        EntryFilter::new(&config).with_output("/repo/src/index.ts")
    }

    #[test]
    fn test_eligible_file() {
        let entry = FileEntry::file("/repo/src/utils/helpers.ts", "utils/helpers.ts");
        assert_eq!(filter().skip_reason(&entry), None);
    }

    #[test]
    fn test_output_file_skipped() {
        let entry = FileEntry::file("/repo/src/index.ts", "index.ts");
        assert_eq!(filter().skip_reason(&entry), Some(SkipReason::OutputFile));

        // Same relative name, different absolute path: caught by the lexical key.
        let entry = FileEntry::file("/other/src/index.ts", "index.ts");
        assert_eq!(filter().skip_reason(&entry), Some(SkipReason::ExcludedFile));
    }

    #[test]
    fn test_excluded_file() {
        let entry = FileEntry::file("/repo/src/utils/old.ts", "utils/old.ts");
        assert_eq!(filter().skip_reason(&entry), Some(SkipReason::ExcludedFile));
    }

    #[test]
    fn test_excluded_dir_is_direct_only() {
        let direct = FileEntry::file("/repo/src/internal/a.ts", "internal/a.ts");
        assert_eq!(filter().skip_reason(&direct), Some(SkipReason::ExcludedDir));

        let nested = FileEntry::file("/repo/src/internal/deep/a.ts", "internal/deep/a.ts");
        assert_eq!(filter().skip_reason(&nested), None);
    }

    #[test]
    fn test_excluded_dir_wins_over_extension() {
        let entry = FileEntry::file("/repo/src/internal/readme.md", "internal/readme.md");
        assert_eq!(filter().skip_reason(&entry), Some(SkipReason::ExcludedDir));
    }

    #[test]
    fn test_extension_rules() {
        let upper = FileEntry::file("/repo/src/App.TSX", "App.TSX");
        assert_eq!(filter().skip_reason(&upper), None);

        let css = FileEntry::file("/repo/src/styles.css", "styles.css");
        assert_eq!(filter().skip_reason(&css), Some(SkipReason::Extension));

        let bare = FileEntry::file("/repo/src/Makefile", "Makefile");
        assert_eq!(filter().skip_reason(&bare), Some(SkipReason::Extension));
    }

    #[test]
    fn test_root_dir_exclusion() {
        let config = IndexConfig::builder()
            .output("index.ts")
            .root("src")
            .exclude_dirs(vec![".".to_string()])
            .build()
            .unwrap();
        let filter = EntryFilter::new(&config);

        let top = FileEntry::file("/repo/src/a.ts", "a.ts");
        assert_eq!(filter.skip_reason(&top), Some(SkipReason::ExcludedDir));

        let nested = FileEntry::file("/repo/src/lib/a.ts", "lib/a.ts");
        assert_eq!(filter.skip_reason(&nested), None);
    }
}
