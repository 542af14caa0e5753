//! JWalk-based directory walker.

use std::path::{Path, PathBuf};

use jwalk::{DirEntry, Parallelism, WalkDir};
use tracing::{debug, trace};

use autoindex_core::{FileEntry, IndexConfig, IndexError, PathMode, SkipReason};

use crate::filter::EntryFilter;
use crate::relative::relative_path;

type RawEntry = Result<DirEntry<((), ())>, jwalk::Error>;

/// Walks the watched directory and yields the entries eligible for export.
#[derive(Debug)]
pub struct TreeWalker {
    root: PathBuf,
    given_root: PathBuf,
    mode: PathMode,
    follow_symlinks: bool,
    filter: EntryFilter,
}

impl TreeWalker {
    /// Prepare a walk for `config`.
    ///
    /// Fails if the watched directory is missing or not a directory. No
    /// entries are read until one of the iterators is consumed.
    pub fn new(config: &IndexConfig) -> Result<Self, IndexError> {
        let root = config
            .root
            .canonicalize()
            .map_err(|e| IndexError::io(&config.root, e))?;

        if !root.is_dir() {
            return Err(IndexError::NotADirectory { path: root });
        }

        let output = resolve_output(&config.output)?;
        let filter = EntryFilter::new(config).with_output(output);

        Ok(Self {
            root,
            given_root: config.root.clone(),
            mode: config.path_mode,
            follow_symlinks: config.follow_symlinks,
            filter,
        })
    }

    /// Canonical watched directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every file and directory below the root, lazily, in name order per directory.
    pub fn entries(&self) -> Entries<'_> {
        let walker = WalkDir::new(&self.root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(self.follow_symlinks)
            .sort(true)
            .min_depth(1);

        Entries {
            inner: Box::new(walker.into_iter()),
            walker: self,
        }
    }

    /// Files only.
    pub fn files(&self) -> impl Iterator<Item = Result<FileEntry, IndexError>> + '_ {
        self.entries()
            .filter(|entry| entry.as_ref().map_or(true, |e| e.is_file))
    }

    /// Files that pass the exclusion and extension rules.
    pub fn eligible(&self) -> impl Iterator<Item = Result<FileEntry, IndexError>> + '_ {
        self.files().filter(move |entry| match entry {
            Ok(file) => match self.filter.skip_reason(file) {
                Some(reason) => {
                    debug!(path = %file.relative_path.display(), %reason, "skipping file");
                    false
                }
                None => true,
            },
            Err(_) => true,
        })
    }

    /// Drain the whole walk, stopping at the first error.
    pub fn scan(&self) -> Result<ScanOutcome, IndexError> {
        let mut outcome = ScanOutcome::default();

        for entry in self.entries() {
            let entry = entry?;
            if !entry.is_file {
                outcome.directories += 1;
                continue;
            }

            match self.filter.skip_reason(&entry) {
                Some(reason) => {
                    debug!(path = %entry.relative_path.display(), %reason, "skipping file");
                    outcome.skipped.push((entry, reason));
                }
                None => outcome.eligible.push(entry),
            }
        }

        debug!(
            root = %self.root.display(),
            eligible = outcome.eligible.len(),
            skipped = outcome.skipped.len(),
            "scan complete"
        );

        Ok(outcome)
    }
}

/// Result of a complete walk.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Eligible files in traversal order.
    pub eligible: Vec<FileEntry>,
    /// Files left out, with the first rule that rejected them.
    pub skipped: Vec<(FileEntry, SkipReason)>,
    /// Directories traversed (the root itself not included).
    pub directories: usize,
}

impl ScanOutcome {
    /// Total number of files seen.
    pub fn files_seen(&self) -> usize {
        self.eligible.len() + self.skipped.len()
    }

    /// Number of files skipped for `reason`.
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|(_, r)| *r == reason).count()
    }
}

/// Lazy iterator over the entries below a [`TreeWalker`] root.
pub struct Entries<'a> {
    inner: Box<dyn Iterator<Item = RawEntry>>,
    walker: &'a TreeWalker,
}

impl Iterator for Entries<'_> {
    type Item = Result<FileEntry, IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(walk_error(err, &self.walker.root))),
            };

            let file_type = entry.file_type();
            let path = entry.path();

            // An unfollowed link must still resolve; a dangling one aborts the walk.
            if file_type.is_symlink() {
                if let Err(err) = std::fs::metadata(&path) {
                    return Some(Err(IndexError::io(path, err)));
                }
                trace!(path = %path.display(), "ignoring symlink");
                continue;
            }

            // Sockets, fifos and devices are neither walked nor exported.
            if !file_type.is_dir() && !file_type.is_file() {
                trace!(path = %path.display(), "ignoring special entry");
                continue;
            }

            let relative = match relative_path(
                self.walker.mode,
                &self.walker.root,
                &self.walker.given_root,
                &path,
            ) {
                Ok(relative) => relative,
                Err(err) => return Some(Err(err)),
            };

            return Some(Ok(if file_type.is_dir() {
                FileEntry::directory(path, relative)
            } else {
                FileEntry::file(path, relative)
            }));
        }
    }
}

/// Convert a jwalk error, keeping the underlying I/O error kind when there is one.
fn walk_error(err: jwalk::Error, root: &Path) -> IndexError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let message = err.to_string();

    match err.into_io_error() {
        Some(source) => IndexError::io(path, source),
        None => IndexError::Walk { path, message },
    }
}

/// Absolute form of the output path, with its parent canonicalized when it exists.
fn resolve_output(output: &Path) -> Result<PathBuf, IndexError> {
    let absolute = if output.is_absolute() {
        output.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| IndexError::io(output, e))?
            .join(output)
    };

    let canonical = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|dir| dir.join(name)),
        _ => None,
    };

    Ok(canonical.unwrap_or(absolute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("utils")).unwrap();
        fs::create_dir(root.join("internal")).unwrap();
        fs::create_dir(root.join("utils/deep")).unwrap();

        fs::write(root.join("a.ts"), "export const a = 1;").unwrap();
        fs::write(root.join("index.ts"), "export * from './a'").unwrap();
        fs::write(root.join("styles.css"), "body {}").unwrap();
        fs::write(root.join("utils/helpers.ts"), "export default function f(){}").unwrap();
        fs::write(root.join("utils/deep/x.tsx"), "export const x = 1;").unwrap();
        fs::write(root.join("internal/secret.ts"), "export const s = 1;").unwrap();

        temp
    }

    fn config_for(temp: &TempDir) -> IndexConfig {
        IndexConfig::builder()
            .output(temp.path().join("index.ts"))
            .root(temp.path())
            .exclude_dirs(vec!["internal".to_string()])
            .build()
            .unwrap()
    }

    #[test]
    fn test_scan_outcome() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(&config_for(&temp)).unwrap();
        let outcome = walker.scan().unwrap();

        let eligible: Vec<String> = outcome.eligible.iter().map(FileEntry::key).collect();
        assert_eq!(eligible, vec!["a.ts", "utils/deep/x.tsx", "utils/helpers.ts"]);

        assert_eq!(outcome.files_seen(), 6);
        assert_eq!(outcome.skipped_for(SkipReason::OutputFile), 1);
        assert_eq!(outcome.skipped_for(SkipReason::ExcludedDir), 1);
        assert_eq!(outcome.skipped_for(SkipReason::Extension), 1);
        assert_eq!(outcome.directories, 3);
    }

    #[test]
    fn test_eligible_matches_scan() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(&config_for(&temp)).unwrap();

        let lazy: Vec<FileEntry> = walker.eligible().collect::<Result<_, _>>().unwrap();
        assert_eq!(lazy, walker.scan().unwrap().eligible);
    }

    #[test]
    fn test_files_excludes_directories() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(&config_for(&temp)).unwrap();

        let all: Vec<FileEntry> = walker.entries().collect::<Result<_, _>>().unwrap();
        assert!(all.iter().any(|e| !e.is_file && e.key() == "utils/deep"));

        let files: Vec<FileEntry> = walker.files().collect::<Result<_, _>>().unwrap();
        assert_eq!(files.len(), 6);
        assert!(files.iter().all(|e| e.is_file));
    }

    #[test]
    fn test_hidden_files_are_walked() {
        let temp = create_test_tree();
        fs::write(temp.path().join(".hidden.ts"), "export const h = 1;").unwrap();

        let walker = TreeWalker::new(&config_for(&temp)).unwrap();
        let outcome = walker.scan().unwrap();
        assert!(outcome.eligible.iter().any(|e| e.key() == ".hidden.ts"));
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let config = IndexConfig::new(temp.path().join("index.ts"), temp.path().join("nope"));

        let err = TreeWalker::new(&config).unwrap_err();
        assert!(matches!(err, IndexError::NotFound { .. }));
    }

    #[test]
    fn test_root_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.ts");
        fs::write(&file, "").unwrap();

        let config = IndexConfig::new(temp.path().join("index.ts"), &file);
        let err = TreeWalker::new(&config).unwrap_err();
        assert!(matches!(err, IndexError::NotADirectory { .. }));
    }

    #[test]
    fn test_resolve_output_canonicalizes_parent() {
        let temp = TempDir::new().unwrap();
        let resolved = resolve_output(&temp.path().join("./index.ts")).unwrap();
        assert_eq!(resolved, temp.path().canonicalize().unwrap().join("index.ts"));
    }
}
