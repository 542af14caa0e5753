//! Scan, classify and assemble in one pass.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use autoindex_core::{IndexConfig, IndexError, SkipReason};
use autoindex_scan::{ScanOutcome, TreeWalker};

use crate::classify::ExportKind;
use crate::document::{Document, DocumentBuilder};
use crate::statement::ExportStatement;

/// Summary of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Index file path, as configured.
    pub output: PathBuf,
    /// Canonical watched directory.
    pub root: PathBuf,
    /// Files discovered under the root.
    pub files_seen: usize,
    /// Files that passed every filter.
    pub eligible: usize,
    /// Files re-exported as a default binding.
    pub default_exports: usize,
    /// Files re-exported with `*`.
    pub reexports: usize,
    /// Eligible files without any export marker.
    pub without_exports: usize,
    /// Skipped files by reason.
    pub skipped: BTreeMap<SkipReason, usize>,
    /// Document size in bytes.
    pub bytes: usize,
    /// Time spent scanning and reading.
    pub duration: Duration,
    /// Whether the document was written to `output`.
    pub written: bool,
}

impl GenerationReport {
    fn new(output: &Path, root: &Path, outcome: &ScanOutcome) -> Self {
        let mut skipped = BTreeMap::new();
        for (_, reason) in &outcome.skipped {
            *skipped.entry(*reason).or_insert(0) += 1;
        }

        Self {
            output: output.to_path_buf(),
            root: root.to_path_buf(),
            files_seen: outcome.files_seen(),
            eligible: outcome.eligible.len(),
            skipped,
            ..Self::default()
        }
    }

    fn record(&mut self, kind: ExportKind) {
        match kind {
            ExportKind::Default => self.default_exports += 1,
            ExportKind::All => self.reexports += 1,
            ExportKind::NoExports => self.without_exports += 1,
        }
    }

    /// Number of statements in the document.
    pub fn statements(&self) -> usize {
        self.default_exports + self.reexports
    }

    /// Total number of skipped files.
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Output of [`IndexGenerator::generate`].
#[derive(Debug, Clone)]
pub struct Generation {
    pub document: Document,
    pub report: GenerationReport,
}

/// Builds the barrel document for one [`IndexConfig`].
///
/// Generation is read-only: it never touches the output file.
#[derive(Debug, Clone)]
pub struct IndexGenerator {
    config: IndexConfig,
}

impl IndexGenerator {
    /// Create a generator for a config.
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    /// Walk the tree, classify every eligible file and assemble the document.
    pub fn generate(&self) -> Result<Generation, IndexError> {
        self.generate_with_cancel(&CancellationToken::new())
    }

    /// Like [`IndexGenerator::generate`], giving up with
    /// [`IndexError::Interrupted`] once `cancel` fires.
    ///
    /// The whole walk completes before the first file is read.
    pub fn generate_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Generation, IndexError> {
        let start = Instant::now();

        let walker = TreeWalker::new(&self.config)?;
        let outcome = walker.scan()?;
        let mut report = GenerationReport::new(&self.config.output, walker.root(), &outcome);
        let mut builder = DocumentBuilder::new();

        for entry in &outcome.eligible {
            if cancel.is_cancelled() {
                return Err(IndexError::Interrupted);
            }

            let content = read_source(&entry.absolute_path)?;
            match ExportStatement::for_file(
                &entry.relative_path,
                &content,
                self.config.preserve_extension,
            ) {
                Some(statement) => {
                    trace!(path = %entry.relative_path.display(), kind = %statement.kind(), "classified");
                    report.record(statement.kind());
                    builder.push(&statement);
                }
                None => {
                    trace!(path = %entry.relative_path.display(), "no exports");
                    report.record(ExportKind::NoExports);
                }
            }
        }

        let document = builder.finish();
        report.bytes = document.len();
        report.duration = start.elapsed();

        Ok(Generation { document, report })
    }
}

/// Read a source file, decoding invalid UTF-8 lossily.
fn read_source(path: &Path) -> Result<String, IndexError> {
    let bytes = std::fs::read(path).map_err(|e| IndexError::io(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
