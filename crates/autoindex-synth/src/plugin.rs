//! Build hook adapter.
//!
//! A bundler (or any build step) owns one [`IndexPlugin`] per index file and
//! invokes it once per build. Every path through a run either returns a
//! generation or an error; a deadline turns a stuck filesystem call into
//! [`IndexError::TimedOut`] instead of a hung build.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use autoindex_core::{IndexConfig, IndexError, IndexOptions};

use crate::generator::{Generation, IndexGenerator};
use crate::writer;

/// Name the hook registers under.
pub const PLUGIN_NAME: &str = "auto-index";

/// Regenerates one barrel file per invocation.
#[derive(Debug, Clone)]
pub struct IndexPlugin {
    config: IndexConfig,
    deadline: Option<Duration>,
    dry_run: bool,
}

impl IndexPlugin {
    /// Create a plugin for an already resolved config.
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            deadline: None,
            dry_run: false,
        }
    }

    /// Resolve caller options, failing before any I/O if required ones are missing.
    pub fn from_options(options: IndexOptions) -> Result<Self, IndexError> {
        Ok(Self::new(options.into_config()?))
    }

    /// Abort a run that takes longer than `deadline`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Generate without deleting or writing the output file.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Hook name.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Run on the current thread. The deadline does not apply.
    pub fn run_blocking(&self) -> Result<Generation, IndexError> {
        self.clear_output();
        let mut generation = IndexGenerator::new(self.config.clone()).generate()?;
        self.persist(&mut generation)?;
        Ok(generation)
    }

    /// Run on tokio's blocking pool, honouring the deadline.
    ///
    /// The stale index is removed first; the new one is written only after the
    /// document is fully assembled, so a failed or timed-out run leaves no file.
    pub async fn run(&self) -> Result<Generation, IndexError> {
        self.clear_output();

        let generator = IndexGenerator::new(self.config.clone());
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task =
            tokio::task::spawn_blocking(move || generator.generate_with_cancel(&task_cancel));

        let joined = match self.deadline {
            Some(after) => match tokio::time::timeout(after, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    cancel.cancel();
                    return Err(IndexError::TimedOut { after });
                }
            },
            None => task.await,
        };

        let mut generation = joined.map_err(|_| IndexError::Interrupted)??;
        self.persist(&mut generation)?;
        Ok(generation)
    }

    fn clear_output(&self) {
        if !self.dry_run {
            writer::remove_stale(&self.config.output);
        }
    }

    fn persist(&self, generation: &mut Generation) -> Result<(), IndexError> {
        if self.dry_run {
            return Ok(());
        }

        writer::write_document(&self.config.output, &generation.document)?;
        generation.report.written = true;
        info!(
            statements = generation.document.statement_count(),
            "created index file at {}",
            self.config.output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_from_options_requires_fields() {
        let err = IndexPlugin::from_options(IndexOptions::default()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_run_blocking_writes_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.ts"), "export const a = 1;").unwrap();
        let output = temp.path().join("index.ts");

        let plugin = IndexPlugin::new(IndexConfig::new(&output, temp.path()));
        assert_eq!(plugin.name(), "auto-index");

        let generation = plugin.run_blocking().unwrap();
        assert!(generation.report.written);
        assert_eq!(fs::read_to_string(&output).unwrap(), "export * from './a'\n");
    }

    #[test]
    fn test_dry_run_leaves_output_alone() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.ts"), "export const a = 1;").unwrap();
        let output = temp.path().join("index.ts");
        fs::write(&output, "stale").unwrap();

        let plugin = IndexPlugin::new(IndexConfig::new(&output, temp.path())).with_dry_run(true);
        let generation = plugin.run_blocking().unwrap();

        assert!(!generation.report.written);
        assert_eq!(generation.document.as_str(), "export * from './a'\n");
        assert_eq!(fs::read_to_string(&output).unwrap(), "stale");
    }
}
