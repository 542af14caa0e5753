//! Caller-supplied options and the TOML manifest that carries them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{IndexConfig, PathMode};
use crate::error::IndexError;

/// Options for one index target, as written by the user.
///
/// Every field is optional here; [`IndexOptions::into_config`] fills in
/// defaults and rejects missing required fields before any I/O happens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IndexOptions {
    /// Output path (required).
    pub filename: Option<PathBuf>,
    /// Directory to scan (required).
    pub watched_dir: Option<PathBuf>,
    pub exclude_files: Option<Vec<String>>,
    pub exclude_dirs: Option<Vec<String>>,
    /// Defaults to `ts`, `tsx`, `js`, `jsx`.
    pub allowed_extensions: Option<Vec<String>>,
    /// Keep file extensions in module paths.
    pub use_extension: Option<bool>,
    pub path_mode: Option<PathMode>,
    pub follow_symlinks: Option<bool>,
}

impl IndexOptions {
    /// Options with only the two required fields set.
    pub fn new(filename: impl Into<PathBuf>, watched_dir: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(filename.into()),
            watched_dir: Some(watched_dir.into()),
            ..Self::default()
        }
    }

    /// Resolve into a fully defaulted, immutable [`IndexConfig`].
    pub fn into_config(self) -> Result<IndexConfig, IndexError> {
        let filename = self
            .filename
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| IndexError::config("`filename` is required"))?;
        let watched_dir = self
            .watched_dir
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| IndexError::config("`watchedDir` is required"))?;

        let mut builder = IndexConfig::builder();
        builder.output(filename).root(watched_dir);

        if let Some(files) = self.exclude_files {
            builder.exclude_files(files);
        }
        if let Some(dirs) = self.exclude_dirs {
            builder.exclude_dirs(dirs);
        }
        if let Some(extensions) = self.allowed_extensions {
            builder.allowed_extensions(extensions);
        }
        if let Some(use_extension) = self.use_extension {
            builder.preserve_extension(use_extension);
        }
        if let Some(mode) = self.path_mode {
            builder.path_mode(mode);
        }
        if let Some(follow) = self.follow_symlinks {
            builder.follow_symlinks(follow);
        }

        Ok(builder.build()?)
    }

    /// Resolve relative `filename` and `watchedDir` against `base`.
    fn rebase(mut self, base: &Path) -> Self {
        self.filename = self.filename.map(|p| base.join(p));
        self.watched_dir = self.watched_dir.map(|p| base.join(p));
        self
    }
}

/// A manifest file listing one or more index targets.
///
/// ```toml
/// [[index]]
/// filename = "src/index.ts"
/// watchedDir = "src"
/// excludeDirs = ["internal"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexManifest {
    #[serde(default, rename = "index")]
    pub targets: Vec<IndexOptions>,
}

impl IndexManifest {
    /// Manifest name looked up when none is given.
    pub const DEFAULT_FILE: &'static str = "autoindex.toml";

    /// Parse a manifest from TOML text. Paths are left as written.
    pub fn from_toml_str(source: &str) -> Result<Self, IndexError> {
        let manifest: Self =
            toml::from_str(source).map_err(|e| IndexError::config(e.to_string()))?;

        if manifest.targets.is_empty() {
            return Err(IndexError::config(
                "manifest must declare at least one [[index]] target",
            ));
        }

        Ok(manifest)
    }

    /// Load a manifest from disk.
    ///
    /// Relative `filename` and `watchedDir` values are resolved against the
    /// directory containing the manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
        let manifest = Self::from_toml_str(&source)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            targets: manifest
                .targets
                .into_iter()
                .map(|target| target.rebase(base))
                .collect(),
        })
    }

    /// Resolve every target into an [`IndexConfig`], failing on the first invalid one.
    pub fn into_configs(self) -> Result<Vec<IndexConfig>, IndexError> {
        self.targets
            .into_iter()
            .enumerate()
            .map(|(i, target)| {
                target.into_config().map_err(|e| match e {
                    IndexError::InvalidConfig { message } => {
                        IndexError::config(format!("index #{}: {message}", i + 1))
                    }
                    other => other,
                })
            })
            .collect()
    }
}
