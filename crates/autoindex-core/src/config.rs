//! Index generation configuration types.

use std::collections::BTreeSet;
use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::error::IndexError;
use crate::path::{normalize_extension, path_key, relative_key};

/// Extensions considered source modules when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

/// How a discovered entry's path relative to the watched directory is derived.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PathMode {
    /// Path from the watched directory straight to the entry.
    #[default]
    Relative,
    /// Parent directory with its first segment dropped, joined with the entry name.
    ///
    /// Matches the output of older generated indexes. Differs from
    /// [`PathMode::Relative`] once the watched directory is more than one
    /// segment deep.
    Legacy,
}

/// Configuration for one index generation run.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct IndexConfig {
    /// Path of the generated index file.
    pub output: PathBuf,

    /// Directory to scan.
    pub root: PathBuf,

    /// Files to skip, relative to `root`.
    #[builder(default)]
    #[serde(default)]
    pub exclude_files: Vec<String>,

    /// Directories whose direct contents are skipped, relative to `root`.
    #[builder(default)]
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    /// Extensions (without the leading dot) eligible for export.
    #[builder(default = "default_extensions()")]
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Keep the file extension in generated module paths.
    #[builder(default = "false")]
    #[serde(default)]
    pub preserve_extension: bool,

    /// Relative path derivation.
    #[builder(default)]
    #[serde(default)]
    pub path_mode: PathMode,

    /// Follow symbolic links while walking.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

impl IndexConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.output {
            Some(ref output) if output.as_os_str().is_empty() => {
                return Err("Output filename cannot be empty".to_string());
            }
            None => return Err("Output filename is required".to_string()),
            _ => {}
        }
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("Watched directory cannot be empty".to_string())
            }
            None => Err("Watched directory is required".to_string()),
            _ => Ok(()),
        }
    }
}

impl From<IndexConfigBuilderError> for IndexError {
    fn from(err: IndexConfigBuilderError) -> Self {
        IndexError::config(err.to_string())
    }
}

impl IndexConfig {
    /// Create a new config builder.
    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    /// Create a config with default filters for an output file and a watched directory.
    pub fn new(output: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            root: root.into(),
            exclude_files: Vec::new(),
            exclude_dirs: Vec::new(),
            allowed_extensions: default_extensions(),
            preserve_extension: false,
            path_mode: PathMode::default(),
            follow_symlinks: false,
        }
    }

    /// Normalized keys of excluded files.
    ///
    /// Contains the output path relative to `root` when it lies lexically under
    /// it. An output elsewhere is matched by absolute path during the walk, never
    /// by key, so an unrelated file with the same relative name stays eligible.
    pub fn excluded_file_keys(&self) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = self
            .exclude_files
            .iter()
            .map(|file| relative_key(file))
            .collect();

        if let Ok(inside) = self.output.strip_prefix(&self.root) {
            keys.insert(path_key(inside));
        }

        keys
    }

    /// Normalized keys of excluded directories (`""` is the watched directory itself).
    pub fn excluded_dir_keys(&self) -> BTreeSet<String> {
        self.exclude_dirs
            .iter()
            .map(|dir| relative_key(dir))
            .collect()
    }

    /// Normalized set of allowed extensions.
    pub fn extension_set(&self) -> BTreeSet<String> {
        self.allowed_extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .filter(|ext| !ext.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = IndexConfig::builder()
            .output("src/index.ts")
            .root("src")
            .preserve_extension(true)
            .exclude_dirs(vec!["internal".to_string()])
            .build()
            .unwrap();

        assert_eq!(config.output, PathBuf::from("src/index.ts"));
        assert_eq!(config.root, PathBuf::from("src"));
        assert!(config.preserve_extension);
        assert_eq!(config.allowed_extensions, default_extensions());
        assert_eq!(config.path_mode, PathMode::Relative);
    }

    #[test]
    fn test_config_builder_requires_paths() {
        let err = IndexConfig::builder().root("src").build().unwrap_err();
        assert!(err.to_string().contains("Output filename is required"));

        let err = IndexConfig::builder()
            .output("index.ts")
            .root("")
            .build()
            .unwrap_err();
        assert!(IndexError::from(err).is_config());
    }

    #[test]
    fn test_excluded_file_keys_include_output() {
        let config = IndexConfig::builder()
            .output("src/index.ts")
            .root("src")
            .exclude_files(vec!["./legacy\\old.ts".to_string()])
            .build()
            .unwrap();

        let keys = config.excluded_file_keys();
        assert!(keys.contains("index.ts"));
        assert!(keys.contains("legacy/old.ts"));
        assert!(!keys.contains("src/index.ts"));
    }

    #[test]
    fn test_output_outside_root_adds_no_key() {
        let config = IndexConfig::new("lib/index.ts", "app");

        let keys = config.excluded_file_keys();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_extension_set_normalized() {
        let mut config = IndexConfig::new("index.ts", ".");
        config.allowed_extensions = vec![".TS".to_string(), "jsx".to_string(), "".to_string()];

        let set = config.extension_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("ts"));
        assert!(set.contains("jsx"));
    }

    #[test]
    fn test_path_mode_parse() {
        assert_eq!("legacy".parse::<PathMode>().unwrap(), PathMode::Legacy);
        assert_eq!(PathMode::Relative.to_string(), "relative");
    }
}
