//! Core types, configuration and errors for autoindex.
//!
//! This crate provides the data model shared by the scanner and the export
//! synthesizer: the immutable [`IndexConfig`] for one run, the user-facing
//! [`IndexOptions`] and [`IndexManifest`] it is built from, discovered
//! [`FileEntry`] values and the [`IndexError`] taxonomy.

mod config;
mod entry;
mod error;
mod options;
pub mod path;

pub use config::{
    DEFAULT_EXTENSIONS, IndexConfig, IndexConfigBuilder, IndexConfigBuilderError, PathMode,
};
pub use entry::{FileEntry, SkipReason, file_stem};
pub use error::IndexError;
pub use options::{IndexManifest, IndexOptions};
