//! Export synthesis for autoindex.
//!
//! This crate turns the files found by `autoindex-scan` into a barrel
//! document and persists it:
//!
//! - **Classification** - [`classify`] decides between a default export,
//!   a wildcard re-export, or nothing, by looking for marker substrings
//! - **Statements** - [`ExportStatement`] renders one
//!   `export <binding> from './<module>'` line
//! - **Assembly** - [`DocumentBuilder`] joins statements and normalizes
//!   separators to `/`
//! - **Generation** - [`IndexGenerator`] runs scan, classify and assemble
//! - **Build hook** - [`IndexPlugin`] deletes the stale index, generates and
//!   writes the new one, optionally under a deadline
//!
//! # Example
//!
//! ```rust,no_run
//! use autoindex_synth::{IndexOptions, IndexPlugin};
//!
//! let plugin = IndexPlugin::from_options(IndexOptions::new("src/index.ts", "src")).unwrap();
//! let generation = plugin.run_blocking().unwrap();
//!
//! println!("{} statements", generation.document.statement_count());
//! ```

mod classify;
mod document;
mod generator;
mod plugin;
mod statement;
pub mod writer;

pub use classify::{DEFAULT_EXPORT_MARKER, EXPORT_MARKER, ExportKind, classify};
pub use document::{Document, DocumentBuilder};
pub use generator::{Generation, GenerationReport, IndexGenerator};
pub use plugin::{IndexPlugin, PLUGIN_NAME};
pub use statement::{Binding, ExportStatement, module_path};

// Re-export core types
pub use autoindex_core::{
    IndexConfig, IndexError, IndexManifest, IndexOptions, PathMode, SkipReason,
};
