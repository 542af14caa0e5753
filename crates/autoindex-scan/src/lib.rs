//! Directory traversal engine for autoindex.
//!
//! This crate walks the watched directory with jwalk and narrows what it
//! finds down to the files eligible for export synthesis.
//!
//! # Overview
//!
//! - **Serial, sorted traversal** so repeated runs see the same order
//! - **Exclusion rules** for files, direct directory contents and the output file
//! - **Extension allow-list**, case-insensitive
//! - **Lazy iteration** via [`TreeWalker::eligible`], or an eager [`TreeWalker::scan`]
//!
//! # Example
//!
//! ```rust,no_run
//! use autoindex_scan::{IndexConfig, TreeWalker};
//!
//! let config = IndexConfig::new("src/index.ts", "src");
//! let walker = TreeWalker::new(&config).unwrap();
//!
//! for entry in walker.eligible() {
//!     println!("{}", entry.unwrap().relative_path.display());
//! }
//! ```

mod filter;
mod relative;
mod walker;

pub use filter::EntryFilter;
pub use relative::{relative_path, strip_first_segment};
pub use walker::{Entries, ScanOutcome, TreeWalker};

// Re-export core types for convenience
pub use autoindex_core::{FileEntry, IndexConfig, IndexError, PathMode, SkipReason};
