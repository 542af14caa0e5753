//! Re-export statements.

use std::fmt;
use std::path::Path;

use compact_str::CompactString;

use autoindex_core::file_stem;

use crate::classify::{ExportKind, classify};

/// What a statement re-exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The module's default export, renamed after its file.
    Default(CompactString),
    /// Every named export.
    All,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Default(name) => write!(f, "{{ default as {name} }}"),
            Binding::All => f.write_str("*"),
        }
    }
}

/// One `export <binding> from './<module>'` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStatement {
    pub binding: Binding,
    /// Module path relative to the index, separators as produced by the platform.
    pub module_path: String,
}

impl ExportStatement {
    /// Build the statement for a file, or `None` if it exports nothing.
    pub fn for_file(relative_path: &Path, content: &str, preserve_extension: bool) -> Option<Self> {
        let binding = match classify(content) {
            ExportKind::Default => Binding::Default(file_stem(relative_path)),
            ExportKind::All => Binding::All,
            ExportKind::NoExports => return None,
        };

        Some(Self {
            binding,
            module_path: module_path(relative_path, preserve_extension),
        })
    }

    /// Export shape this statement was built from.
    pub fn kind(&self) -> ExportKind {
        match self.binding {
            Binding::Default(_) => ExportKind::Default,
            Binding::All => ExportKind::All,
        }
    }
}

impl fmt::Display for ExportStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "export {} from './{}'", self.binding, self.module_path)
    }
}

/// Import path for a file, its last extension dropped unless `preserve_extension`.
pub fn module_path(relative_path: &Path, preserve_extension: bool) -> String {
    if preserve_extension {
        relative_path.to_string_lossy().into_owned()
    } else {
        relative_path
            .with_extension("")
            .to_string_lossy()
            .into_owned()
    }
}
