//! Barrel document assembly.

use std::fmt;

use serde::Serialize;

use autoindex_core::path::to_forward_slashes;

use crate::statement::ExportStatement;

/// Accumulates export statements in traversal order.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    text: String,
    statements: usize,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement followed by a newline.
    pub fn push(&mut self, statement: &ExportStatement) {
        self.text.push_str(&statement.to_string());
        self.text.push('\n');
        self.statements += 1;
    }

    /// Number of statements pushed so far.
    pub fn len(&self) -> usize {
        self.statements
    }

    /// Check if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.statements == 0
    }

    /// Finish the document, turning every backslash into a forward slash.
    pub fn finish(self) -> Document {
        Document {
            text: to_forward_slashes(&self.text),
            statements: self.statements,
        }
    }
}

/// The generated index file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    text: String,
    statements: usize,
}

impl Document {
    /// Document text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// An empty document is valid and still gets written.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of export statements.
    pub fn statement_count(&self) -> usize {
        self.statements
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
