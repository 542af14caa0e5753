//! Error types for index generation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while scanning a tree or writing an index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Traversal failed without an underlying I/O error (e.g. a link loop).
    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    /// Watched directory is not a directory.
    #[error("Watched path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Missing or malformed configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generation was cancelled before the document was assembled.
    #[error("Operation interrupted")]
    Interrupted,

    /// Generation did not finish within the caller's deadline.
    #[error("Index generation timed out after {after:?}")]
    TimedOut { after: Duration },
}

impl IndexError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error was raised before any filesystem access.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// Whether this error means the watched directory (or a path inside it) is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotADirectory { .. })
    }
}
