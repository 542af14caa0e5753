//! Persisting the generated document.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use autoindex_core::IndexError;

use crate::document::Document;

/// Delete a previously generated index. Returns `true` if a file was removed.
///
/// Failures are never fatal: a missing file is the normal first-run case and
/// anything else is logged and left for the following write to surface.
pub fn remove_stale(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale index");
            true
        }
        Err(err) if err.kind() == ErrorKind::NotFound => false,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not remove stale index");
            false
        }
    }
}

/// Write `document` to `path`, replacing whatever is there.
pub fn write_document(path: &Path, document: &Document) -> Result<(), IndexError> {
    std::fs::write(path, document.as_str()).map_err(|e| IndexError::io(path, e))
}
