//! Content-based export classification.
//!
//! Detection is plain substring matching, not parsing: a marker inside a
//! comment or a string literal counts the same as real code.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Marks a module with a default export.
pub const DEFAULT_EXPORT_MARKER: &str = "export default";

/// Marks a module with at least one export.
pub const EXPORT_MARKER: &str = "export";

/// Export shape of a module.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExportKind {
    /// Re-exported as `{ default as <Name> }`.
    Default,
    /// Re-exported with `*`.
    All,
    /// Nothing to re-export.
    NoExports,
}

/// Classify a module by its text.
pub fn classify(content: &str) -> ExportKind {
    if content.contains(DEFAULT_EXPORT_MARKER) {
        ExportKind::Default
    } else if content.contains(EXPORT_MARKER) {
        ExportKind::All
    } else {
        ExportKind::NoExports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default() {
        assert_eq!(classify("export default function f(){}"), ExportKind::Default);
        // Default wins even when named exports are present.
        assert_eq!(
            classify("export const a = 1;\nexport default a;"),
            ExportKind::Default
        );
    }

    #[test]
    fn test_classify_named() {
        assert_eq!(classify("export const x = 1;"), ExportKind::All);
        assert_eq!(classify("export { a, b } from './c'"), ExportKind::All);
    }

    #[test]
    fn test_classify_none() {
        assert_eq!(classify("const x = 1;"), ExportKind::NoExports);
        assert_eq!(classify(""), ExportKind::NoExports);
    }

    #[test]
    fn test_markers_in_comments_count() {
        assert_eq!(classify("// export default is banned here"), ExportKind::Default);
        assert_eq!(classify("const s = 'exporter';"), ExportKind::All);
        // Matching is case-sensitive.
        assert_eq!(classify("EXPORT DEFAULT"), ExportKind::NoExports);
    }
}
