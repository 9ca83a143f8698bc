//! The [`Format`] trait: one named reader and/or writer of [`Tree`]s.

use crate::ast::Tree;
use crate::error::FormatError;
use std::collections::HashMap;

/// A document format known to the [`crate::FormatRegistry`]
///
/// Only `name` is required. A write-only format overrides
/// `supports_serialization` and `serialize`; the capability flags let the
/// registry reject a call before it reaches the default error bodies below.
/// Formats are shared between threads, so any options they carry are plain
/// immutable data.
pub trait Format: Send + Sync {
    /// Registry key, also what `--from`/`--to` accept.
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Extensions without the dot, for detecting the input format.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn parse(&self, _source: &str) -> Result<Tree, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _tree: &Tree) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Render with `--extra-*` style parameters layered over the format's own
    /// options. Formats without options accept only an empty map.
    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(tree)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
