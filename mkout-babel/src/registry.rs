//! Lookup of formats by name or file extension
//!
//! The cli never touches a format type directly: it asks the registry for a
//! name, or for the name matching an input path, and goes through it to
//! parse and serialize.

use crate::ast::Tree;
use crate::error::FormatError;
use crate::format::Format;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Named set of [`Format`]s
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let tree = registry.parse("# Title\n", "markdown")?;
/// let page = registry.serialize(&tree, "man")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// An empty registry; see [`FormatRegistry::with_defaults`] for the built-in set.
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Add `format` under its own name, replacing any format already there.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Look a format up, failing with [`FormatError::FormatNotFound`].
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|format| format.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered names in ascending order.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self.formats.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Name of the format claiming the extension of `filename`.
    ///
    /// Ties go to the name that sorts first, so `doc.md` stays markdown even
    /// when another registered format also lists `md`.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension()?.to_str()?;

        self.list_formats().into_iter().find(|name| {
            self.formats
                .get(name)
                .map_or(false, |format| format.file_extensions().contains(&extension))
        })
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Tree, FormatError> {
        let reader = self.get(format)?;
        if !reader.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        debug!(format, bytes = source.len(), "parsing");
        reader.parse(source)
    }

    pub fn serialize(&self, tree: &Tree, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(tree, format, &HashMap::new())
    }

    /// Render `tree` as `format`, with `params` layered over the format's options.
    pub fn serialize_with_options(
        &self,
        tree: &Tree,
        format: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let writer = self.get(format)?;
        if !writer.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        debug!(format, nodes = tree.len(), params = params.len(), "serializing");
        writer.serialize_with_options(tree, params)
    }

    /// All five built-in formats with their default options.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::formats::markdown::MarkdownFormat::default());
        registry.register(crate::formats::json::JsonFormat::default());
        registry.register(crate::formats::yaml::YamlFormat::default());
        registry.register(crate::formats::text::TextFormat::default());
        registry.register(crate::formats::man::ManFormat::default());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
