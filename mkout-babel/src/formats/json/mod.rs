//! JSON format
//!
//! A lossless dump of the tree through its serde form (see
//! [`crate::ast::serde_tree`]). This is the only format besides markdown
//! that can be parsed back; type tags it does not know are kept as
//! unknown nodes so that renderers can report them.

use crate::ast::Tree;
use crate::common::params::{parse_bool, parse_usize, Params};
use crate::error::FormatError;
use crate::format::Format;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::HashMap;
use tracing::debug;

/// Configuration for the JSON dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOptions {
    /// Indent nested objects
    pub pretty: bool,
    /// Spaces per indentation level when pretty printing
    pub indent: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 2,
        }
    }
}

impl JsonOptions {
    pub fn apply_params(&mut self, params: &Params) -> Result<(), FormatError> {
        for (key, raw) in params.iter() {
            match key.as_str() {
                "pretty" => self.pretty = parse_bool(key, raw)?,
                "indent" => self.indent = parse_usize(key, raw)?,
                _ => params.ignore(key),
            }
        }
        Ok(())
    }
}

/// Serialize a tree to JSON text, terminated by a newline.
pub fn serialize_to_json(tree: &Tree, options: &JsonOptions) -> Result<String, FormatError> {
    let to_error = |err: serde_json::Error| FormatError::SerializationError(err.to_string());
    let mut json = if options.pretty {
        let indent = " ".repeat(options.indent);
        let mut buf = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        tree.serialize(&mut serializer).map_err(to_error)?;
        String::from_utf8(buf).map_err(|err| FormatError::SerializationError(err.to_string()))?
    } else {
        serde_json::to_string(tree).map_err(to_error)?
    };
    json.push('\n');
    debug!(nodes = tree.len(), bytes = json.len(), "rendered json");
    Ok(json)
}

pub fn parse_from_json(source: &str) -> Result<Tree, FormatError> {
    serde_json::from_str(source).map_err(|err| FormatError::ParseError(err.to_string()))
}

/// Format implementation for the JSON tree dump
#[derive(Debug, Clone, Default)]
pub struct JsonFormat {
    options: JsonOptions,
}

impl JsonFormat {
    pub fn new(options: JsonOptions) -> Self {
        JsonFormat { options }
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON dump of the document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Tree, FormatError> {
        parse_from_json(source)
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        serialize_to_json(tree, &self.options)
    }

    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut json = self.options.clone();
        json.apply_params(&Params::new(options))?;
        serialize_to_json(tree, &json)
    }
}
