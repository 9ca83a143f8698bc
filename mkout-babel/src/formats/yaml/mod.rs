//! YAML format
//!
//! Serialization only: a readable dump of the tree structure. Compact mode
//! prints each node's kind and literal; full mode adds every attribute.

pub mod renderer;

pub use renderer::YamlRenderer;

use crate::ast::Tree;
use crate::common::params::{parse_bool, Params};
use crate::error::FormatError;
use crate::format::Format;
use crate::render::Renderer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the YAML dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlOptions {
    /// Leave out node properties
    pub compact: bool,
}

impl Default for YamlOptions {
    fn default() -> Self {
        Self { compact: true }
    }
}

impl YamlOptions {
    pub fn apply_params(&mut self, params: &Params) -> Result<(), FormatError> {
        for (key, raw) in params.iter() {
            match key.as_str() {
                "compact" => self.compact = parse_bool(key, raw)?,
                "full" => self.compact = !parse_bool(key, raw)?,
                _ => params.ignore(key),
            }
        }
        Ok(())
    }
}

/// Format implementation for the YAML tree dump
#[derive(Debug, Clone, Default)]
pub struct YamlFormat {
    options: YamlOptions,
}

impl YamlFormat {
    pub fn new(options: YamlOptions) -> Self {
        YamlFormat { options }
    }
}

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML dump of the document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(YamlRenderer::new(self.options.clone()).render(tree)?)
    }

    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut yaml = self.options.clone();
        yaml.apply_params(&Params::new(options))?;
        Ok(YamlRenderer::new(yaml).render(tree)?)
    }
}
