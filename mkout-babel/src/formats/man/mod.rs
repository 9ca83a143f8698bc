//! Man page format
//!
//! Serialization only. The `.TH` preamble takes its title, section and date
//! from [`ManOptions`]; nothing is read from the clock, so output is
//! reproducible.

pub mod renderer;

pub use renderer::ManRenderer;

use crate::ast::Tree;
use crate::common::params::Params;
use crate::error::FormatError;
use crate::format::Format;
use crate::render::Renderer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the man page renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManOptions {
    pub title: String,
    pub section: String,
    pub date: String,
}

impl Default for ManOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            section: "1".to_string(),
            date: String::new(),
        }
    }
}

impl ManOptions {
    pub fn apply_params(&mut self, params: &Params) -> Result<(), FormatError> {
        for (key, raw) in params.iter() {
            match key.as_str() {
                "title" => self.title = raw.clone(),
                "section" => self.section = raw.clone(),
                "date" => self.date = raw.clone(),
                _ => params.ignore(key),
            }
        }
        Ok(())
    }
}

/// Format implementation for roff man pages
#[derive(Debug, Clone, Default)]
pub struct ManFormat {
    options: ManOptions,
}

impl ManFormat {
    pub fn new(options: ManOptions) -> Self {
        ManFormat { options }
    }
}

impl Format for ManFormat {
    fn name(&self) -> &str {
        "man"
    }

    fn description(&self) -> &str {
        "roff man page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["man", "1"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(ManRenderer::new(self.options.clone()).render(tree)?)
    }

    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut man = self.options.clone();
        man.apply_params(&Params::new(options))?;
        Ok(ManRenderer::new(man).render(tree)?)
    }
}
