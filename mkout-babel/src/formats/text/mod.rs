//! Plain text format
//!
//! Serialization only. Markup is stripped except for paragraphs, lists and
//! the kinds listed in [`TextOptions::preserve`], which stay markdown. Links
//! become `text[n]` with the destinations listed at the end of the output,
//! code blocks and block quotes are indented, HTML is reduced to its text.

pub mod options;
pub mod renderer;

pub use options::TextOptions;
pub use renderer::TextRenderer;

use crate::ast::Tree;
use crate::common::params::Params;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::markdown::MarkdownOptions;
use crate::render::Renderer;
use std::collections::HashMap;

/// Format implementation for plain text
#[derive(Debug, Clone, Default)]
pub struct TextFormat {
    options: TextOptions,
    markdown: MarkdownOptions,
}

impl TextFormat {
    pub fn new(options: TextOptions) -> Self {
        TextFormat {
            options,
            markdown: MarkdownOptions::default(),
        }
    }

    /// Options for the kinds that are written as markdown.
    pub fn with_markdown_options(mut self, markdown: MarkdownOptions) -> Self {
        self.markdown = markdown;
        self
    }

    fn renderer(&self, options: TextOptions) -> TextRenderer {
        TextRenderer::new(options).with_markdown_options(self.markdown.clone())
    }
}

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain text with markup removed"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(self.renderer(self.options.clone()).render(tree)?)
    }

    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut text = self.options.clone();
        text.apply_params(&Params::new(options))?;
        Ok(self.renderer(text).render(tree)?)
    }
}
