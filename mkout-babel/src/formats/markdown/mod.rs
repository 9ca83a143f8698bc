//! Markdown format implementation
//!
//! Bidirectional conversion between CommonMark and the document tree.
//!
//! # Library Choice
//!
//! Parsing is done by `comrak`. Serialization is our own: comrak's
//! formatter works on its own arena AST, while every renderer in this crate
//! works on [`crate::ast::Tree`] through the same dispatch engine, so
//! markdown output is just another handler table.
//!
//! # Element Mapping Table
//!
//! | Node            | Markdown                        | Notes                                    |
//! |-----------------|---------------------------------|------------------------------------------|
//! | Heading         | `#` … `######` or underlined    | Setext only for levels 1-2, if enabled   |
//! | Paragraph       | Lines of text                   | Elided inside tight list items           |
//! | List / Item     | `*`, `-`, `+`, `1.`, `1)`       | Marker padding taken from the item       |
//! | BlockQuote      | `> ` prefix                     | Applied to every line, blank ones too    |
//! | CodeBlock       | Fenced block                    | Fence outgrows any run in the literal    |
//! | ThematicBreak   | `---`                           | Marker configurable                      |
//! | HtmlBlock       | Verbatim                        | Always followed by a blank line          |
//! | Text            | Escaped text                    | Escaping can be disabled                 |
//! | Emphasis/Strong | `*` / `**`                      | Markers configurable                     |
//! | Link            | `[text](dest "title")`          | Or `[text][n]` with a reference table    |
//! | Image           | `![alt](dest "title")`          | Always inline                            |
//! | Code            | `` `code` ``                    | Backtick run outgrows the literal        |
//! | LineBreak       | `\` + newline                   | Marker configurable                      |
//! | Custom*         | `on_enter` … `on_exit`          | Written verbatim                         |
//!
//! # Lossy Conversions
//!
//! - Indented code blocks come back as fenced blocks
//! - `_` emphasis and `__` strong come back as `*` and `**`
//! - Reference definitions of the source are inlined into links
//! - Multiple blank lines collapse to `max_blank_lines`
//!
//! # Testing
//!
//! Round-trip tests (markdown → tree → markdown → tree) live in
//! `tests/markdown/`, together with snapshot tests of the export.

mod escape;
pub mod options;
pub mod parser;
pub mod serializer;

pub use options::{LinkStyle, MarkdownOptions};
pub use serializer::{MarkdownRenderer, MarkdownState};

use crate::ast::Tree;
use crate::common::params::Params;
use crate::error::FormatError;
use crate::format::Format;
use crate::render::Renderer;
use std::collections::HashMap;

/// Format implementation for CommonMark markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        MarkdownFormat { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Tree, FormatError> {
        parser::parse_from_markdown(source)
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(MarkdownRenderer::new(self.options.clone()).render(tree)?)
    }

    fn serialize_with_options(
        &self,
        tree: &Tree,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut markdown = self.options.clone();
        markdown.apply_params(&Params::new(options))?;
        Ok(MarkdownRenderer::new(markdown).render(tree)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metadata() {
        let format = MarkdownFormat::default();
        assert_eq!(format.name(), "markdown");
        assert_eq!(format.file_extensions(), &["md", "markdown"]);
        assert!(format.supports_parsing());
        assert!(format.supports_serialization());
    }

    #[test]
    fn test_params_reach_the_renderer() {
        let format = MarkdownFormat::default();
        let tree = format.parse("Heading\n=======\n").unwrap();
        assert_eq!(format.serialize(&tree).unwrap(), "# Heading\n");

        let mut params = HashMap::new();
        params.insert("setext".to_string(), "true".to_string());
        assert_eq!(
            format.serialize_with_options(&tree, &params).unwrap(),
            "Heading\n=======\n"
        );
    }
}
