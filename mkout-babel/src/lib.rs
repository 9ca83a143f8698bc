//! Markdown document trees and the renderers that write them out
//!
//!     This crate turns a CommonMark document tree into text: markdown that parses back to the
//!     same tree, a YAML or JSON dump of the structure, plain text and roff man pages.
//!
//!     TLDR: For format authors:
//!         - Parsing markdown is comrak's job; we only adapt its AST into a [`Tree`].
//!         - Renderers never walk the tree themselves. They register one handler per node kind
//!           in a [`HandlerTable`] and let [`render::drive`] feed them enter/exit events.
//!         - All output goes through [`Output`], which owns line terminators, line prefixes and
//!           blank lines. Handlers only say "end this line" or "leave a blank line here".
//!         - Renderer state lives in a struct built fresh by every `render` call.
//!
//! Architecture
//!
//!     This is a pure lib: it powers the mkout cli but never prints, reads files or looks at
//!     environment variables.
//!
//!     The file structure :
//!     .
//!     ├── ast                     # Tree, node kinds, walker, serde form
//!     ├── render                  # Dispatch engine and output buffer
//!     ├── common                  # Link collector, HTML normalization, parameters
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation (markdown only)
//!     │   │   ├── serializer.rs   # or renderer.rs
//!     │   │   └── mod.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithm
//!
//!     The markdown serializer is the hard part: it only sees the tree, so list markers and
//!     padding, tight list paragraphs, setext underlines, reference tables and blank lines all
//!     have to be rebuilt so that comrak produces the same tree again. See
//!     ./formats/markdown/serializer.rs.
//!
//! Formats
//!
//!     | Format   | Parse | Serialize |
//!     |----------|-------|-----------|
//!     | markdown | yes   | yes       |
//!     | json     | yes   | yes       |
//!     | yaml     |       | yes       |
//!     | text     |       | yes       |
//!     | man      |       | yes       |

pub mod ast;
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod render;

pub use ast::{NodeId, NodeKind, NodeRef, NodeValue, Tree};
pub use error::{FormatError, RenderError, TreeError};
pub use format::Format;
pub use registry::FormatRegistry;
pub use render::{HandlerTable, Output, Renderer};

/// Parse markdown into a document tree.
pub fn parse_markdown(source: &str) -> Result<Tree, FormatError> {
    formats::markdown::parser::parse_from_markdown(source)
}

/// Render a tree back to markdown with default options.
pub fn to_markdown(tree: &Tree) -> Result<String, RenderError> {
    formats::markdown::serializer::serialize_to_markdown(tree)
}
