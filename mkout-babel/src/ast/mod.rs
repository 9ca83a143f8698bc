//! Document tree consumed by every renderer.
//!
//!     The tree is a CommonMark-style hierarchy: a single `Document` root,
//!     block nodes (paragraphs, headings, lists, quotes, code blocks) and
//!     inline nodes (text, emphasis, links, code spans). Parsers build it
//!     once through [`Tree::append`], which enforces the structural rules;
//!     renderers only ever read it.
//!
//!     - [`node`]: the closed [`NodeKind`] set and the per-kind payloads.
//!     - [`tree`]: the arena, [`NodeId`] handles and [`NodeRef`] navigation.
//!     - [`walker`]: the enter/exit event stream renderers are driven by.
//!     - [`serde_tree`]: nested serde form used by the JSON format.

pub mod node;
pub mod serde_tree;
pub mod tree;
pub mod walker;

pub use node::{
    CodeBlockData, CustomData, HeadingData, LinkData, ListData, ListDelimiter, ListType,
    NodeKind, NodeValue,
};
pub use tree::{NodeId, NodeRef, Tree};
pub use walker::{WalkEvent, Walker};
