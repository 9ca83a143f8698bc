//! Renderer dispatch engine.
//!
//!     Rendering walks the tree once. Every enter/exit event is looked up in
//!     a [`HandlerTable`] by node kind and the handler writes into an
//!     [`Output`]. Handlers get the renderer's state struct by `&mut`; that
//!     state is built fresh by every [`Renderer::render`] call, so renderers
//!     are reusable and can be shared across threads.
//!
//!     A node of unknown kind, or a kind the table has no handler for, stops
//!     the render with [`RenderError::UnknownNodeKind`] and no output.

pub mod dispatch;
pub mod output;

pub use dispatch::{drive, Handler, HandlerTable};
pub use output::Output;

use crate::ast::Tree;
use crate::error::RenderError;

/// A tree-to-text renderer.
pub trait Renderer: Send + Sync {
    fn render(&self, tree: &Tree) -> Result<String, RenderError>;
}
