//! Error types for tree building, rendering and format operations

use thiserror::Error;

/// Raised while assembling a [`crate::ast::Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} does not exist in this tree")]
    NoSuchNode(usize),
    #[error("'{child}' cannot be a child of '{parent}'")]
    InvalidChild { parent: String, child: String },
    #[error("heading level {0} is outside 1..=6")]
    InvalidHeadingLevel(u8),
    #[error("tree root must be a document, found '{0}'")]
    InvalidRoot(String),
}

/// Raised by the dispatch engine. Always fatal for the render call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Unknown node type '{0}'")]
    UnknownNodeKind(String),
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<TreeError> for FormatError {
    fn from(err: TreeError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}
