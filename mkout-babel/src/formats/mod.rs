//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the document tree and text representations.

pub mod json;
pub mod man;
pub mod markdown;
pub mod text;
pub mod yaml;

pub use json::{JsonFormat, JsonOptions};
pub use man::{ManFormat, ManOptions};
pub use markdown::{LinkStyle, MarkdownFormat, MarkdownOptions};
pub use text::{TextFormat, TextOptions};
pub use yaml::{YamlFormat, YamlOptions};
