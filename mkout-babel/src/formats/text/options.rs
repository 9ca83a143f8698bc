use crate::ast::NodeKind;
use crate::common::params::{parse_bool, Params};
use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// Configuration for the plain text renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Replace links by `text[n]` and list the destinations at the end
    pub autolink: bool,

    /// Indentation of code blocks and block quotes
    pub indent: String,

    /// Written after `indent` on every block quote line
    pub quote: String,

    /// Thematic break replacement
    pub hr: String,

    /// Node kinds kept as markdown
    pub preserve: Vec<NodeKind>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            autolink: true,
            indent: "    ".to_string(),
            quote: "|".to_string(),
            hr: "-".repeat(80),
            preserve: Vec::new(),
        }
    }
}

impl TextOptions {
    pub fn preserves(&self, kind: NodeKind) -> bool {
        self.preserve.contains(&kind)
    }

    /// Apply per-call parameters. `preserve` takes a comma separated list
    /// of node kinds.
    pub fn apply_params(&mut self, params: &Params) -> Result<(), FormatError> {
        for (key, raw) in params.iter() {
            match key.as_str() {
                "autolink" => self.autolink = parse_bool(key, raw)?,
                "indent" => self.indent = raw.clone(),
                "quote" => self.quote = raw.clone(),
                "hr" => self.hr = raw.clone(),
                "preserve" => self.preserve = parse_kinds(raw)?,
                _ => params.ignore(key),
            }
        }
        Ok(())
    }
}

fn parse_kinds(raw: &str) -> Result<Vec<NodeKind>, FormatError> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<NodeKind>().map_err(FormatError::SerializationError))
        .collect()
}
