use crate::common::params::{parse_bool, parse_usize, Params};
use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// How links are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStyle {
    /// `[text](destination "title")`
    #[default]
    Inline,
    /// `[text][n]` with a `[n]: destination "title"` table at the end
    Reference,
}

impl std::str::FromStr for LinkStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(LinkStyle::Inline),
            "reference" => Ok(LinkStyle::Reference),
            other => Err(format!("unknown link style '{other}'")),
        }
    }
}

/// Configuration for the markdown serializer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Written before the line terminator of a hard line break
    pub hard_break_marker: String,

    pub emphasis_marker: String,

    pub strong_marker: String,

    pub thematic_break_marker: String,

    /// Underline level 1 and 2 headings instead of using `#` markers
    pub use_setext_headings: bool,

    pub line_terminator: String,

    pub link_style: LinkStyle,

    /// Backslash-escape markdown syntax found in text nodes
    pub escape_text: bool,

    /// Maximum number of consecutive blank lines between blocks
    pub max_blank_lines: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            hard_break_marker: "\\".to_string(),
            emphasis_marker: "*".to_string(),
            strong_marker: "**".to_string(),
            thematic_break_marker: "---".to_string(),
            use_setext_headings: false,
            line_terminator: "\n".to_string(),
            link_style: LinkStyle::Inline,
            escape_text: true,
            max_blank_lines: 1,
        }
    }
}

impl MarkdownOptions {
    /// Apply per-call parameters on top of these options.
    ///
    /// Keys may use `-` or `_`; unknown keys are left for other consumers.
    pub fn apply_params(&mut self, params: &Params) -> Result<(), FormatError> {
        for (key, raw) in params.iter() {
            match key.as_str() {
                "hard_break_marker" => self.hard_break_marker = raw.clone(),
                "emphasis_marker" => self.emphasis_marker = raw.clone(),
                "strong_marker" => self.strong_marker = raw.clone(),
                "thematic_break_marker" => self.thematic_break_marker = raw.clone(),
                "use_setext_headings" | "setext" => {
                    self.use_setext_headings = parse_bool(key, raw)?
                }
                "line_terminator" => self.line_terminator = raw.clone(),
                "link_style" => {
                    self.link_style = raw
                        .parse()
                        .map_err(FormatError::SerializationError)?
                }
                "escape_text" => self.escape_text = parse_bool(key, raw)?,
                "max_blank_lines" => self.max_blank_lines = parse_usize(key, raw)?,
                _ => params.ignore(key),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_options() {
        let options = MarkdownOptions::default();
        assert_eq!(options.hard_break_marker, "\\");
        assert_eq!(options.emphasis_marker, "*");
        assert_eq!(options.strong_marker, "**");
        assert_eq!(options.thematic_break_marker, "---");
        assert!(!options.use_setext_headings);
        assert_eq!(options.line_terminator, "\n");
    }

    #[test]
    fn params_override_options() {
        let mut raw = HashMap::new();
        raw.insert("use-setext-headings".to_string(), "true".to_string());
        raw.insert("link-style".to_string(), "reference".to_string());
        raw.insert("emphasis_marker".to_string(), "_".to_string());
        raw.insert("unrelated".to_string(), "x".to_string());

        let mut options = MarkdownOptions::default();
        options.apply_params(&Params::new(&raw)).unwrap();
        assert!(options.use_setext_headings);
        assert_eq!(options.link_style, LinkStyle::Reference);
        assert_eq!(options.emphasis_marker, "_");
    }

    #[test]
    fn malformed_params_are_errors() {
        let mut raw = HashMap::new();
        raw.insert("escape-text".to_string(), "maybe".to_string());
        let mut options = MarkdownOptions::default();
        assert!(options.apply_params(&Params::new(&raw)).is_err());
    }

    #[test]
    fn missing_fields_default() {
        let options: MarkdownOptions = serde_json::from_str(r#"{"strong_marker":"__"}"#).unwrap();
        assert_eq!(options.strong_marker, "__");
        assert_eq!(options.emphasis_marker, "*");
    }
}
