//! Shared configuration loader for the mkout renderers.
//!
//! Every key has a value in `defaults/mkout.default.toml`, which is compiled
//! in. A [`Loader`] stacks project files and single-key overrides over it and
//! produces a [`MkoutConfig`], one section per output format. Each section
//! converts into the matching `mkout_babel` options struct.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mkout_babel::formats::{
    JsonOptions, LinkStyle, ManOptions, MarkdownOptions, TextOptions, YamlOptions,
};
use mkout_babel::NodeKind;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mkout.default.toml");

/// Top-level configuration consumed by mkout applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MkoutConfig {
    pub markdown: MarkdownConfig,
    pub text: TextConfig,
    pub yaml: YamlConfig,
    pub man: ManConfig,
    pub json: JsonConfig,
}

/// Mirrors the knobs exposed by the markdown serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub hard_break_marker: String,
    pub emphasis_marker: String,
    pub strong_marker: String,
    pub thematic_break_marker: String,
    pub use_setext_headings: bool,
    pub line_terminator: String,
    pub link_style: LinkStyle,
    pub escape_text: bool,
    pub max_blank_lines: usize,
}

impl From<MarkdownConfig> for MarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        MarkdownOptions {
            hard_break_marker: config.hard_break_marker,
            emphasis_marker: config.emphasis_marker,
            strong_marker: config.strong_marker,
            thematic_break_marker: config.thematic_break_marker,
            use_setext_headings: config.use_setext_headings,
            line_terminator: config.line_terminator,
            link_style: config.link_style,
            escape_text: config.escape_text,
            max_blank_lines: config.max_blank_lines,
        }
    }
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        config.clone().into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextConfig {
    pub autolink: bool,
    pub indent: String,
    pub quote: String,
    pub hr: String,
    pub preserve: Vec<NodeKind>,
}

impl From<TextConfig> for TextOptions {
    fn from(config: TextConfig) -> Self {
        TextOptions {
            autolink: config.autolink,
            indent: config.indent,
            quote: config.quote,
            hr: config.hr,
            preserve: config.preserve,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct YamlConfig {
    pub compact: bool,
}

impl From<YamlConfig> for YamlOptions {
    fn from(config: YamlConfig) -> Self {
        YamlOptions {
            compact: config.compact,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManConfig {
    pub title: String,
    pub section: String,
    pub date: String,
}

impl From<ManConfig> for ManOptions {
    fn from(config: ManConfig) -> Self {
        ManOptions {
            title: config.title,
            section: config.section,
            date: config.date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
    pub indent: usize,
}

impl From<JsonConfig> for JsonOptions {
    fn from(config: JsonConfig) -> Self {
        JsonOptions {
            pretty: config.pretty,
            indent: config.indent,
        }
    }
}

/// Builder stacking configuration sources; later sources win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Seeded with the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Adds a file that must exist when [`Loader::build`] runs.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Adds a file that is skipped when absent, such as `./mkout.toml`.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Overrides one dotted key, e.g. `markdown.link_style`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MkoutConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults alone.
pub fn load_defaults() -> Result<MkoutConfig, ConfigError> {
    Loader::new().build()
}
