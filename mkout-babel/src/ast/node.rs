//! Node kinds and per-kind payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of node kinds every renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    Text,
    #[serde(rename = "emph")]
    Emphasis,
    Strong,
    Link,
    Image,
    Code,
    CodeBlock,
    BlockQuote,
    List,
    Item,
    ThematicBreak,
    HtmlBlock,
    HtmlInline,
    CustomBlock,
    CustomInline,
    #[serde(rename = "softbreak")]
    SoftBreak,
    #[serde(rename = "linebreak")]
    LineBreak,
}

impl NodeKind {
    pub const ALL: [NodeKind; 20] = [
        NodeKind::Document,
        NodeKind::Paragraph,
        NodeKind::Heading,
        NodeKind::Text,
        NodeKind::Emphasis,
        NodeKind::Strong,
        NodeKind::Link,
        NodeKind::Image,
        NodeKind::Code,
        NodeKind::CodeBlock,
        NodeKind::BlockQuote,
        NodeKind::List,
        NodeKind::Item,
        NodeKind::ThematicBreak,
        NodeKind::HtmlBlock,
        NodeKind::HtmlInline,
        NodeKind::CustomBlock,
        NodeKind::CustomInline,
        NodeKind::SoftBreak,
        NodeKind::LineBreak,
    ];

    /// Type tag used by the JSON and YAML dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading => "heading",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emph",
            NodeKind::Strong => "strong",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::Code => "code",
            NodeKind::CodeBlock => "code_block",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::List => "list",
            NodeKind::Item => "item",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::HtmlBlock => "html_block",
            NodeKind::HtmlInline => "html_inline",
            NodeKind::CustomBlock => "custom_block",
            NodeKind::CustomInline => "custom_inline",
            NodeKind::SoftBreak => "softbreak",
            NodeKind::LineBreak => "linebreak",
        }
    }

    /// Leaf kinds are visited once by the walker and never have children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Text
                | NodeKind::Code
                | NodeKind::CodeBlock
                | NodeKind::HtmlBlock
                | NodeKind::HtmlInline
                | NodeKind::ThematicBreak
                | NodeKind::SoftBreak
                | NodeKind::LineBreak
        )
    }

    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::CodeBlock
                | NodeKind::BlockQuote
                | NodeKind::List
                | NodeKind::Item
                | NodeKind::ThematicBreak
                | NodeKind::HtmlBlock
                | NodeKind::CustomBlock
        )
    }

    /// Kinds whose children are inline content.
    pub fn holds_inlines(self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Heading
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Link
                | NodeKind::Image
                | NodeKind::CustomInline
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown node kind '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    #[default]
    Bullet,
    Ordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListDelimiter {
    #[default]
    Period,
    Paren,
}

impl ListDelimiter {
    pub fn as_char(self) -> char {
        match self {
            ListDelimiter::Period => '.',
            ListDelimiter::Paren => ')',
        }
    }
}

/// List metadata, carried by both `List` and `Item` nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListData {
    pub list_type: ListType,
    pub start: usize,
    pub delimiter: ListDelimiter,
    pub bullet_char: char,
    pub tight: bool,
    /// Columns from the start of the marker to the item content.
    pub padding: usize,
    pub marker_offset: usize,
}

impl Default for ListData {
    fn default() -> Self {
        Self {
            list_type: ListType::Bullet,
            start: 1,
            delimiter: ListDelimiter::Period,
            bullet_char: '*',
            tight: true,
            padding: 0,
            marker_offset: 0,
        }
    }
}

impl ListData {
    pub fn bullet(bullet_char: char) -> Self {
        Self {
            bullet_char,
            ..Self::default()
        }
    }

    pub fn ordered(start: usize, delimiter: ListDelimiter) -> Self {
        Self {
            list_type: ListType::Ordered,
            start,
            delimiter,
            ..Self::default()
        }
    }

    pub fn with_tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    pub fn is_ordered(&self) -> bool {
        self.list_type == ListType::Ordered
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingData {
    pub level: u8,
    #[serde(default)]
    pub setext: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkData {
    pub destination: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl LinkData {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBlockData {
    #[serde(default)]
    pub info: String,
    pub literal: String,
    #[serde(default = "default_fenced")]
    pub fenced: bool,
}

fn default_fenced() -> bool {
    true
}

/// Raw markup written before and after the children of a custom node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomData {
    #[serde(default)]
    pub on_enter: Option<String>,
    #[serde(default)]
    pub on_exit: Option<String>,
}

/// A node's kind together with its kind-specific attributes.
///
/// `Unknown` holds the type tag of a node outside the supported set, as
/// produced by deserialized trees or unsupported parser extensions. It has
/// no [`NodeKind`], so every renderer rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    Document,
    Paragraph,
    Heading(HeadingData),
    Text(String),
    Emphasis,
    Strong,
    Link(LinkData),
    Image(LinkData),
    Code(String),
    CodeBlock(CodeBlockData),
    BlockQuote,
    List(ListData),
    Item(ListData),
    ThematicBreak,
    HtmlBlock(String),
    HtmlInline(String),
    CustomBlock(CustomData),
    CustomInline(CustomData),
    SoftBreak,
    LineBreak,
    Unknown(String),
}

impl NodeValue {
    pub fn heading(level: u8) -> Self {
        NodeValue::Heading(HeadingData {
            level,
            setext: false,
        })
    }

    pub fn text(literal: impl Into<String>) -> Self {
        NodeValue::Text(literal.into())
    }

    pub fn kind(&self) -> Option<NodeKind> {
        let kind = match self {
            NodeValue::Document => NodeKind::Document,
            NodeValue::Paragraph => NodeKind::Paragraph,
            NodeValue::Heading(_) => NodeKind::Heading,
            NodeValue::Text(_) => NodeKind::Text,
            NodeValue::Emphasis => NodeKind::Emphasis,
            NodeValue::Strong => NodeKind::Strong,
            NodeValue::Link(_) => NodeKind::Link,
            NodeValue::Image(_) => NodeKind::Image,
            NodeValue::Code(_) => NodeKind::Code,
            NodeValue::CodeBlock(_) => NodeKind::CodeBlock,
            NodeValue::BlockQuote => NodeKind::BlockQuote,
            NodeValue::List(_) => NodeKind::List,
            NodeValue::Item(_) => NodeKind::Item,
            NodeValue::ThematicBreak => NodeKind::ThematicBreak,
            NodeValue::HtmlBlock(_) => NodeKind::HtmlBlock,
            NodeValue::HtmlInline(_) => NodeKind::HtmlInline,
            NodeValue::CustomBlock(_) => NodeKind::CustomBlock,
            NodeValue::CustomInline(_) => NodeKind::CustomInline,
            NodeValue::SoftBreak => NodeKind::SoftBreak,
            NodeValue::LineBreak => NodeKind::LineBreak,
            NodeValue::Unknown(_) => return None,
        };
        Some(kind)
    }

    /// Type tag of this node, including tags of unknown nodes.
    pub fn type_name(&self) -> &str {
        match self {
            NodeValue::Unknown(tag) => tag,
            other => other.kind().map(NodeKind::as_str).unwrap_or_default(),
        }
    }

    pub fn literal(&self) -> Option<&str> {
        match self {
            NodeValue::Text(s)
            | NodeValue::Code(s)
            | NodeValue::HtmlBlock(s)
            | NodeValue::HtmlInline(s) => Some(s),
            NodeValue::CodeBlock(block) => Some(&block.literal),
            _ => None,
        }
    }
}
