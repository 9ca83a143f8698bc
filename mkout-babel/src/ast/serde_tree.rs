//! Nested serde representation of a [`Tree`].
//!
//! Each node becomes an object tagged by `type` with its attributes and a
//! `children` array. Tags outside the known set deserialize into
//! [`NodeValue::Unknown`] instead of failing, so a renderer can report them.

use super::node::{CodeBlockData, CustomData, HeadingData, LinkData, ListData, NodeKind, NodeValue};
use super::tree::{NodeId, NodeRef, Tree};
use crate::error::TreeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerialNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setext: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fenced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_data: Option<ListData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_enter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_exit: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub last_line_blank: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SerialNode>,
}

impl SerialNode {
    fn from_node(node: NodeRef<'_>) -> Self {
        let mut out = SerialNode {
            kind: node.type_name().to_string(),
            last_line_blank: node.last_line_blank(),
            ..SerialNode::default()
        };
        match node.value() {
            NodeValue::Heading(h) => {
                out.level = Some(h.level);
                out.setext = Some(h.setext);
            }
            NodeValue::Text(s)
            | NodeValue::Code(s)
            | NodeValue::HtmlBlock(s)
            | NodeValue::HtmlInline(s) => out.literal = Some(s.clone()),
            NodeValue::Link(link) | NodeValue::Image(link) => {
                out.destination = Some(link.destination.clone());
                out.title = link.title.clone();
            }
            NodeValue::CodeBlock(block) => {
                out.literal = Some(block.literal.clone());
                out.info = Some(block.info.clone());
                out.fenced = Some(block.fenced);
            }
            NodeValue::List(data) | NodeValue::Item(data) => out.list_data = Some(data.clone()),
            NodeValue::CustomBlock(custom) | NodeValue::CustomInline(custom) => {
                out.on_enter = custom.on_enter.clone();
                out.on_exit = custom.on_exit.clone();
            }
            _ => {}
        }
        out.children = node.children().map(SerialNode::from_node).collect();
        out
    }

    fn to_value(&self) -> NodeValue {
        let Ok(kind) = self.kind.parse::<NodeKind>() else {
            return NodeValue::Unknown(self.kind.clone());
        };
        let literal = || self.literal.clone().unwrap_or_default();
        let link = || LinkData {
            destination: self.destination.clone().unwrap_or_default(),
            title: self.title.clone().filter(|t| !t.is_empty()),
        };
        let list = || self.list_data.clone().unwrap_or_default();
        let custom = || CustomData {
            on_enter: self.on_enter.clone(),
            on_exit: self.on_exit.clone(),
        };
        match kind {
            NodeKind::Document => NodeValue::Document,
            NodeKind::Paragraph => NodeValue::Paragraph,
            NodeKind::Heading => NodeValue::Heading(HeadingData {
                level: self.level.unwrap_or(1),
                setext: self.setext.unwrap_or(false),
            }),
            NodeKind::Text => NodeValue::Text(literal()),
            NodeKind::Emphasis => NodeValue::Emphasis,
            NodeKind::Strong => NodeValue::Strong,
            NodeKind::Link => NodeValue::Link(link()),
            NodeKind::Image => NodeValue::Image(link()),
            NodeKind::Code => NodeValue::Code(literal()),
            NodeKind::CodeBlock => NodeValue::CodeBlock(CodeBlockData {
                info: self.info.clone().unwrap_or_default(),
                literal: literal(),
                fenced: self.fenced.unwrap_or(true),
            }),
            NodeKind::BlockQuote => NodeValue::BlockQuote,
            NodeKind::List => NodeValue::List(list()),
            NodeKind::Item => NodeValue::Item(list()),
            NodeKind::ThematicBreak => NodeValue::ThematicBreak,
            NodeKind::HtmlBlock => NodeValue::HtmlBlock(literal()),
            NodeKind::HtmlInline => NodeValue::HtmlInline(literal()),
            NodeKind::CustomBlock => NodeValue::CustomBlock(custom()),
            NodeKind::CustomInline => NodeValue::CustomInline(custom()),
            NodeKind::SoftBreak => NodeValue::SoftBreak,
            NodeKind::LineBreak => NodeValue::LineBreak,
        }
    }

    fn append_into(&self, tree: &mut Tree, parent: NodeId) -> Result<(), TreeError> {
        let id = tree.append(parent, self.to_value())?;
        tree.set_last_line_blank(id, self.last_line_blank)?;
        self.children
            .iter()
            .try_for_each(|child| child.append_into(tree, id))
    }
}

impl From<&Tree> for SerialNode {
    fn from(tree: &Tree) -> Self {
        SerialNode::from_node(tree.root())
    }
}

impl TryFrom<&SerialNode> for Tree {
    type Error = TreeError;

    fn try_from(root: &SerialNode) -> Result<Self, Self::Error> {
        if root.kind != NodeKind::Document.as_str() {
            return Err(TreeError::InvalidRoot(root.kind.clone()));
        }
        let mut tree = Tree::new();
        let root_id = tree.root_id();
        tree.set_last_line_blank(root_id, root.last_line_blank)?;
        root.children
            .iter()
            .try_for_each(|child| child.append_into(&mut tree, root_id))?;
        Ok(tree)
    }
}

impl Serialize for Tree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerialNode::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tree {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let root = SerialNode::deserialize(deserializer)?;
        Tree::try_from(&root).map_err(serde::de::Error::custom)
    }
}
