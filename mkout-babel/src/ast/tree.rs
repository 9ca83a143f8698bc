//! Arena-backed document tree.
//!
//! The [`Tree`] owns every node. Structural links (parent, children,
//! siblings) are stored as [`NodeId`] indices into the arena, so back
//! references never own anything. Nodes are only ever appended, which keeps
//! ids stable for the lifetime of the tree.

use super::node::{NodeKind, NodeValue};
use super::walker::Walker;
use crate::error::TreeError;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NodeData {
    value: NodeValue,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    last_line_blank: bool,
}

impl NodeData {
    fn new(value: NodeValue, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            first_child: None,
            last_child: None,
            prev: None,
            next: None,
            last_line_blank: false,
        }
    }
}

/// A document tree with a single `Document` root.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: vec![NodeData::new(NodeValue::Document, None)],
        }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root_id(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().first_child().is_none()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Append `value` as the last child of `parent`.
    ///
    /// Rejects shapes the renderers cannot express: a second document
    /// root, children under leaf kinds, items outside lists, non-items
    /// inside lists, block content inside inline containers and heading
    /// levels outside `1..=6`.
    pub fn append(&mut self, parent: NodeId, value: NodeValue) -> Result<NodeId, TreeError> {
        let parent_data = self
            .nodes
            .get(parent.0)
            .ok_or(TreeError::NoSuchNode(parent.0))?;
        check_child(&parent_data.value, &value)?;

        let id = NodeId(self.nodes.len());
        let mut data = NodeData::new(value, Some(parent));
        data.prev = parent_data.last_child;
        self.nodes.push(data);

        match self.nodes[parent.0].last_child {
            Some(last) => self.nodes[last.0].next = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        Ok(id)
    }

    /// Append a `Text` node, the most common leaf.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        literal: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.append(parent, NodeValue::Text(literal.into()))
    }

    pub fn set_last_line_blank(&mut self, id: NodeId, blank: bool) -> Result<(), TreeError> {
        let data = self.nodes.get_mut(id.0).ok_or(TreeError::NoSuchNode(id.0))?;
        data.last_line_blank = blank;
        Ok(())
    }

    /// Walk the whole tree.
    pub fn walker(&self) -> Walker<'_> {
        Walker::new(self.root())
    }
}

fn check_child(parent: &NodeValue, child: &NodeValue) -> Result<(), TreeError> {
    if let NodeValue::Heading(heading) = child {
        if !(1..=6).contains(&heading.level) {
            return Err(TreeError::InvalidHeadingLevel(heading.level));
        }
    }

    let invalid = || TreeError::InvalidChild {
        parent: parent.type_name().to_string(),
        child: child.type_name().to_string(),
    };

    let child_kind = child.kind();
    if child_kind == Some(NodeKind::Document) {
        return Err(invalid());
    }

    let Some(parent_kind) = parent.kind() else {
        // Unknown containers accept anything.
        return Ok(());
    };
    if parent_kind.is_leaf() {
        return Err(invalid());
    }
    let Some(child_kind) = child_kind else {
        return Ok(());
    };

    let allowed = match parent_kind {
        NodeKind::List => child_kind == NodeKind::Item,
        _ if child_kind == NodeKind::Item => false,
        // Custom blocks wrap either blocks or inline content.
        NodeKind::CustomBlock => true,
        _ if parent_kind.holds_inlines() => !child_kind.is_block(),
        _ => child_kind.is_block(),
    };
    if allowed {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Borrowed view of a node with navigation helpers.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: Option<NodeId>) -> Option<NodeRef<'a>> {
        id.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a NodeValue {
        &self.data().value
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.value().kind()
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn type_name(&self) -> &'a str {
        self.value().type_name()
    }

    pub fn literal(&self) -> Option<&'a str> {
        self.value().literal()
    }

    pub fn last_line_blank(&self) -> bool {
        self.data().last_line_blank
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.at(self.data().parent)
    }

    pub fn grandparent(&self) -> Option<NodeRef<'a>> {
        self.parent().and_then(|p| p.parent())
    }

    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.at(self.data().first_child)
    }

    pub fn last_child(&self) -> Option<NodeRef<'a>> {
        self.at(self.data().last_child)
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        self.at(self.data().next)
    }

    pub fn prev_sibling(&self) -> Option<NodeRef<'a>> {
        self.at(self.data().prev)
    }

    pub fn children(&self) -> Children<'a> {
        Children {
            next: self.first_child(),
        }
    }

    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Number of ancestors; the root has depth zero.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Walk the subtree rooted at this node.
    pub fn walker(&self) -> Walker<'a> {
        Walker::new(*self)
    }
}

pub struct Children<'a> {
    next: Option<NodeRef<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }
}

pub struct Ancestors<'a> {
    next: Option<NodeRef<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}
