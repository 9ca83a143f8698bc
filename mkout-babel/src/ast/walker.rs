//! Depth-first enter/exit traversal.

use super::tree::NodeRef;

/// One step of a traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkEvent<'a> {
    pub node: NodeRef<'a>,
    pub entering: bool,
}

/// Pull-based walker over a subtree.
///
/// Containers are reported twice (entering, then exiting after their
/// children); leaf kinds are reported once with `entering == true`. Nodes
/// of unknown kind are treated as containers. The walker stops after
/// leaving the node it was started on; start a new walker to traverse
/// again.
pub struct Walker<'a> {
    root: NodeRef<'a>,
    next: Option<(NodeRef<'a>, bool)>,
}

impl<'a> Walker<'a> {
    pub fn new(root: NodeRef<'a>) -> Self {
        Walker {
            root,
            next: Some((root, true)),
        }
    }
}

fn is_container(node: &NodeRef<'_>) -> bool {
    node.kind().map_or(true, |kind| !kind.is_leaf())
}

impl<'a> Iterator for Walker<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, entering) = self.next?;

        self.next = if entering && is_container(&node) {
            match node.first_child() {
                Some(child) => Some((child, true)),
                None => Some((node, false)),
            }
        } else if node == self.root {
            None
        } else if let Some(sibling) = node.next_sibling() {
            Some((sibling, true))
        } else {
            node.parent().map(|parent| (parent, false))
        };

        Some(WalkEvent { node, entering })
    }
}
