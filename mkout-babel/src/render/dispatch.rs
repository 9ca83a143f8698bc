//! Kind-to-handler dispatch.

use super::output::Output;
use crate::ast::{NodeKind, NodeRef};
use crate::error::RenderError;
use std::collections::HashMap;

/// Handler invoked for one node, once on enter and once on exit (leaves
/// are only entered).
pub type Handler<S> = fn(&mut S, &mut Output, NodeRef<'_>, bool) -> Result<(), RenderError>;

/// Table mapping every node kind a renderer supports to its handler.
///
/// Renderers build their own table instead of extending another
/// renderer's; one state can embed another and forward to that renderer's
/// table for the kinds it wants to keep.
pub struct HandlerTable<S> {
    handlers: HashMap<NodeKind, Handler<S>>,
}

impl<S> Default for HandlerTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn noop<S>(_: &mut S, _: &mut Output, _: NodeRef<'_>, _: bool) -> Result<(), RenderError> {
    Ok(())
}

impl<S> HandlerTable<S> {
    /// An empty table: every kind is rejected until registered.
    pub fn new() -> Self {
        HandlerTable {
            handlers: HashMap::new(),
        }
    }

    /// A table where every kind is accepted and ignored.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for kind in NodeKind::ALL {
            table.insert(kind, noop::<S>);
        }
        table
    }

    pub fn on(mut self, kind: NodeKind, handler: Handler<S>) -> Self {
        self.insert(kind, handler);
        self
    }

    pub fn insert(&mut self, kind: NodeKind, handler: Handler<S>) -> Option<Handler<S>> {
        self.handlers.insert(kind, handler)
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn dispatch(
        &self,
        state: &mut S,
        out: &mut Output,
        node: NodeRef<'_>,
        entering: bool,
    ) -> Result<(), RenderError> {
        let kind = node
            .kind()
            .ok_or_else(|| RenderError::UnknownNodeKind(node.type_name().to_string()))?;
        let handler = self
            .handlers
            .get(&kind)
            .ok_or_else(|| RenderError::UnknownNodeKind(kind.as_str().to_string()))?;
        handler(state, out, node, entering)
    }
}

/// Walk the subtree at `root`, handing every event to `handle`.
///
/// The first error aborts the traversal and is returned as is.
pub fn drive<F>(root: NodeRef<'_>, out: &mut Output, mut handle: F) -> Result<(), RenderError>
where
    F: FnMut(&mut Output, NodeRef<'_>, bool) -> Result<(), RenderError>,
{
    for event in root.walker() {
        handle(out, event.node, event.entering)?;
    }
    Ok(())
}
