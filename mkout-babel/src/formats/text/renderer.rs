//! Plain text rendering
//!
//! Paragraphs, lists and items are always written as markdown, and so is
//! every kind in [`TextOptions::preserve`]: those events are forwarded to
//! the markdown handler table with the markdown part of the state. All
//! other markup is dropped.

use super::options::TextOptions;
use crate::ast::{NodeKind, NodeRef, NodeValue, Tree};
use crate::common::links::LinkCollector;
use crate::common::normalize::normalize_html;
use crate::error::RenderError;
use crate::formats::markdown::{serializer, MarkdownOptions, MarkdownState};
use crate::render::{drive, HandlerTable, Output, Renderer};
use tracing::debug;

pub struct TextState {
    markdown: MarkdownState,
    options: TextOptions,
    links: LinkCollector,
}

pub struct TextRenderer {
    options: TextOptions,
    markdown_options: MarkdownOptions,
    handlers: HandlerTable<TextState>,
    markdown: HandlerTable<MarkdownState>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(TextOptions::default())
    }
}

impl TextRenderer {
    pub fn new(options: TextOptions) -> Self {
        TextRenderer {
            options,
            markdown_options: MarkdownOptions::default(),
            handlers: handlers(),
            markdown: serializer::handlers(),
        }
    }

    /// Options used for the kinds written as markdown.
    pub fn with_markdown_options(mut self, options: MarkdownOptions) -> Self {
        self.markdown_options = options;
        self
    }

    fn writes_markdown(&self, kind: NodeKind) -> bool {
        matches!(kind, NodeKind::Paragraph | NodeKind::List | NodeKind::Item)
            || self.options.preserves(kind)
            || (kind == NodeKind::Link && !self.options.autolink)
    }
}

impl Renderer for TextRenderer {
    fn render(&self, tree: &Tree) -> Result<String, RenderError> {
        let mut state = TextState {
            markdown: MarkdownState::new(self.markdown_options.clone()),
            options: self.options.clone(),
            links: LinkCollector::new(),
        };
        let mut out = state.markdown.output();
        drive(tree.root(), &mut out, |out, node, entering| match node.kind() {
            Some(kind) if self.writes_markdown(kind) => {
                self.markdown
                    .dispatch(&mut state.markdown, out, node, entering)
            }
            _ => self.handlers.dispatch(&mut state, out, node, entering),
        })?;

        let text = out.finish(true);
        debug!(nodes = tree.len(), bytes = text.len(), "rendered text");
        Ok(text)
    }
}

fn handlers() -> HandlerTable<TextState> {
    HandlerTable::with_defaults()
        .on(NodeKind::Document, document)
        .on(NodeKind::Heading, heading)
        .on(NodeKind::Text, text)
        .on(NodeKind::Link, link)
        .on(NodeKind::Code, code)
        .on(NodeKind::CodeBlock, code_block)
        .on(NodeKind::ThematicBreak, thematic_break)
        .on(NodeKind::BlockQuote, block_quote)
        .on(NodeKind::HtmlBlock, html_block)
        .on(NodeKind::HtmlInline, html_inline)
        .on(NodeKind::SoftBreak, soft_break)
        .on(NodeKind::LineBreak, line_break)
}

type HandlerResult = Result<(), RenderError>;

fn document(
    state: &mut TextState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering || state.links.is_empty() {
        return Ok(());
    }
    out.newline(2);
    for (number, link) in state.links.iter() {
        out.emit(&format!("[{number}]: {}", link.destination));
        out.newline(1);
    }
    Ok(())
}

fn heading(
    _state: &mut TextState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering {
        out.ensure_line_start();
    } else {
        out.newline(2);
    }
    Ok(())
}

fn text(
    state: &mut TextState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let literal = node.literal().unwrap_or_default();
    let numbered = state.options.autolink && !state.options.preserves(NodeKind::Link);
    let number = if numbered {
        node.ancestors()
            .find_map(|ancestor| match ancestor.value() {
                NodeValue::Link(link) => state.links.number_of(&link.destination),
                _ => None,
            })
    } else {
        None
    };
    match number {
        Some(number) => out.emit(&format!("{literal}[{number}]")),
        None => out.emit(literal),
    }
    Ok(())
}

fn link(
    state: &mut TextState,
    _out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if let (true, NodeValue::Link(data)) = (entering, node.value()) {
        state.links.add(data);
    }
    Ok(())
}

fn code(
    _state: &mut TextState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.emit(node.literal().unwrap_or_default());
    Ok(())
}

fn code_block(
    state: &mut TextState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.ensure_line_start();
    out.push_prefix(state.options.indent.clone());
    out.emit(node.literal().unwrap_or_default());
    out.ensure_line_start();
    out.pop_prefix();
    out.newline(2);
    Ok(())
}

fn thematic_break(
    state: &mut TextState,
    out: &mut Output,
    _node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.ensure_line_start();
    out.emit(&state.options.hr);
    out.newline(2);
    Ok(())
}

fn block_quote(
    state: &mut TextState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering {
        out.ensure_line_start();
        out.push_prefix(format!("{}{} ", state.options.indent, state.options.quote));
    } else {
        out.pop_prefix();
        out.newline(2);
    }
    Ok(())
}

fn html_block(
    _state: &mut TextState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.ensure_line_start();
    out.emit(&normalize_html(node.literal().unwrap_or_default()));
    out.newline(2);
    Ok(())
}

fn html_inline(
    _state: &mut TextState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.emit(&normalize_html(node.literal().unwrap_or_default()));
    Ok(())
}

fn soft_break(
    _state: &mut TextState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let quoted = node
        .grandparent()
        .map_or(false, |grandparent| grandparent.is(NodeKind::BlockQuote));
    if quoted {
        out.newline(1);
    } else if !out.ends_with_whitespace() {
        out.emit(" ");
    }
    Ok(())
}

fn line_break(
    _state: &mut TextState,
    out: &mut Output,
    _node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.newline(1);
    Ok(())
}
