//! Markdown serialization (tree → CommonMark text)
//!
//! The serializer only sees the tree, never the source, so everything the
//! parser needs to rebuild the same tree has to be reconstructed from node
//! attributes:
//!
//! - Lists keep a stack of [`ListState`]s. Each item writes its marker and
//!   pushes a continuation prefix as wide as the item padding, so nested
//!   content is indented by the sum of the paddings of all enclosing items.
//! - Paragraphs directly inside the items of a tight list are elided, and
//!   blocks in such items never leave blank lines behind them; a blank line
//!   there would make the list loose when re-parsed.
//! - Setext headings are underlined with one `=`/`-` per character of the
//!   heading's text nodes.
//! - With [`LinkStyle::Reference`] link destinations are collected while
//!   rendering and written as a numbered table once the document closes.
//!
//! Blank lines are requested, not written: see [`Output::newline`].

use super::escape::{
    code_fence, code_span, escape_closing_hashes, escape_text, link_destination, link_title,
};
use super::options::{LinkStyle, MarkdownOptions};
use crate::ast::{LinkData, ListData, NodeKind, NodeRef, NodeValue, Tree};
use crate::common::links::LinkCollector;
use crate::error::RenderError;
use crate::render::{drive, HandlerTable, Output, Renderer};
use tracing::debug;

/// Serialize a tree to markdown with default options.
pub fn serialize_to_markdown(tree: &Tree) -> Result<String, RenderError> {
    MarkdownRenderer::default().render(tree)
}

#[derive(Debug, Clone)]
struct ListState {
    data: ListData,
    counter: usize,
}

/// Transient state of one markdown render.
#[derive(Debug, Clone)]
pub struct MarkdownState {
    options: MarkdownOptions,
    lists: Vec<ListState>,
    links: LinkCollector,
}

impl MarkdownState {
    pub fn new(options: MarkdownOptions) -> Self {
        MarkdownState {
            options,
            lists: Vec::new(),
            links: LinkCollector::new(),
        }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// An output buffer configured for these options.
    pub fn output(&self) -> Output {
        Output::new(self.options.line_terminator.clone())
            .with_max_blank_lines(self.options.max_blank_lines.max(1))
    }
}

pub struct MarkdownRenderer {
    options: MarkdownOptions,
    handlers: HandlerTable<MarkdownState>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        MarkdownRenderer {
            options,
            handlers: handlers(),
        }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, tree: &Tree) -> Result<String, RenderError> {
        let mut state = MarkdownState::new(self.options.clone());
        let mut out = state.output();
        drive(tree.root(), &mut out, |out, node, entering| {
            self.handlers.dispatch(&mut state, out, node, entering)
        })?;

        let trailing_blank = tree
            .root()
            .last_child()
            .map_or(false, |last| last.last_line_blank());
        let markdown = out.finish(trailing_blank);
        debug!(
            nodes = tree.len(),
            bytes = markdown.len(),
            "rendered markdown"
        );
        Ok(markdown)
    }
}

/// The markdown handler table. Other renderers reuse it for the kinds they
/// keep as markdown.
pub fn handlers() -> HandlerTable<MarkdownState> {
    HandlerTable::new()
        .on(NodeKind::Document, document)
        .on(NodeKind::Heading, heading)
        .on(NodeKind::Paragraph, paragraph)
        .on(NodeKind::Text, text)
        .on(NodeKind::Emphasis, emphasis)
        .on(NodeKind::Strong, strong)
        .on(NodeKind::Link, link)
        .on(NodeKind::Image, image)
        .on(NodeKind::Code, code)
        .on(NodeKind::CodeBlock, code_block)
        .on(NodeKind::ThematicBreak, thematic_break)
        .on(NodeKind::BlockQuote, block_quote)
        .on(NodeKind::List, list)
        .on(NodeKind::Item, item)
        .on(NodeKind::HtmlBlock, html_block)
        .on(NodeKind::HtmlInline, html_inline)
        .on(NodeKind::CustomBlock, custom_block)
        .on(NodeKind::CustomInline, custom_inline)
        .on(NodeKind::SoftBreak, soft_break)
        .on(NodeKind::LineBreak, line_break)
}

type HandlerResult = Result<(), RenderError>;

fn list_is_tight(list: NodeRef<'_>) -> bool {
    matches!(list.value(), NodeValue::List(data) if data.tight)
}

/// Whether `node` sits directly inside an item of a tight list.
fn in_tight_item(node: NodeRef<'_>) -> bool {
    node.parent().map_or(false, |parent| {
        parent.is(NodeKind::Item) && parent.parent().map_or(false, list_is_tight)
    })
}

/// Close a block: one blank line after it, none inside tight list items.
fn end_block(out: &mut Output, node: NodeRef<'_>) {
    if in_tight_item(node) {
        out.newline(1);
        out.discard_pending();
    } else {
        out.newline(2);
    }
}

/// Whether `node` starts on the line right after a paragraph, as blocks
/// following an elided paragraph in a tight item do.
fn follows_open_paragraph(node: NodeRef<'_>) -> bool {
    in_tight_item(node)
        && node
            .prev_sibling()
            .map_or(false, |prev| prev.is(NodeKind::Paragraph))
}

/// Setext headings are limited to levels 1 and 2. A hard break forces one,
/// since an ATX heading is a single line. Inside a tight item any earlier
/// block ends on the line above, and a paragraph there (possibly nested in
/// a sublist) would be claimed by the underline, so ATX is used instead.
fn uses_setext(state: &MarkdownState, node: NodeRef<'_>) -> bool {
    let NodeValue::Heading(heading) = node.value() else {
        return false;
    };
    let shares_lines = in_tight_item(node) && node.prev_sibling().is_some();
    if heading.level > 2 || node.first_child().is_none() || shares_lines {
        return false;
    }
    state.options.use_setext_headings
        || node
            .walker()
            .any(|event| event.node.is(NodeKind::LineBreak))
}

fn heading_width(node: NodeRef<'_>) -> usize {
    node.walker()
        .filter_map(|event| match event.node.value() {
            NodeValue::Text(literal) => Some(literal.chars().count()),
            _ => None,
        })
        .sum()
}

fn document(
    state: &mut MarkdownState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering || state.links.is_empty() {
        return Ok(());
    }
    out.newline(2);
    for (number, link) in state.links.iter() {
        out.emit(&format!("[{number}]: {}", link_target(link)));
        out.newline(1);
    }
    Ok(())
}

fn link_target(link: &LinkData) -> String {
    let mut target = link_destination(&link.destination);
    if let Some(title) = link.title.as_deref() {
        target.push(' ');
        target.push_str(&link_title(title));
    }
    target
}

fn heading(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    let NodeValue::Heading(data) = node.value() else {
        return Ok(());
    };
    let setext = uses_setext(state, node);
    if entering {
        out.ensure_line_start();
        if !setext {
            out.emit(&"#".repeat(data.level as usize));
            out.emit(" ");
        }
    } else {
        if setext {
            let underline = if data.level == 1 { "=" } else { "-" };
            out.ensure_line_start();
            out.emit(&underline.repeat(heading_width(node).max(1)));
        }
        end_block(out, node);
    }
    Ok(())
}

fn paragraph(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    // Paragraphs in tight items are written without surrounding blank
    // lines.
    let elided = node.grandparent().map_or(false, list_is_tight)
        && node.parent().map_or(false, |parent| parent.is(NodeKind::Item));
    if entering || elided {
        out.ensure_line_start();
    } else {
        end_block(out, node);
    }
    Ok(())
}

fn text(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let literal = node.literal().unwrap_or_default();
    if !state.options.escape_text {
        out.emit(literal);
        return Ok(());
    }
    let mut escaped = escape_text(literal, out.at_line_start());
    let next = node.next_sibling();
    if next.map_or(false, |next| next.is(NodeKind::Link)) && escaped.ends_with('!') {
        escaped.insert(escaped.len() - 1, '\\');
    }
    let ends_atx_heading = next.is_none()
        && node
            .parent()
            .map_or(false, |parent| parent.is(NodeKind::Heading) && !uses_setext(state, parent));
    if ends_atx_heading {
        escape_closing_hashes(&mut escaped, out.ends_with_whitespace());
    }
    out.emit(&escaped);
    Ok(())
}

fn emphasis(
    state: &mut MarkdownState,
    out: &mut Output,
    _node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.emit(&state.options.emphasis_marker);
    Ok(())
}

fn strong(
    state: &mut MarkdownState,
    out: &mut Output,
    _node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.emit(&state.options.strong_marker);
    Ok(())
}

fn link(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    let NodeValue::Link(data) = node.value() else {
        return Ok(());
    };
    let reference = state.options.link_style == LinkStyle::Reference;
    if entering {
        if reference {
            state.links.add(data);
        }
        out.emit("[");
    } else if reference {
        let number = state.links.add(data);
        out.emit(&format!("][{number}]"));
    } else {
        out.emit(&format!("]({})", link_target(data)));
    }
    Ok(())
}

fn image(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    let NodeValue::Image(data) = node.value() else {
        return Ok(());
    };
    if entering {
        out.emit("![");
    } else {
        out.emit(&format!("]({})", link_target(data)));
    }
    Ok(())
}

fn code(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.emit(&code_span(node.literal().unwrap_or_default()));
    Ok(())
}

fn code_block(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let NodeValue::CodeBlock(block) = node.value() else {
        return Ok(());
    };
    let fence = code_fence(&block.literal, &block.info);
    out.ensure_line_start();
    out.emit(&fence);
    out.emit(&block.info);
    out.ensure_line_start();
    out.emit(&block.literal);
    out.ensure_line_start();
    out.emit(&fence);
    end_block(out, node);
    Ok(())
}

fn thematic_break(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let marker = state.options.thematic_break_marker.as_str();
    let underline_like = marker.chars().all(|c| matches!(c, '-' | ' ' | '\t'));
    out.ensure_line_start();
    if underline_like && follows_open_paragraph(node) {
        out.emit("***");
    } else {
        out.emit(marker);
    }
    end_block(out, node);
    Ok(())
}

fn block_quote(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering {
        out.ensure_line_start();
        out.push_prefix("> ");
    } else {
        out.pop_prefix();
        end_block(out, node);
    }
    Ok(())
}

fn list(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    let NodeValue::List(data) = node.value() else {
        return Ok(());
    };
    if entering {
        out.ensure_line_start();
        state.lists.push(ListState {
            data: data.clone(),
            counter: data.start,
        });
        return Ok(());
    }

    state.lists.pop();
    out.ensure_line_start();
    // Back-to-back lists are only produced when their markers differ, so
    // they stay apart without a blank line.
    let followed_by_block = node
        .next_sibling()
        .map_or(false, |next| !next.is(NodeKind::List));
    if followed_by_block {
        end_block(out, node);
    }
    Ok(())
}

fn bullet(data: &ListData) -> char {
    match data.bullet_char {
        c @ ('*' | '-' | '+') => c,
        _ => '*',
    }
}

fn item(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if !entering {
        let tight = node.parent().map_or(false, list_is_tight);
        out.ensure_line_start();
        if tight {
            out.discard_pending();
        }
        out.pop_prefix();
        // A nested tight list may have dropped the blank line this item owes
        if !tight && node.next_sibling().is_some() {
            out.newline(2);
        }
        return Ok(());
    }

    let padding = match node.value() {
        NodeValue::Item(data) => data.padding,
        _ => 0,
    };
    let marker = match state.lists.last_mut() {
        Some(list) if list.data.is_ordered() => {
            let marker = format!("{}{}", list.counter, list.data.delimiter.as_char());
            list.counter += 1;
            marker
        }
        Some(list) => bullet(&list.data).to_string(),
        None => "*".to_string(),
    };
    let width = padding.max(marker.chars().count() + 1);

    out.ensure_line_start();
    out.push_marker_prefix(format!("{marker:<width$}"), " ".repeat(width));
    Ok(())
}

fn html_block(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.ensure_line_start();
    out.emit(node.literal().unwrap_or_default().trim_end_matches('\n'));
    end_block(out, node);
    Ok(())
}

fn html_inline(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    out.emit(node.literal().unwrap_or_default());
    Ok(())
}

fn custom_markup(node: NodeRef<'_>, entering: bool) -> Option<&str> {
    let custom = match node.value() {
        NodeValue::CustomBlock(custom) | NodeValue::CustomInline(custom) => custom,
        _ => return None,
    };
    if entering {
        custom.on_enter.as_deref()
    } else {
        custom.on_exit.as_deref()
    }
}

fn custom_block(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering {
        out.ensure_line_start();
    }
    if let Some(markup) = custom_markup(node, entering) {
        out.emit(markup);
    }
    let has_markup = custom_markup(node, true).is_some() || custom_markup(node, false).is_some();
    if !entering && has_markup {
        end_block(out, node);
    }
    Ok(())
}

fn custom_inline(
    _state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if let Some(markup) = custom_markup(node, entering) {
        out.emit(markup);
    }
    Ok(())
}

/// Whether the closest block ancestor is a heading written in ATX style.
fn in_atx_heading(state: &MarkdownState, node: NodeRef<'_>) -> bool {
    node.ancestors()
        .find(|ancestor| ancestor.kind().map_or(true, NodeKind::is_block))
        .map_or(false, |block| block.is(NodeKind::Heading) && !uses_setext(state, block))
}

fn soft_break(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    if in_atx_heading(state, node) {
        out.emit(" ");
    } else {
        out.newline(1);
    }
    Ok(())
}

fn line_break(
    state: &mut MarkdownState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    if in_atx_heading(state, node) {
        out.emit(" ");
    } else {
        out.emit(&state.options.hard_break_marker);
        out.newline(1);
    }
    Ok(())
}
