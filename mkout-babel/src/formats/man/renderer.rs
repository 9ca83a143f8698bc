//! roff man page rendering
//!
//! Paragraphs use `.PP`, headings `.SH`/`.SS`, list items `.IP` with their
//! marker, block quotes and nested lists `.RS`/`.RE`, code blocks are set
//! in no-fill mode. Text is sanitized so that it can never be read as a
//! request: backslashes become `\e` and a leading `.` or `'` is guarded
//! with `\&`.

use super::ManOptions;
use crate::ast::{ListData, NodeKind, NodeRef, NodeValue, Tree};
use crate::common::normalize::normalize_html;
use crate::error::RenderError;
use crate::render::{drive, HandlerTable, Output, Renderer};
use tracing::debug;

pub struct ManState {
    options: ManOptions,
    lists: Vec<(ListData, usize)>,
}

pub struct ManRenderer {
    options: ManOptions,
    handlers: HandlerTable<ManState>,
}

impl Default for ManRenderer {
    fn default() -> Self {
        Self::new(ManOptions::default())
    }
}

impl ManRenderer {
    pub fn new(options: ManOptions) -> Self {
        ManRenderer {
            options,
            handlers: handlers(),
        }
    }
}

impl Renderer for ManRenderer {
    fn render(&self, tree: &Tree) -> Result<String, RenderError> {
        let mut state = ManState {
            options: self.options.clone(),
            lists: Vec::new(),
        };
        let mut out = Output::default();
        drive(tree.root(), &mut out, |out, node, entering| {
            self.handlers.dispatch(&mut state, out, node, entering)
        })?;

        let man = out.finish(false);
        debug!(nodes = tree.len(), bytes = man.len(), "rendered man page");
        Ok(man)
    }
}

fn handlers() -> HandlerTable<ManState> {
    HandlerTable::with_defaults()
        .on(NodeKind::Document, document)
        .on(NodeKind::Heading, heading)
        .on(NodeKind::Paragraph, paragraph)
        .on(NodeKind::Text, text)
        .on(NodeKind::Emphasis, emphasis)
        .on(NodeKind::Strong, strong)
        .on(NodeKind::Link, link)
        .on(NodeKind::Code, code)
        .on(NodeKind::CodeBlock, code_block)
        .on(NodeKind::ThematicBreak, thematic_break)
        .on(NodeKind::BlockQuote, block_quote)
        .on(NodeKind::List, list)
        .on(NodeKind::Item, item)
        .on(NodeKind::HtmlBlock, html_block)
        .on(NodeKind::HtmlInline, html_inline)
        .on(NodeKind::CustomBlock, custom)
        .on(NodeKind::CustomInline, custom)
        .on(NodeKind::SoftBreak, soft_break)
        .on(NodeKind::LineBreak, line_break)
}

type HandlerResult = Result<(), RenderError>;

/// Escape `text` for roff. `at_line_start` tells whether the text begins
/// an output line.
pub fn sanitize(text: &str, at_line_start: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if (at_line_start || index > 0) && (line.starts_with('.') || line.starts_with('\'')) {
            out.push_str("\\&");
        }
        out.push_str(&line.replace('\\', "\\e"));
    }
    out
}

/// Write a request on a line of its own.
fn request(out: &mut Output, line: &str) {
    out.ensure_line_start();
    out.emit(line);
    out.newline(1);
}

fn quoted_argument(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\e").replace('"', "\\(dq"))
}

fn in_heading(node: NodeRef<'_>) -> bool {
    node.ancestors().any(|ancestor| ancestor.is(NodeKind::Heading))
}

fn document(
    state: &mut ManState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering {
        let preamble = format!(
            ".TH {} {} {}",
            quoted_argument(&state.options.title),
            quoted_argument(&state.options.section),
            quoted_argument(&state.options.date)
        );
        request(out, &preamble);
    }
    Ok(())
}

fn heading(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering {
        let level = match node.value() {
            NodeValue::Heading(heading) => heading.level,
            _ => 1,
        };
        out.ensure_line_start();
        out.emit(if level == 1 { ".SH \"" } else { ".SS \"" });
    } else {
        out.emit("\"");
        out.newline(1);
    }
    Ok(())
}

fn paragraph(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    let in_tight_list = node
        .grandparent()
        .map_or(false, |list| matches!(list.value(), NodeValue::List(data) if data.tight));
    if entering && !in_tight_list {
        request(out, ".PP");
    } else {
        out.ensure_line_start();
    }
    Ok(())
}

fn text(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let literal = node.literal().unwrap_or_default();
    if in_heading(node) {
        out.emit(&literal.replace('\\', "\\e").replace('"', "\\(dq"));
    } else {
        out.emit(&sanitize(literal, out.at_line_start()));
    }
    Ok(())
}

fn emphasis(
    _state: &mut ManState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    out.emit(if entering { "\\fI" } else { "\\fP" });
    Ok(())
}

fn strong(
    _state: &mut ManState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    out.emit(if entering { "\\fB" } else { "\\fP" });
    Ok(())
}

fn link_text(node: NodeRef<'_>) -> String {
    node.walker()
        .filter_map(|event| match event.node.value() {
            NodeValue::Text(literal) | NodeValue::Code(literal) => Some(literal.as_str()),
            _ => None,
        })
        .collect()
}

fn link(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if entering {
        return Ok(());
    }
    if let NodeValue::Link(data) = node.value() {
        if link_text(node) != data.destination {
            out.emit(&format!(" <{}>", sanitize(&data.destination, false)));
        }
    }
    Ok(())
}

fn code(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let literal = node.literal().unwrap_or_default();
    out.emit(&sanitize(&format!("`{literal}`"), out.at_line_start()));
    Ok(())
}

fn code_block(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    request(out, ".PP");
    request(out, ".in +4n");
    request(out, ".nf");
    out.emit(&sanitize(node.literal().unwrap_or_default(), true));
    request(out, ".fi");
    request(out, ".in");
    Ok(())
}

fn thematic_break(
    _state: &mut ManState,
    out: &mut Output,
    _node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    request(out, ".sp");
    request(out, "\\l'\\n(.lu'");
    Ok(())
}

fn block_quote(
    _state: &mut ManState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    request(out, if entering { ".RS 4" } else { ".RE" });
    Ok(())
}

fn list(
    state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    let nested = node.ancestors().any(|ancestor| ancestor.is(NodeKind::Item));
    if entering {
        if let NodeValue::List(data) = node.value() {
            state.lists.push((data.clone(), data.start));
        }
        if nested {
            request(out, ".RS 4");
        }
    } else {
        state.lists.pop();
        if nested {
            request(out, ".RE");
        }
    }
    Ok(())
}

fn item(
    state: &mut ManState,
    out: &mut Output,
    _node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    if !entering {
        out.ensure_line_start();
        return Ok(());
    }
    let marker = match state.lists.last_mut() {
        Some((data, counter)) if data.is_ordered() => {
            let marker = format!("{}{}", counter, data.delimiter.as_char());
            *counter += 1;
            marker
        }
        Some((data, _)) => data.bullet_char.to_string(),
        None => "*".to_string(),
    };
    request(out, &format!(".IP {} 4", quoted_argument(&marker)));
    Ok(())
}

fn html_block(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let text = normalize_html(node.literal().unwrap_or_default());
    if !text.trim().is_empty() {
        out.ensure_line_start();
        out.emit(&sanitize(&text, true));
        out.newline(1);
    }
    Ok(())
}

fn html_inline(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    let text = normalize_html(node.literal().unwrap_or_default());
    out.emit(&sanitize(&text, out.at_line_start()));
    Ok(())
}

fn custom(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> HandlerResult {
    let markup = match node.value() {
        NodeValue::CustomBlock(custom) | NodeValue::CustomInline(custom) => {
            if entering {
                custom.on_enter.as_deref()
            } else {
                custom.on_exit.as_deref()
            }
        }
        _ => None,
    };
    if let Some(markup) = markup {
        out.emit(markup);
    }
    Ok(())
}

fn soft_break(
    _state: &mut ManState,
    out: &mut Output,
    node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    if in_heading(node) {
        out.emit(" ");
    } else {
        out.newline(1);
    }
    Ok(())
}

fn line_break(
    _state: &mut ManState,
    out: &mut Output,
    _node: NodeRef<'_>,
    _entering: bool,
) -> HandlerResult {
    request(out, ".br");
    Ok(())
}
