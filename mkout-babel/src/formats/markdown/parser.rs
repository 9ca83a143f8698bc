//! Markdown parsing (Markdown → tree)
//!
//! Comrak does the CommonMark parsing; this module only copies its AST into
//! a [`Tree`]. Item nodes take the tightness of their list, since comrak
//! only tracks it on the list itself.

use crate::ast::{
    CodeBlockData, HeadingData, LinkData, ListData, ListDelimiter, ListType, NodeId, NodeValue,
    Tree,
};
use crate::error::FormatError;
use comrak::nodes::{self, AstNode, NodeList};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a markdown string into a document tree.
pub fn parse_from_markdown(source: &str) -> Result<Tree, FormatError> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let lines: Vec<&str> = source.lines().collect();
    let mut tree = Tree::new();
    let document = tree.root_id();
    for child in root.children() {
        convert(child, &mut tree, document, &lines)?;
    }
    Ok(tree)
}

/// Plain CommonMark; extension nodes have no counterpart in the tree.
fn default_comrak_options() -> ComrakOptions<'static> {
    ComrakOptions::default()
}

fn convert<'a>(
    node: &'a AstNode<'a>,
    tree: &mut Tree,
    parent: NodeId,
    lines: &[&str],
) -> Result<(), FormatError> {
    let (value, end_line) = {
        let ast = node.data.borrow();
        (convert_value(&ast.value, tree, parent), ast.sourcepos.end.line)
    };
    let is_block = value.kind().map_or(true, |kind| kind.is_block());
    let id = tree.append(parent, value)?;
    if is_block && followed_by_blank_line(lines, end_line) {
        tree.set_last_line_blank(id, true)?;
    }

    for child in node.children() {
        convert(child, tree, id, lines)?;
    }
    Ok(())
}

/// `end_line` is 1-based, so it indexes the line after the node.
fn followed_by_blank_line(lines: &[&str], end_line: usize) -> bool {
    lines
        .get(end_line)
        .map_or(false, |line| line.trim().is_empty())
}

fn convert_value(value: &nodes::NodeValue, tree: &Tree, parent: NodeId) -> NodeValue {
    use nodes::NodeValue as Comrak;

    match value {
        Comrak::Document => NodeValue::Document,
        Comrak::BlockQuote => NodeValue::BlockQuote,
        Comrak::List(list) => NodeValue::List(list_data(list)),
        Comrak::Item(item) => {
            let tight = match tree.get(parent).map(|list| list.value()) {
                Some(NodeValue::List(list)) => list.tight,
                _ => item.tight,
            };
            NodeValue::Item(list_data(item).with_tight(tight))
        }
        Comrak::CodeBlock(block) => NodeValue::CodeBlock(CodeBlockData {
            info: block.info.clone(),
            literal: block.literal.clone(),
            fenced: block.fenced,
        }),
        Comrak::HtmlBlock(html) => NodeValue::HtmlBlock(html.literal.clone()),
        Comrak::Paragraph => NodeValue::Paragraph,
        Comrak::Heading(heading) => NodeValue::Heading(HeadingData {
            level: heading.level,
            setext: heading.setext,
        }),
        Comrak::ThematicBreak => NodeValue::ThematicBreak,
        Comrak::Text(text) => NodeValue::Text(text.clone()),
        Comrak::SoftBreak => NodeValue::SoftBreak,
        Comrak::LineBreak => NodeValue::LineBreak,
        Comrak::Code(code) => NodeValue::Code(code.literal.clone()),
        Comrak::HtmlInline(html) => NodeValue::HtmlInline(html.clone()),
        Comrak::Emph => NodeValue::Emphasis,
        Comrak::Strong => NodeValue::Strong,
        Comrak::Link(link) => NodeValue::Link(link_data(link)),
        Comrak::Image(link) => NodeValue::Image(link_data(link)),
        other => NodeValue::Unknown(extension_name(other).to_string()),
    }
}

/// Tag for the comrak nodes that only extensions produce.
fn extension_name(value: &nodes::NodeValue) -> &'static str {
    use nodes::NodeValue as Comrak;

    match value {
        Comrak::FrontMatter(_) => "front_matter",
        Comrak::Table(_) => "table",
        Comrak::TableRow(_) => "table_row",
        Comrak::TableCell => "table_cell",
        Comrak::TaskItem(_) => "task_item",
        Comrak::Strikethrough => "strikethrough",
        Comrak::Superscript => "superscript",
        Comrak::FootnoteDefinition(_) => "footnote_definition",
        Comrak::FootnoteReference(_) => "footnote_reference",
        Comrak::DescriptionList => "description_list",
        Comrak::DescriptionItem(_) => "description_item",
        Comrak::DescriptionTerm => "description_term",
        Comrak::DescriptionDetails => "description_details",
        Comrak::Math(_) => "math",
        Comrak::MultilineBlockQuote(_) => "multiline_block_quote",
        Comrak::WikiLink(_) => "wikilink",
        Comrak::Underline => "underline",
        Comrak::SpoileredText => "spoiler",
        Comrak::Escaped | Comrak::EscapedTag(_) => "escaped",
        _ => "extension",
    }
}

fn list_data(list: &NodeList) -> ListData {
    ListData {
        list_type: match list.list_type {
            nodes::ListType::Bullet => ListType::Bullet,
            nodes::ListType::Ordered => ListType::Ordered,
        },
        start: list.start,
        delimiter: match list.delimiter {
            nodes::ListDelimType::Period => ListDelimiter::Period,
            nodes::ListDelimType::Paren => ListDelimiter::Paren,
        },
        bullet_char: match list.bullet_char {
            0 => '*',
            c => c as char,
        },
        tight: list.tight,
        padding: list.padding,
        marker_offset: list.marker_offset,
    }
}

fn link_data(link: &nodes::NodeLink) -> LinkData {
    let data = LinkData::new(link.url.clone());
    if link.title.is_empty() {
        data
    } else {
        data.with_title(link.title.clone())
    }
}
