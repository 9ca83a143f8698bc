//! Plain text format tests

use crate::common::parse;
use mkout_babel::ast::{CustomData, NodeValue, Tree};
use mkout_babel::format::Format;
use mkout_babel::formats::text::TextRenderer;
use mkout_babel::formats::{MarkdownOptions, TextFormat, TextOptions};
use mkout_babel::{NodeKind, Renderer};
use std::collections::HashMap;

fn render(source: &str) -> String {
    TextRenderer::default().render(&parse(source)).unwrap()
}

fn render_preserving(source: &str, kinds: &[NodeKind]) -> String {
    let renderer = TextRenderer::new(TextOptions {
        preserve: kinds.to_vec(),
        ..TextOptions::default()
    });
    renderer.render(&parse(source)).unwrap()
}

fn assert_starts_with(output: &str, prefix: &str) {
    assert!(
        output.starts_with(prefix),
        "expected output to start with {prefix:?}, got {output:?}"
    );
}

fn custom(on_enter: &str, on_exit: &str) -> CustomData {
    CustomData {
        on_enter: Some(on_enter.to_string()),
        on_exit: Some(on_exit.to_string()),
    }
}

#[test]
fn test_heading() {
    assert_eq!(render("# Heading (1)"), "Heading (1)\n\n");
    assert_starts_with(
        &render_preserving("# Heading (1)", &[NodeKind::Heading]),
        "# Heading (1)",
    );
}

#[test]
fn test_autolinks() {
    assert_eq!(
        render("[Commonmark](http://commonmark.org)"),
        "Commonmark[1]\n\n[1]: http://commonmark.org\n"
    );
}

#[test]
fn test_duplicate_autolinks() {
    assert_eq!(
        render("[Commonmark](http://commonmark.org) [Commonmark](http://commonmark.org)"),
        "Commonmark[1] Commonmark[1]\n\n[1]: http://commonmark.org\n"
    );
}

#[test]
fn test_links_kept_as_markdown() {
    let source = "[Commonmark](http://commonmark.org)";
    assert_starts_with(&render_preserving(source, &[NodeKind::Link]), source);

    let renderer = TextRenderer::new(TextOptions {
        autolink: false,
        ..TextOptions::default()
    });
    let output = renderer.render(&parse(source)).unwrap();
    assert_starts_with(&output, source);
    assert!(!output.contains("[1]:"));
}

#[test]
fn test_soft_breaks() {
    assert_eq!(render("foo\nbar"), "foo bar\n\n");
    assert_eq!(render("foo \nbar"), "foo bar\n\n");
    assert_starts_with(
        &render_preserving("foo\nbar", &[NodeKind::SoftBreak]),
        "foo\nbar",
    );
}

#[test]
fn test_line_breaks() {
    assert_eq!(render("foo  \nbar\n"), "foo\nbar\n\n");

    let renderer = TextRenderer::new(TextOptions {
        preserve: vec![NodeKind::LineBreak],
        ..TextOptions::default()
    })
    .with_markdown_options(MarkdownOptions {
        hard_break_marker: "  ".to_string(),
        ..MarkdownOptions::default()
    });
    assert_starts_with(&renderer.render(&parse("foo  \nbar\n")).unwrap(), "foo  \nbar\n");
}

#[test]
fn test_paragraph() {
    assert_eq!(render("Text."), "Text.\n\n");
}

#[test]
fn test_images() {
    let source = "![Commonmark](http://commonmark.org/images/markdown-mark.png)";
    assert_eq!(render(source), "Commonmark\n\n");
    assert_starts_with(&render_preserving(source, &[NodeKind::Image]), source);
}

#[test]
fn test_html() {
    assert_eq!(render("<p>foo</p>"), "foo\n\n");
    assert_starts_with(
        &render_preserving("<p>foo</p>", &[NodeKind::HtmlBlock]),
        "<p>foo</p>",
    );
    assert_eq!(render("<em>foo</em>"), "foo\n\n");
    assert_starts_with(
        &render_preserving("<em>foo</em>", &[NodeKind::HtmlInline]),
        "<em>foo</em>",
    );
}

#[test]
fn test_inline_markup() {
    assert_eq!(render("`code`"), "code\n\n");
    assert_eq!(render_preserving("`code`", &[NodeKind::Code]), "`code`\n\n");
    assert_eq!(render("**strong**"), "strong\n\n");
    assert_eq!(
        render_preserving("**strong**", &[NodeKind::Strong]),
        "**strong**\n\n"
    );
    assert_eq!(render("*emph*"), "emph\n\n");
    assert_eq!(render_preserving("*emph*", &[NodeKind::Emphasis]), "*emph*\n\n");
}

#[test]
fn test_thematic_break() {
    assert_eq!(render("---"), format!("{}\n\n", "-".repeat(80)));
    assert_eq!(
        render_preserving("---", &[NodeKind::ThematicBreak]),
        "---\n\n"
    );
}

#[test]
fn test_code_blocks_are_indented() {
    assert_eq!(
        render("```javascript foo bar\nfunction(){}\n```"),
        "    function(){}\n\n"
    );
    assert_eq!(render("```\nCode example\n```\n\n"), "    Code example\n\n");
    let source = "```javascript foo bar\nfunction(){}\n```";
    assert_starts_with(&render_preserving(source, &[NodeKind::CodeBlock]), source);
}

#[test]
fn test_block_quotes_are_indented() {
    assert_eq!(render("> foo"), "    | foo\n\n");
    assert_eq!(render("> foo\n> bar"), "    | foo\n    | bar\n\n");
    assert_starts_with(&render_preserving("> foo", &[NodeKind::BlockQuote]), "> foo");
}

#[test]
fn test_custom_nodes() {
    let mut tree = Tree::new();
    let root = tree.root_id();
    tree.append(root, NodeValue::CustomBlock(custom("<foo>", "</foo>")))
        .unwrap();
    assert_eq!(TextRenderer::default().render(&tree).unwrap(), "");

    let mut tree = Tree::new();
    let root = tree.root_id();
    let paragraph = tree.append(root, NodeValue::Paragraph).unwrap();
    let inline = tree
        .append(paragraph, NodeValue::CustomInline(custom("<foo>", "</foo>")))
        .unwrap();
    tree.append_text(inline, "bar").unwrap();
    assert_eq!(TextRenderer::default().render(&tree).unwrap(), "bar\n\n");

    let renderer = TextRenderer::new(TextOptions {
        preserve: vec![NodeKind::CustomInline],
        ..TextOptions::default()
    });
    assert_eq!(renderer.render(&tree).unwrap(), "<foo>bar</foo>\n\n");
}

#[test]
fn test_format_params() {
    let format = TextFormat::default();
    let tree = parse("*emph* and [a link](http://a.com)");

    let mut params = HashMap::new();
    params.insert("preserve".to_string(), "emph".to_string());
    params.insert("autolink".to_string(), "false".to_string());
    assert_eq!(
        format.serialize_with_options(&tree, &params).unwrap(),
        "*emph* and [a link](http://a.com)\n\n"
    );

    params.insert("autolink".to_string(), "maybe".to_string());
    assert!(format.serialize_with_options(&tree, &params).is_err());
}
