//! Exact markdown for constructs where the layout is a decision of the
//! serializer rather than a copy of the source.

use crate::common::parse;
use insta::assert_snapshot;
use mkout_babel::formats::json::parse_from_json;
use mkout_babel::formats::markdown::MarkdownRenderer;
use mkout_babel::formats::{LinkStyle, MarkdownOptions};
use mkout_babel::{RenderError, Renderer};

fn render_with(source: &str, options: MarkdownOptions) -> String {
    MarkdownRenderer::new(options)
        .render(&parse(source))
        .expect("tree to render")
}

#[test]
fn test_nested_lists_indent_by_padding_sum() {
    let rendered = mkout_babel::to_markdown(&parse("1. one\n   - two\n     - three\n")).unwrap();
    assert_snapshot!(rendered, @r###"
    1. one
       - two
         - three
    "###);
}

#[test]
fn test_wide_markers_keep_their_padding() {
    let rendered =
        mkout_babel::to_markdown(&parse("10. ten\n11. eleven\n    * inner\n")).unwrap();
    assert_eq!(rendered, "10. ten\n11. eleven\n    * inner\n");
}

#[test]
fn test_reference_links_share_numbers() {
    let options = MarkdownOptions {
        link_style: LinkStyle::Reference,
        ..MarkdownOptions::default()
    };
    let rendered = render_with(
        "[a](http://a.com) and [b](http://a.com \"T\") and [c](http://c.com \"C\")\n",
        options,
    );
    assert_snapshot!(rendered, @r###"
    [a][1] and [b][1] and [c][2]

    [1]: http://a.com
    [2]: http://c.com "C"
    "###);
}

#[test]
fn test_setext_heading_joins_soft_breaks() {
    let options = MarkdownOptions {
        use_setext_headings: true,
        ..MarkdownOptions::default()
    };
    let rendered = render_with("Heading\nthat spans\nmultiple lines\n===\n", options);
    assert_eq!(
        rendered,
        format!("Heading\nthat spans\nmultiple lines\n{}\n", "=".repeat(31))
    );
}

#[test]
fn test_setext_only_for_two_levels() {
    let options = MarkdownOptions {
        use_setext_headings: true,
        ..MarkdownOptions::default()
    };
    let rendered = render_with("# One\n\n## Two\n\n### Three\n", options);
    assert_eq!(rendered, "One\n===\n\nTwo\n---\n\n### Three\n");
}

#[test]
fn test_markers_are_configurable() {
    let options = MarkdownOptions {
        emphasis_marker: "_".to_string(),
        strong_marker: "__".to_string(),
        thematic_break_marker: "***".to_string(),
        ..MarkdownOptions::default()
    };
    let rendered = render_with("*a* **b**\n\n---\n", options);
    assert_eq!(rendered, "_a_ __b__\n\n***\n");
}

#[test]
fn test_escaping_can_be_disabled() {
    let source = "a \\* b\n";
    assert_eq!(mkout_babel::to_markdown(&parse(source)).unwrap(), source);

    let options = MarkdownOptions {
        escape_text: false,
        ..MarkdownOptions::default()
    };
    assert_eq!(render_with(source, options), "a * b\n");
}

#[test]
fn test_block_quote_prefixes_blank_lines() {
    let rendered = mkout_babel::to_markdown(&parse("> one\n>\n> two\n")).unwrap();
    assert_eq!(rendered, "> one\n>\n> two\n");
}

#[test]
fn test_tight_item_with_two_blocks() {
    let rendered = mkout_babel::to_markdown(&parse("* item\n  > quoted\n* next\n")).unwrap();
    assert_eq!(rendered, "* item\n  > quoted\n* next\n");
}

#[test]
fn test_unknown_kind_is_fatal() {
    let tree = parse_from_json(
        r#"{"type":"document","children":[
            {"type":"paragraph","children":[{"type":"text","literal":"before"}]},
            {"type":"table"}
        ]}"#,
    )
    .unwrap();
    assert_eq!(
        mkout_babel::to_markdown(&tree),
        Err(RenderError::UnknownNodeKind("table".to_string()))
    );
}
