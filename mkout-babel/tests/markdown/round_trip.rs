//! Rendering a parsed document and parsing it again keeps its shape.

use crate::common::{assert_round_trip, parse, shape};
use mkout_babel::formats::markdown::MarkdownRenderer;
use mkout_babel::formats::MarkdownOptions;
use mkout_babel::Renderer;

/// Sources whose rendering starts with the source itself.
const VERBATIM: &[&str] = &[
    "# Heading (1)",
    "###### Heading (6)",
    "Some paragraph text.",
    "[Commonmark](http://commonmark.org)",
    "[Commonmark](http://commonmark.org \"Commonmark\")",
    "![Commonmark](http://commonmark.org/images/markdown-mark.png)",
    "![Commonmark](http://commonmark.org/images/markdown-mark.png \"Markdown\")",
    "<p>foo</p>",
    "<em>foo</em>",
    "foo\nbar",
    "`code`",
    "**strong**",
    "*emph*",
    "---",
    "```javascript foo bar\nfunction(){}\n```",
    "* foo\n* bar\n",
    "1. foo\n2. bar\n",
    "> foo",
    "<component>\nfoo\n</component>",
];

#[test]
fn test_verbatim_sources() {
    for source in VERBATIM {
        let rendered = assert_round_trip(source);
        assert!(
            rendered.starts_with(source),
            "expected output to start with {source:?}, got {rendered:?}"
        );
    }
}

#[test]
fn test_hard_break_with_space_marker() {
    let source = "foo  \nbar\n";
    let renderer = MarkdownRenderer::new(MarkdownOptions {
        hard_break_marker: "  ".to_string(),
        ..MarkdownOptions::default()
    });
    let rendered = renderer.render(&parse(source)).unwrap();
    assert!(rendered.starts_with(source), "got {rendered:?}");
}

#[test]
fn test_hard_break_with_default_marker() {
    let rendered = assert_round_trip("foo  \nbar\n");
    assert_eq!(rendered, "foo\\\nbar\n");
}

#[test]
fn test_structural_corpus() {
    let corpus = [
        "- a\n\n  b\n- c\n",
        "* one\n  * two\n    * three\n",
        "1. first\n\n   ```\n   code\n   ```\n2. second\n",
        "1) paren\n2) list\n",
        "7. late start\n8. next\n",
        "+ plus\n+ bullets\n",
        "Setext\n======\n\nPara\n",
        "Text with \\*stars\\* and \\_under\\_ and \\[brackets\\]\n",
        "1986\\. A great year\n",
        "\\# not a heading\n",
        "\\- not a list\n",
        "> quote\n>\n> * item\n",
        "> outer\n>\n> > inner\n",
        "Line with `` a ` tick `` here\n",
        "    indented code\n",
        "A [link *with* markup](/url) and ![img](/i.png).\n",
        "Entity-like &amp; text\n",
        "<div>\nblock\n</div>\n\nafter\n",
        "- [ ] not a task list, just brackets\n",
        "- foo\n  ***\n",
        "\\~~~\n",
        "foo\n\\~~~ bar\n",
        "# foo \\#\n",
        "# \\#\n",
        "a\\\nb\n===\n",
        "- - a\n\n- - b\n",
        "- - a\n  ***\n",
    ];
    for source in corpus {
        assert_round_trip(source);
    }
}

#[test]
fn test_blocks_after_elided_paragraphs() {
    let setext = MarkdownRenderer::new(MarkdownOptions {
        use_setext_headings: true,
        ..MarkdownOptions::default()
    });
    for source in ["- foo\n  # bar\n", "- - a\n  # bar\n", "- foo\n  ***\n"] {
        let tree = parse(source);
        let rendered = setext.render(&tree).unwrap();
        assert_eq!(
            shape(&parse(&rendered)),
            shape(&tree),
            "source {source:?} rendered as {rendered:?}"
        );
    }
    assert_eq!(
        setext.render(&parse("- foo\n  # bar\n")).unwrap(),
        "- foo\n  # bar\n"
    );
    assert_eq!(
        mkout_babel::to_markdown(&parse("- foo\n  ***\n")).unwrap(),
        "- foo\n  ***\n"
    );
}

#[test]
fn test_hard_break_in_heading_keeps_setext() {
    let rendered = assert_round_trip("a\\\nb\n===\n");
    assert_eq!(rendered, "a\\\nb\n==\n");
}

#[test]
fn test_loose_list_around_tight_sublists() {
    let rendered = assert_round_trip("- - a\n\n- - b\n");
    assert_eq!(rendered, "- - a\n\n- - b\n");
}

#[test]
fn test_escapes_that_keep_blocks_apart() {
    assert_eq!(assert_round_trip("\\~~~\n"), "\\~~~\n");
    assert_eq!(assert_round_trip("# foo \\#\n"), "# foo \\#\n");
}

#[test]
fn test_tour_fixture() {
    assert_round_trip(include_str!("../fixtures/commonmark-tour.md"));
}

#[test]
fn test_code_fence_fixture() {
    let source = include_str!("../fixtures/code-fences.md");
    let rendered = assert_round_trip(source);
    assert!(rendered.contains("````markdown\n```rust\n"));
    assert!(rendered.contains("```\n~~~\nnot a fence here\n~~~\n```\n"));
}

#[test]
fn test_rendering_is_stable() {
    // A second pass over rendered output changes nothing.
    let source = include_str!("../fixtures/commonmark-tour.md");
    let once = mkout_babel::to_markdown(&parse(source)).unwrap();
    let twice = mkout_babel::to_markdown(&parse(&once)).unwrap();
    assert_eq!(once, twice);
    assert_eq!(shape(&parse(&once)), shape(&parse(&twice)));
}
