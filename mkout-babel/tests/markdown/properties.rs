//! Property tests: determinism, round trips and link tables.

use crate::common::{parse, shape};
use mkout_babel::ast::{LinkData, NodeValue, Tree};
use mkout_babel::formats::markdown::MarkdownRenderer;
use mkout_babel::formats::{LinkStyle, MarkdownOptions};
use mkout_babel::Renderer;
use proptest::prelude::*;

fn markdown_source() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        Just("# Title".to_string()),
        Just("* item".to_string()),
        Just("1. first".to_string()),
        Just("> quote".to_string()),
        Just("```".to_string()),
        Just("---".to_string()),
        Just(String::new()),
        "[a-z *_`\\[\\]()!#]{0,20}",
    ];
    prop::collection::vec(line, 0..12).prop_map(|lines| lines.join("\n"))
}

/// Block lines whose combinations stress list tightness, fences, escapes
/// and heading styles.
const BLOCK_LINES: &[&str] = &[
    "# Title",
    "## Sub",
    "# foo \\#",
    "* item",
    "- foo",
    "- - a",
    "  ***",
    "  # bar",
    "1. first",
    "> quote",
    "```",
    "~~~",
    "\\~~~",
    "---",
    "",
];

fn round_trip_source() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        3 => prop::sample::select(BLOCK_LINES).prop_map(str::to_string),
        1 => "[a-z]{1,6}( [a-z]{1,6}){0,2}",
    ];
    prop::collection::vec(line, 0..10).prop_map(|lines| lines.join("\n"))
}

fn assert_same_shape(renderer: &MarkdownRenderer, source: &str) -> Result<(), TestCaseError> {
    let tree = parse(source);
    let rendered = renderer.render(&tree).unwrap();
    prop_assert_eq!(
        shape(&parse(&rendered)),
        shape(&tree),
        "source {:?} rendered as {:?}",
        source,
        rendered
    );
    Ok(())
}

proptest! {
    #[test]
    fn rendering_keeps_the_shape(source in round_trip_source()) {
        assert_same_shape(&MarkdownRenderer::default(), &source)?;
    }

    #[test]
    fn setext_rendering_keeps_the_shape(source in round_trip_source()) {
        let renderer = MarkdownRenderer::new(MarkdownOptions {
            use_setext_headings: true,
            ..MarkdownOptions::default()
        });
        assert_same_shape(&renderer, &source)?;
    }

    #[test]
    fn rendering_is_deterministic(source in markdown_source()) {
        let tree = parse(&source);
        let renderer = MarkdownRenderer::default();
        let first = renderer.render(&tree).unwrap();
        let second = renderer.render(&tree).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, mkout_babel::to_markdown(&parse(&source)).unwrap());
    }

    #[test]
    fn reference_table_lists_each_destination_once(
        picks in prop::collection::vec(0usize..4, 1..10)
    ) {
        let destinations = ["http://a.com", "http://b.com", "http://c.com", "http://d.com"];
        let mut tree = Tree::new();
        let root = tree.root_id();
        let paragraph = tree.append(root, NodeValue::Paragraph).unwrap();
        for pick in &picks {
            let link = tree
                .append(paragraph, NodeValue::Link(LinkData::new(destinations[*pick])))
                .unwrap();
            tree.append_text(link, "x").unwrap();
        }

        let renderer = MarkdownRenderer::new(MarkdownOptions {
            link_style: LinkStyle::Reference,
            ..MarkdownOptions::default()
        });
        let rendered = renderer.render(&tree).unwrap();

        let mut seen: Vec<&str> = Vec::new();
        for pick in &picks {
            if !seen.contains(&destinations[*pick]) {
                seen.push(destinations[*pick]);
            }
        }
        let table: Vec<String> = rendered
            .lines()
            .filter(|line| line.starts_with('[') && line.contains("]: "))
            .map(str::to_string)
            .collect();
        let expected: Vec<String> = seen
            .iter()
            .enumerate()
            .map(|(index, destination)| format!("[{}]: {destination}", index + 1))
            .collect();
        prop_assert_eq!(table, expected);
    }
}
