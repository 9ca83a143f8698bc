//! YAML format tests
//!
//! Every dump is loaded back with `serde_yaml`: the document is a sequence
//! whose first entry maps `document` to the sequence of its children.

use crate::common::parse;
use mkout_babel::formats::yaml::YamlRenderer;
use mkout_babel::formats::YamlOptions;
use mkout_babel::Renderer;
use serde_yaml::Value;

const SOURCES: &[&str] = &[
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
    "foo  \nbar\n",
    "`code`",
    "**strong**",
    "*emph*",
    "---",
    "```javascript foo bar\nfunction(){}\n```",
    "```\n\n\n```",
    "```\nit's\n\n  indented\n\n\n```",
    "* foo\n* bar\n",
    "1. foo\n2. bar\n",
    "> foo",
    "Text with 'quotes' and: colons # and hashes",
];

fn load(yaml: &str) -> Value {
    let value: Value = serde_yaml::from_str(yaml)
        .unwrap_or_else(|err| panic!("invalid yaml: {err}\n{yaml}"));
    let first = value
        .as_sequence()
        .and_then(|entries| entries.first())
        .unwrap_or_else(|| panic!("expected a sequence:\n{yaml}"));
    assert!(
        first.get("document").map_or(false, Value::is_sequence),
        "expected a document sequence:\n{yaml}"
    );
    value
}

fn render(source: &str, compact: bool) -> String {
    YamlRenderer::new(YamlOptions { compact })
        .render(&parse(source))
        .unwrap()
}

#[test]
fn test_compact_dumps_load() {
    for source in SOURCES {
        let yaml = render(source, true);
        assert!(yaml.starts_with("---\n- document:\n"));
        assert!(yaml.ends_with("...\n"));
        load(&yaml);
    }
}

#[test]
fn test_full_dumps_load() {
    for source in SOURCES {
        load(&render(source, false));
    }
}

#[test]
fn test_literals_survive_loading() {
    let source = "```\nit's\n\n  indented\n\n\n```";
    let value = load(&render(source, true));
    let block = &value[0]["document"][0]["code_block"];
    assert_eq!(block.as_str(), Some("it's\n\n  indented\n\n\n"));

    let value = load(&render("Text with 'quotes' and: colons", true));
    let text = &value[0]["document"][0]["paragraph"][0]["text"];
    assert_eq!(text.as_str(), Some("Text with 'quotes' and: colons"));
}

#[test]
fn test_full_mode_properties() {
    let value = load(&render("### Third", false));
    let document = &value[0]["document"];
    assert!(document[0]["properties"].is_mapping());
    let heading = &document[1]["heading"];
    let properties = &heading[0]["properties"];
    assert_eq!(properties["level"].as_u64(), Some(3));
    assert_eq!(heading[1]["text"][1]["literal"].as_str(), Some("Third"));
}

#[test]
fn test_compact_layout() {
    insta::assert_snapshot!(render("# Title\n\n* a\n", true), @r###"
    ---
    - document:
      - heading:
        - text: 'Title'
      - list:
        - item:
          - paragraph:
            - text: 'a'
    ...
    "###);
}
