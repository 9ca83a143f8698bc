//! JSON format tests

use crate::common::{parse, shape};
use mkout_babel::format::Format;
use mkout_babel::formats::json::{parse_from_json, serialize_to_json};
use mkout_babel::formats::{JsonFormat, JsonOptions};
use serde_json::Value;
use std::collections::HashMap;

fn assert_text_document(value: &Value) {
    assert_eq!(value["type"], "document");
    assert_eq!(value["children"][0]["type"], "paragraph");
    assert_eq!(value["children"][0]["children"][0]["type"], "text");
    assert_eq!(value["children"][0]["children"][0]["literal"], "Text");
}

#[test]
fn test_dump_structure() {
    let json = JsonFormat::default().serialize(&parse("Text")).unwrap();
    assert_text_document(&serde_json::from_str(&json).unwrap());
}

#[test]
fn test_dump_with_indent() {
    let mut params = HashMap::new();
    params.insert("indent".to_string(), "1".to_string());
    let json = JsonFormat::default()
        .serialize_with_options(&parse("Text"), &params)
        .unwrap();
    assert!(json.lines().nth(1).unwrap().starts_with(" \""));
    assert_text_document(&serde_json::from_str(&json).unwrap());
}

#[test]
fn test_dump_loads_back() {
    let source = include_str!("../fixtures/commonmark-tour.md");
    let tree = parse(source);
    let json = serialize_to_json(&tree, &JsonOptions::default()).unwrap();
    let loaded = parse_from_json(&json).unwrap();
    assert_eq!(loaded, tree);
    assert_eq!(shape(&loaded), shape(&tree));
}

#[test]
fn test_loaded_trees_render() {
    let json = r#"{
        "type": "document",
        "children": [
            {"type": "heading", "level": 2, "children": [{"type": "text", "literal": "Loaded"}]},
            {"type": "paragraph", "children": [
                {"type": "emph", "children": [{"type": "text", "literal": "from"}]},
                {"type": "text", "literal": " json"}
            ]}
        ]
    }"#;
    let tree = parse_from_json(json).unwrap();
    assert_eq!(
        mkout_babel::to_markdown(&tree).unwrap(),
        "## Loaded\n\n*from* json\n"
    );
}

#[test]
fn test_invalid_structure_is_rejected() {
    let json = r#"{"type":"document","children":[{"type":"item"}]}"#;
    assert!(parse_from_json(json).is_err());
}
