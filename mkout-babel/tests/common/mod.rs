//! Shared helpers for the format tests.

use mkout_babel::ast::{NodeRef, NodeValue, Tree};

pub fn parse(source: &str) -> Tree {
    mkout_babel::parse_markdown(source).expect("markdown to parse")
}

/// One line per node, indented by depth, describing what a reader of the
/// document can observe.
///
/// Adjacent text nodes are merged (escapes change where the parser splits
/// them) and derived or presentational attributes are left out: blank-line
/// flags, marker padding, setext and fenced flags.
pub fn shape(tree: &Tree) -> Vec<String> {
    let mut lines = Vec::new();
    describe(tree.root(), 0, &mut lines);
    lines
}

fn describe(node: NodeRef<'_>, depth: usize, lines: &mut Vec<String>) {
    let label = match node.value() {
        NodeValue::Heading(heading) => format!("heading {}", heading.level),
        NodeValue::List(list) if list.is_ordered() => format!(
            "list ordered start={} delimiter={:?} tight={}",
            list.start, list.delimiter, list.tight
        ),
        NodeValue::List(list) => format!("list bullet={} tight={}", list.bullet_char, list.tight),
        NodeValue::Link(link) | NodeValue::Image(link) => format!(
            "{} {} {:?}",
            node.type_name(),
            link.destination,
            link.title
        ),
        NodeValue::CodeBlock(block) => format!("code_block {:?} {:?}", block.info, block.literal),
        NodeValue::Text(_) => unreachable!("text is merged by the caller"),
        _ => match node.literal() {
            Some(literal) => format!("{} {:?}", node.type_name(), literal),
            None => node.type_name().to_string(),
        },
    };
    lines.push(format!("{}{}", "  ".repeat(depth), label));

    let mut text = String::new();
    for child in node.children() {
        if let NodeValue::Text(literal) = child.value() {
            text.push_str(literal);
            continue;
        }
        flush_text(&mut text, depth + 1, lines);
        describe(child, depth + 1, lines);
    }
    flush_text(&mut text, depth + 1, lines);
}

fn flush_text(text: &mut String, depth: usize, lines: &mut Vec<String>) {
    if !text.is_empty() {
        lines.push(format!("{}text {:?}", "  ".repeat(depth), text));
        text.clear();
    }
}

/// Assert that rendering `source` and parsing the result again gives a
/// document with the same shape.
pub fn assert_round_trip(source: &str) -> String {
    let tree = parse(source);
    let rendered = mkout_babel::to_markdown(&tree).expect("tree to render");
    let reparsed = parse(&rendered);
    assert_eq!(
        shape(&reparsed),
        shape(&tree),
        "round trip changed the document\nsource:\n{source}\nrendered:\n{rendered}"
    );
    rendered
}
