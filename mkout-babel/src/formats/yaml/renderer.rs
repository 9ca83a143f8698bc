//! YAML structural dump
//!
//! Every node becomes a one-key mapping inside its parent's sequence:
//!
//! ```yaml
//! ---
//! - document:
//!   - paragraph:
//!     - text: 'Some paragraph text.'
//! ...
//! ```
//!
//! The dash of a node at depth `d` sits in column `2 * d`. Literals are
//! single quoted, or written as `|` block scalars with an explicit
//! indentation indicator when they span lines.

use super::YamlOptions;
use crate::ast::{ListData, ListType, NodeKind, NodeRef, NodeValue, Tree};
use crate::error::RenderError;
use crate::render::{drive, HandlerTable, Output, Renderer};
use tracing::debug;

pub struct YamlState {
    compact: bool,
}

pub struct YamlRenderer {
    options: YamlOptions,
    handlers: HandlerTable<YamlState>,
}

impl Default for YamlRenderer {
    fn default() -> Self {
        Self::new(YamlOptions::default())
    }
}

impl YamlRenderer {
    pub fn new(options: YamlOptions) -> Self {
        let mut handlers = HandlerTable::new();
        for kind in NodeKind::ALL {
            handlers.insert(kind, entry);
        }
        YamlRenderer { options, handlers }
    }
}

impl Renderer for YamlRenderer {
    fn render(&self, tree: &Tree) -> Result<String, RenderError> {
        let mut state = YamlState {
            compact: self.options.compact,
        };
        let mut out = Output::default();
        drive(tree.root(), &mut out, |out, node, entering| {
            self.handlers.dispatch(&mut state, out, node, entering)
        })?;

        let yaml = out.finish(false);
        debug!(
            nodes = tree.len(),
            bytes = yaml.len(),
            compact = self.options.compact,
            "rendered yaml"
        );
        Ok(yaml)
    }
}

fn entry(
    state: &mut YamlState,
    out: &mut Output,
    node: NodeRef<'_>,
    entering: bool,
) -> Result<(), RenderError> {
    let is_document = node.is(NodeKind::Document);
    if !entering {
        if is_document {
            out.emit("...\n");
        }
        return Ok(());
    }

    let mut text = String::new();
    if is_document {
        text.push_str("---\n");
    }
    let column = 2 * node.depth();
    let kind = node.type_name();
    match (state.compact, node.literal()) {
        (true, Some(literal)) => push_entry(&mut text, column, kind, Some(literal)),
        (true, None) => push_entry(&mut text, column, kind, None),
        (false, literal) => {
            push_entry(&mut text, column, kind, None);
            push_properties(&mut text, column + 2, node);
            if let Some(literal) = literal {
                push_entry(&mut text, column + 2, "literal", Some(literal));
            }
        }
    }
    out.emit(&text);
    Ok(())
}

/// `- key: value` with the dash in `column`.
fn push_entry(text: &mut String, column: usize, key: &str, value: Option<&str>) {
    text.push_str(&" ".repeat(column));
    text.push_str("- ");
    text.push_str(key);
    text.push(':');
    match value {
        Some(value) => push_scalar(text, column + 2, value),
        None => text.push('\n'),
    }
}

fn push_properties(text: &mut String, column: usize, node: NodeRef<'_>) {
    text.push_str(&" ".repeat(column));
    text.push_str("- properties:\n");
    let key_column = column + 4;
    for (key, value) in properties(node) {
        text.push_str(&" ".repeat(key_column));
        text.push_str(key);
        text.push(':');
        match value {
            Property::Str(value) => push_scalar(text, key_column, &value),
            Property::Plain(value) => {
                text.push(' ');
                text.push_str(&value);
                text.push('\n');
            }
        }
    }
}

enum Property {
    Str(String),
    Plain(String),
}

fn properties(node: NodeRef<'_>) -> Vec<(&'static str, Property)> {
    use Property::{Plain, Str};

    let mut props = Vec::new();
    match node.value() {
        NodeValue::Heading(heading) => {
            props.push(("level", Plain(heading.level.to_string())));
            props.push(("setext", Plain(heading.setext.to_string())));
        }
        NodeValue::Link(link) | NodeValue::Image(link) => {
            props.push(("destination", Str(link.destination.clone())));
            if let Some(title) = &link.title {
                props.push(("title", Str(title.clone())));
            }
        }
        NodeValue::CodeBlock(block) => {
            props.push(("info", Str(block.info.clone())));
            props.push(("fenced", Plain(block.fenced.to_string())));
        }
        NodeValue::List(data) | NodeValue::Item(data) => list_properties(data, &mut props),
        NodeValue::CustomBlock(custom) | NodeValue::CustomInline(custom) => {
            if let Some(markup) = &custom.on_enter {
                props.push(("on_enter", Str(markup.clone())));
            }
            if let Some(markup) = &custom.on_exit {
                props.push(("on_exit", Str(markup.clone())));
            }
        }
        _ => {}
    }
    props.push((
        "last_line_blank",
        Plain(node.last_line_blank().to_string()),
    ));
    props
}

fn list_properties(data: &ListData, props: &mut Vec<(&'static str, Property)>) {
    use Property::{Plain, Str};

    let list_type = match data.list_type {
        ListType::Bullet => "bullet",
        ListType::Ordered => "ordered",
    };
    props.push(("list_type", Str(list_type.to_string())));
    if data.is_ordered() {
        props.push(("start", Plain(data.start.to_string())));
        props.push(("delimiter", Str(data.delimiter.as_char().to_string())));
    } else {
        props.push(("bullet_char", Str(data.bullet_char.to_string())));
    }
    props.push(("tight", Plain(data.tight.to_string())));
    props.push(("padding", Plain(data.padding.to_string())));
    props.push(("marker_offset", Plain(data.marker_offset.to_string())));
}

/// Write ` value` and the line end for a key whose mapping sits in
/// `key_column`.
fn push_scalar(text: &mut String, key_column: usize, value: &str) {
    let only_newlines = value.trim_end_matches('\n').is_empty();
    let has_control = value.chars().any(|c| c.is_control() && c != '\t' && c != '\n');
    if has_control || (only_newlines && !value.is_empty()) {
        text.push(' ');
        text.push_str(&double_quoted(value));
        text.push('\n');
    } else if value.contains('\n') {
        push_block_scalar(text, key_column + 2, value);
    } else {
        text.push_str(" '");
        text.push_str(&value.replace('\'', "''"));
        text.push_str("'\n");
    }
}

fn push_block_scalar(text: &mut String, indent: usize, value: &str) {
    let trailing = value.len() - value.trim_end_matches('\n').len();
    let chomp = match trailing {
        0 => "-",
        1 => "",
        _ => "+",
    };
    text.push_str(" |2");
    text.push_str(chomp);
    text.push('\n');

    let body = value.strip_suffix('\n').unwrap_or(value);
    for line in body.split('\n') {
        if !line.is_empty() {
            text.push_str(&" ".repeat(indent));
            text.push_str(line);
        }
        text.push('\n');
    }
}

fn double_quoted(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\x{:02x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CodeBlockData, HeadingData};

    fn paragraph_tree(text: &str) -> Tree {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let p = tree.append(root, NodeValue::Paragraph).unwrap();
        tree.append_text(p, text).unwrap();
        tree
    }

    #[test]
    fn compact_layout() {
        let yaml = YamlRenderer::default()
            .render(&paragraph_tree("it's"))
            .unwrap();
        assert_eq!(
            yaml,
            "---\n- document:\n  - paragraph:\n    - text: 'it''s'\n...\n"
        );
    }

    #[test]
    fn multi_line_literals_use_block_scalars() {
        let mut tree = Tree::new();
        let root = tree.root_id();
        tree.append(
            root,
            NodeValue::CodeBlock(CodeBlockData {
                info: String::new(),
                literal: "  indented\n\nlast\n".to_string(),
                fenced: true,
            }),
        )
        .unwrap();
        let yaml = YamlRenderer::default().render(&tree).unwrap();
        assert_eq!(
            yaml,
            "---\n- document:\n  - code_block: |2\n        indented\n\n      last\n...\n"
        );
    }

    #[test]
    fn chomping_follows_trailing_newlines() {
        let mut text = String::new();
        push_block_scalar(&mut text, 2, "a\nb");
        assert_eq!(text, " |2-\n  a\n  b\n");

        let mut text = String::new();
        push_block_scalar(&mut text, 2, "a\n\n");
        assert_eq!(text, " |2+\n  a\n\n");
    }

    #[test]
    fn control_characters_are_double_quoted() {
        let mut text = String::new();
        push_scalar(&mut text, 0, "a\u{1b}b\"");
        assert_eq!(text, " \"a\\x1bb\\\"\"\n");
    }

    #[test]
    fn full_mode_lists_properties() {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let h = tree
            .append(root, NodeValue::Heading(HeadingData { level: 2, setext: false }))
            .unwrap();
        tree.append_text(h, "Title").unwrap();

        let yaml = YamlRenderer::new(YamlOptions { compact: false })
            .render(&tree)
            .unwrap();
        insta::assert_snapshot!(yaml, @r###"
        ---
        - document:
          - properties:
              last_line_blank: false
          - heading:
            - properties:
                level: 2
                setext: false
                last_line_blank: false
            - text:
              - properties:
                  last_line_blank: false
              - literal: 'Title'
        ...
        "###);
    }
}
