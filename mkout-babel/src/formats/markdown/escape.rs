//! Escaping and delimiter sizing for markdown output.

/// Escape characters that would otherwise be read as markdown syntax.
///
/// Inline syntax (`\`, `*`, `_`, `` ` ``, `[`, `]`, `<`, `!` before `[`
/// and entity-like `&`) is escaped everywhere. Block syntax is escaped only
/// at the start of a line: `#`, `>`, list bullets, setext underlines,
/// thematic breaks, `~~~` fences and ordered list markers.
/// `at_line_start` tells whether `text` begins a line of output.
pub fn escape_text(text: &str, at_line_start: bool) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        escape_line(line, at_line_start || index > 0, &mut out);
    }
    out
}

fn escape_line(line: &str, line_start: bool, out: &mut String) {
    let mut rest = line;
    if line_start {
        if let Some(delim) = ordered_marker_delimiter(line) {
            out.push_str(&line[..delim]);
            out.push('\\');
            out.push_str(&line[delim..=delim]);
            rest = &line[delim + 1..];
        } else if let Some(first) = line.chars().next() {
            let next = line[first.len_utf8()..].chars().next();
            let is_marker = match first {
                '#' | '>' => true,
                '-' | '+' | '=' => matches!(next, None | Some(' ') | Some('\t')) || next == Some(first),
                '~' => line.starts_with("~~~"),
                _ => false,
            };
            if is_marker {
                out.push('\\');
                out.push(first);
                rest = &line[first.len_utf8()..];
            }
        }
    }

    let mut chars = rest.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        let escape = match c {
            '\\' | '*' | '_' | '`' | '[' | ']' | '<' => true,
            '!' => chars.peek().map(|(_, next)| *next) == Some('['),
            '&' => looks_like_entity(&rest[index..]),
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Byte index of the `.`/`)` in a leading `123.` style marker followed by
/// whitespace or the end of the line.
fn ordered_marker_delimiter(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let delim = *line.as_bytes().get(digits)?;
    if delim != b'.' && delim != b')' {
        return None;
    }
    match line.as_bytes().get(digits + 1) {
        None | Some(b' ') | Some(b'\t') => Some(digits),
        _ => None,
    }
}

fn looks_like_entity(text: &str) -> bool {
    let body = &text[1..];
    match body.find(';') {
        Some(end) if end > 0 && end <= 32 => body[..end]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '#'),
        _ => false,
    }
}

/// Escape a trailing run of `#` that an ATX heading would read as its
/// closing sequence. `preceded_by_space` tells whether the output before
/// `text` ends in whitespace.
pub fn escape_closing_hashes(text: &mut String, preceded_by_space: bool) {
    let body = text.trim_end_matches('#');
    if body.len() == text.len() {
        return;
    }
    let opens_sequence = match body.chars().last() {
        Some(c) => c == ' ' || c == '\t',
        None => preceded_by_space,
    };
    if opens_sequence {
        text.insert(body.len(), '\\');
    }
}

fn longest_run(content: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in content.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Opening and closing fence for a code block: backticks unless the info
/// string contains one, always longer than any run of the fence character
/// inside the literal.
pub fn code_fence(literal: &str, info: &str) -> String {
    let fence_char = if info.contains('`') { '~' } else { '`' };
    let length = longest_run(literal, fence_char).max(2) + 1;
    std::iter::repeat(fence_char).take(length).collect()
}

/// A complete code span for `literal`.
pub fn code_span(literal: &str) -> String {
    let ticks = "`".repeat(longest_run(literal, '`') + 1);
    let padded = literal.starts_with('`')
        || literal.ends_with('`')
        || (literal.len() > 1
            && literal.starts_with(' ')
            && literal.ends_with(' ')
            && !literal.trim().is_empty());
    if padded {
        format!("{ticks} {literal} {ticks}")
    } else {
        format!("{ticks}{literal}{ticks}")
    }
}

/// Link destination, wrapped in `<...>` when it cannot stand bare.
pub fn link_destination(destination: &str) -> String {
    let needs_brackets = destination.is_empty()
        || destination
            .chars()
            .any(|c| c == ' ' || c == '<' || c == '>' || c.is_control())
        || !balanced_parens(destination);
    if needs_brackets {
        format!(
            "<{}>",
            destination.replace('<', "\\<").replace('>', "\\>")
        )
    } else {
        destination.to_string()
    }
}

fn balanced_parens(text: &str) -> bool {
    let mut depth: i32 = 0;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Double-quoted link title.
pub fn link_title(title: &str) -> String {
    format!("\"{}\"", title.replace('\\', "\\\\").replace('"', "\\\""))
}
