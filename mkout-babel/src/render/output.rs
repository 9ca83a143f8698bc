//! Line-aware output buffer shared by all renderers.
//!
//! Handlers never write line terminators or indentation themselves. They
//! call [`Output::emit`] for content and [`Output::newline`] for breaks,
//! and the buffer takes care of:
//!
//! - the configured line terminator,
//! - a stack of line prefixes (block quote markers, list continuation
//!   indentation) written at the start of every line,
//! - blank lines, which are held as pending until more content follows so
//!   that container exits never stack redundant blank lines.

#[derive(Debug, Clone)]
struct Prefix {
    rest: String,
    first: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Output {
    buf: String,
    terminator: String,
    prefixes: Vec<Prefix>,
    at_line_start: bool,
    pending_blanks: usize,
    max_blank_lines: usize,
}

impl Default for Output {
    fn default() -> Self {
        Self::new("\n")
    }
}

impl Output {
    pub fn new(terminator: impl Into<String>) -> Self {
        Output {
            buf: String::new(),
            terminator: terminator.into(),
            prefixes: Vec::new(),
            at_line_start: true,
            pending_blanks: 0,
            max_blank_lines: 1,
        }
    }

    /// Cap on consecutive blank lines requested through [`Output::newline`].
    pub fn with_max_blank_lines(mut self, max: usize) -> Self {
        self.max_blank_lines = max;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// True when nothing has been written on the current line yet.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn ends_with_whitespace(&self) -> bool {
        self.at_line_start || self.buf.ends_with(char::is_whitespace)
    }

    /// Append text. Embedded `\n` characters end the line, so every line
    /// of a multi-line literal receives the active prefixes; empty lines
    /// inside `text` are written as real blank lines.
    pub fn emit(&mut self, text: &str) {
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.end_line();
            }
            if !line.is_empty() {
                self.write_content(line);
            }
        }
    }

    /// Make sure the output ends with `count` line breaks: the current line
    /// is terminated if it has content and `count - 1` blank lines are
    /// requested. Requests do not accumulate; the largest one wins, capped
    /// by the configured maximum.
    pub fn newline(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        if !self.at_line_start {
            self.buf.push_str(&self.terminator);
            self.at_line_start = true;
        }
        let blanks = (count - 1).min(self.max_blank_lines);
        self.pending_blanks = self.pending_blanks.max(blanks);
    }

    pub fn ensure_line_start(&mut self) {
        self.newline(1);
    }

    /// Drop blank lines requested but not yet written.
    pub fn discard_pending(&mut self) {
        self.pending_blanks = 0;
    }

    /// Push a prefix written at the start of every following line.
    pub fn push_prefix(&mut self, prefix: impl Into<String>) {
        self.prefixes.push(Prefix {
            rest: prefix.into(),
            first: None,
        });
    }

    /// Push a prefix whose first line uses `marker` and whose following
    /// lines use `rest`, as list items need.
    pub fn push_marker_prefix(&mut self, marker: impl Into<String>, rest: impl Into<String>) {
        self.prefixes.push(Prefix {
            rest: rest.into(),
            first: Some(marker.into()),
        });
    }

    /// Pop the innermost prefix. A marker that never made it into the
    /// output (an empty list item) is written on a line of its own first.
    pub fn pop_prefix(&mut self) {
        let unwritten = self
            .prefixes
            .last()
            .map_or(false, |prefix| prefix.first.is_some());
        if unwritten {
            self.ensure_line_start();
            self.start_line();
            let trimmed = self.buf.trim_end_matches(' ').len();
            self.buf.truncate(trimmed);
            self.buf.push_str(&self.terminator);
            self.at_line_start = true;
        }
        self.prefixes.pop();
    }

    /// Finish rendering. The result always ends with a line terminator
    /// when non-empty; pending blank lines are kept only when asked to.
    pub fn finish(mut self, keep_trailing_blanks: bool) -> String {
        if !self.at_line_start {
            self.buf.push_str(&self.terminator);
        }
        if keep_trailing_blanks && !self.buf.is_empty() {
            for _ in 0..self.pending_blanks {
                self.buf.push_str(&self.terminator);
            }
        }
        self.buf
    }

    fn write_content(&mut self, text: &str) {
        if self.at_line_start {
            self.start_line();
        }
        self.buf.push_str(text);
    }

    fn start_line(&mut self) {
        self.flush_pending();
        for prefix in &mut self.prefixes {
            match prefix.first.take() {
                Some(marker) => self.buf.push_str(&marker),
                None => self.buf.push_str(&prefix.rest),
            }
        }
        self.at_line_start = false;
    }

    fn end_line(&mut self) {
        if self.at_line_start {
            self.flush_pending();
            self.write_blank_line();
        } else {
            self.buf.push_str(&self.terminator);
            self.at_line_start = true;
        }
    }

    fn flush_pending(&mut self) {
        let count = std::mem::take(&mut self.pending_blanks);
        if self.buf.is_empty() {
            return;
        }
        for _ in 0..count {
            self.write_blank_line();
        }
    }

    fn write_blank_line(&mut self) {
        let prefix: String = self.prefixes.iter().map(|p| p.rest.as_str()).collect();
        self.buf.push_str(prefix.trim_end());
        self.buf.push_str(&self.terminator);
    }
}
