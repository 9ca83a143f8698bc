//! HTML-to-text normalization for the plain text and man formats.
//!
//! Not a sanitizer: the result is meant for terminals, never for HTML.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\t]+").expect("break pattern"));
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("space pattern"));

/// Strip tags, drop newlines and tabs, then collapse runs of spaces.
pub fn normalize_html(html: &str) -> String {
    let text = TAG.replace_all(html, "");
    let text = LINE_BREAKS.replace_all(&text, "");
    SPACES.replace_all(&text, " ").into_owned()
}
