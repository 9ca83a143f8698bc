//! Man page format tests

use crate::common::parse;
use insta::assert_snapshot;
use mkout_babel::format::Format;
use mkout_babel::formats::man::ManRenderer;
use mkout_babel::formats::ManFormat;
use mkout_babel::Renderer;
use std::collections::HashMap;

const PAGE: &str = "# NAME

mkout - render

## Options

* one
* two
  1. nested

```
.dot
```

> quoted
";

#[test]
fn test_page_layout() {
    let man = ManRenderer::default().render(&parse(PAGE)).unwrap();
    assert_snapshot!(man, @r###"
    .TH "" "1" ""
    .SH "NAME"
    .PP
    mkout - render
    .SS "Options"
    .IP "*" 4
    one
    .IP "*" 4
    two
    .RS 4
    .IP "1." 4
    nested
    .RE
    .PP
    .in +4n
    .nf
    \&.dot
    .fi
    .in
    .RS 4
    .PP
    quoted
    .RE
    "###);
}

#[test]
fn test_preamble_from_params() {
    let mut params = HashMap::new();
    params.insert("title".to_string(), "MKOUT".to_string());
    params.insert("section".to_string(), "7".to_string());
    params.insert("date".to_string(), "January 2024".to_string());
    let man = ManFormat::default()
        .serialize_with_options(&parse("Body"), &params)
        .unwrap();
    assert!(man.starts_with(".TH \"MKOUT\" \"7\" \"January 2024\"\n.PP\nBody\n"));
}

#[test]
fn test_inline_markup() {
    let man = ManRenderer::default()
        .render(&parse("*em* **strong** `code` [docs](http://a.com)  \nnext"))
        .unwrap();
    assert!(man.contains("\\fIem\\fP \\fBstrong\\fP `code` docs <http://a.com>\n.br\nnext\n"));
}

#[test]
fn test_text_cannot_start_requests() {
    let man = ManRenderer::default()
        .render(&parse("first line\n.second line\n'third line"))
        .unwrap();
    assert!(man.contains("first line\n\\&.second line\n\\&'third line\n"));
}

#[test]
fn test_headings_escape_quotes() {
    let man = ManRenderer::default()
        .render(&parse("## Say \"hi\""))
        .unwrap();
    assert!(man.contains(".SS \"Say \\(dqhi\\(dq\"\n"));
}
