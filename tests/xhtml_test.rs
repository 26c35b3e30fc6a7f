//! Integration tests for XHTML reading and writing.

use std::io::Cursor;

use beeline::render::{save_html, to_html, to_html_with_options};
use beeline::{
    parse_bytes, parse_file, parse_reader, parse_str, Error, HtmlOptions, ParseOptions,
    XhtmlParser,
};
use tempfile::tempdir;

#[test]
fn test_round_trip_markup() {
    for source in [
        "<p>Hello <em>world</em>!</p>",
        "<!DOCTYPE html><html lang=\"en\"><head><title>T</title></head><body><p class=\"a\">x</p></body></html>",
        "<div><br/><img src=\"a.png\" alt=\"\"/><!-- note --></div>",
        "<p>1 &lt; 2 &amp;&amp; 3 &gt; 2</p>",
        "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>",
    ] {
        let doc = parse_str(source).unwrap();
        assert_eq!(to_html(&doc), source);
    }
}

#[test]
fn test_named_entities() {
    let doc = parse_str("<p>a&nbsp;b&mdash;c</p>").unwrap();
    assert_eq!(doc.text_content(doc.root()), "a\u{00A0}b\u{2014}c");
}

#[test]
fn test_reader_and_bytes() {
    let source = "<p>from bytes</p>";
    let a = parse_bytes(source.as_bytes()).unwrap();
    let b = parse_reader(Cursor::new(source)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_strict_rejects_mismatched_tags() {
    let err = parse_str("<p><b>bold</p></b>").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_empty_input() {
    assert!(matches!(parse_str(""), Err(Error::EmptyDocument)));
}

#[test]
fn test_lenient_drops_second_root() {
    let parser =
        XhtmlParser::from_string_with_options("<p>a</p><p>b</p>", ParseOptions::new().lenient());
    let doc = parser.parse().unwrap();
    assert_eq!(to_html(&doc), "<p>a</p>");
}

#[test]
fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("page.xhtml");
    let source = "<!DOCTYPE html><html><body><p>saved</p></body></html>";

    let doc = parse_str(source).unwrap();
    save_html(&doc, &HtmlOptions::default(), &path).unwrap();
    let reloaded = parse_file(&path).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn test_without_doctype() {
    let doc = parse_str("<!DOCTYPE html><html></html>").unwrap();
    let html = to_html_with_options(&doc, &HtmlOptions::new().with_doctype(false));
    assert_eq!(html, "<html></html>");
}
