//! Integration tests for segmentation, emphasis and reset.

use beeline::render::to_html;
use beeline::segment::{
    emphasize, join_tokens, word_units, SegmentOptions, Segmenter, Tokenizer, PROCESSED_ATTR,
};
use beeline::{parse_str, reset, segment, set_font_override, Document};

const ARTICLE: &str = "<html><head><title>Article</title></head><body>\
    <h1>A short title</h1>\
    <p>First paragraph with <a href=\"#x\">a link</a> and <strong>bold words</strong>.</p>\
    <ul><li>alpha</li><li>beta gamma</li></ul>\
    <div>Not a region, so left alone.</div>\
    </body></html>";

fn article() -> Document {
    parse_str(ARTICLE).unwrap()
}

#[test]
fn test_emphasize_examples() {
    assert_eq!(emphasize("cat"), "<b>ca</b>t");
    assert_eq!(emphasize("a"), "a");
    assert_eq!(emphasize("word"), "<b>wo</b>rd");
    assert_eq!(emphasize("reading"), "<b>read</b>ing");
}

#[test]
fn test_tokens_reproduce_input() {
    let tokenizer = Tokenizer::new();
    for text in [
        "plain words here",
        "  leading and trailing  ",
        "tabs\tand\nnewlines",
        "punctuation, stays attached!",
        "",
    ] {
        assert_eq!(join_tokens(&tokenizer.tokenize(text)), text);
    }
}

#[test]
fn test_segment_article() {
    let mut doc = article();
    let stats = segment(&mut doc, true);

    assert_eq!(stats.regions_found, 4);
    assert_eq!(stats.regions_processed, 4);
    assert_eq!(stats.regions_skipped, 0);

    // h1: 3, p: 3 + 2 + 1 + 2 + 1 ("."), li: 1, li: 2
    assert_eq!(stats.words_wrapped, 15);
    assert_eq!(word_units(&doc).len(), 15);

    let html = to_html(&doc);
    assert!(html.contains("<b>sho</b>rt"));
    assert!(html.contains("<a href=\"#x\"><span data-beeline-run=\"true\">"));
    assert!(html.contains("<div>Not a region, so left alone.</div>"));
}

#[test]
fn test_text_is_preserved() {
    let original = article();
    let mut doc = original.clone();
    segment(&mut doc, true);

    assert_eq!(
        doc.text_content(doc.root()),
        original.text_content(original.root())
    );
}

#[test]
fn test_second_pass_is_noop() {
    let mut doc = article();
    segment(&mut doc, true);
    let once = doc.clone();

    let stats = segment(&mut doc, false);
    assert_eq!(stats.regions_skipped, 4);
    assert_eq!(stats.words_wrapped, 0);
    assert_eq!(doc, once);
}

#[test]
fn test_regions_are_flagged() {
    let mut doc = article();
    segment(&mut doc, false);

    for region in doc.query_tags(&["h1", "p", "li"]) {
        assert_eq!(doc.attr(region, PROCESSED_ATTR), Some("true"));
    }
    let div = doc.find_first("div").unwrap();
    assert_eq!(doc.attr(div, PROCESSED_ATTR), None);
}

#[test]
fn test_custom_segmenter() {
    let mut doc = article();
    let segmenter = Segmenter::new(
        SegmentOptions::new()
            .with_emphasis(false)
            .with_region_tags(["div"]),
    );

    let stats = segmenter.segment(&mut doc);
    assert_eq!(stats.regions_processed, 1);
    assert_eq!(stats.words_wrapped, 6);
    assert!(!to_html(&doc).contains("<b>"));
}

#[test]
fn test_reset_restores_serialization() {
    let mut doc = article();
    let original = to_html(&doc);

    segment(&mut doc, true);
    let stats = reset(&mut doc);

    assert_eq!(stats.regions_cleared, 4);
    assert_eq!(to_html(&doc), original);
}

#[test]
fn test_reset_restores_headless_page_with_foreign_flag() {
    let source = "<html><body><div data-processed=\"yes\">site</div><p>one two</p></body></html>";
    let mut doc = parse_str(source).unwrap();

    segment(&mut doc, true);
    set_font_override(&mut doc, true);
    reset(&mut doc);

    assert_eq!(to_html(&doc), source);
}
