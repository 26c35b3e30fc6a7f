//! Region discovery and word-unit construction.

use serde::{Deserialize, Serialize};

use crate::model::{Document, NodeId};

use super::emphasis::split_emphasis;
use super::tokenize::{Token, Tokenizer};
use super::{is_processed, is_word_unit, MARKER_VALUE, PROCESSED_ATTR, RUN_ATTR, WORD_ATTR};

/// Block-level containers whose text is reformatted.
pub const DEFAULT_REGION_TAGS: &[&str] = &["p", "li", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Options for segmentation.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Bold the first half of each word
    pub emphasize: bool,

    /// Tags selecting the regions to process
    pub region_tags: Vec<String>,
}

impl SegmentOptions {
    /// Create new segment options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable bionic emphasis.
    pub fn with_emphasis(mut self, emphasize: bool) -> Self {
        self.emphasize = emphasize;
        self
    }

    /// Replace the region tag set.
    pub fn with_region_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.region_tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            emphasize: true,
            region_tags: DEFAULT_REGION_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Counts collected during one segmentation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Regions matched by the tag query
    pub regions_found: u32,

    /// Regions skipped because they were already processed
    pub regions_skipped: u32,

    /// Regions processed (and flagged) in this pass
    pub regions_processed: u32,

    /// Text runs replaced by word fragments
    pub runs_replaced: u32,

    /// Word units created
    pub words_wrapped: u32,
}

/// Wraps every word of every eligible region in an addressable unit.
#[derive(Debug, Clone)]
pub struct Segmenter {
    options: SegmentOptions,
    tokenizer: Tokenizer,
}

impl Segmenter {
    /// Create a segmenter.
    pub fn new(options: SegmentOptions) -> Self {
        Self {
            options,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Get the options in use.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Segment all unprocessed regions of `doc`.
    pub fn segment(&self, doc: &mut Document) -> SegmentStats {
        let tags: Vec<&str> = self.options.region_tags.iter().map(String::as_str).collect();
        let mut stats = SegmentStats::default();

        for region in doc.query_tags(&tags) {
            stats.regions_found += 1;
            if is_processed(doc, region) {
                stats.regions_skipped += 1;
                continue;
            }

            for run in collect_runs(doc, region) {
                stats.words_wrapped += self.replace_run(doc, run);
                stats.runs_replaced += 1;
            }

            doc.set_attr(region, PROCESSED_ATTR, MARKER_VALUE);
            stats.regions_processed += 1;
        }

        log::debug!(
            "Segmented {} regions ({} skipped): {} runs, {} words",
            stats.regions_processed,
            stats.regions_skipped,
            stats.runs_replaced,
            stats.words_wrapped
        );
        stats
    }

    /// Replace one text run with its word fragment. Returns the word count.
    fn replace_run(&self, doc: &mut Document, run: NodeId) -> u32 {
        let Some(text) = doc.text(run).map(str::to_owned) else {
            return 0;
        };

        let wrapper = doc.create_element("span");
        doc.set_attr(wrapper, RUN_ATTR, MARKER_VALUE);

        let mut words = 0;
        for token in self.tokenizer.tokenize(&text) {
            let child = match token {
                Token::Whitespace(ws) => doc.create_text(ws),
                Token::Word(word) => {
                    words += 1;
                    self.build_word_unit(doc, &word)
                }
            };
            doc.append_child(wrapper, child);
        }

        doc.replace_with(run, &[wrapper]);
        words
    }

    fn build_word_unit(&self, doc: &mut Document, word: &str) -> NodeId {
        let unit = doc.create_element("span");
        doc.set_attr(unit, WORD_ATTR, MARKER_VALUE);

        let split = if self.options.emphasize {
            split_emphasis(word)
        } else {
            None
        };

        match split {
            Some((head, tail)) => {
                let bold = doc.create_element("b");
                let head = doc.create_text(head);
                let tail = doc.create_text(tail);
                doc.append_child(bold, head);
                doc.append_child(unit, bold);
                doc.append_child(unit, tail);
            }
            None => {
                let text = doc.create_text(word);
                doc.append_child(unit, text);
            }
        }
        unit
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmentOptions::default())
    }
}

/// Text leaves of `region` with non-blank content, in pre-order.
///
/// Text already inside a word unit is left alone so a region nested in a
/// processed one is not wrapped twice.
fn collect_runs(doc: &Document, region: NodeId) -> Vec<NodeId> {
    doc.descendants(region)
        .filter(|&id| doc.text(id).is_some_and(|t| !t.trim().is_empty()))
        .filter(|&id| !doc.ancestors(id).any(|a| is_word_unit(doc, a)))
        .collect()
}

/// Segment `doc` with default region tags.
pub fn segment(doc: &mut Document, emphasize: bool) -> SegmentStats {
    Segmenter::new(SegmentOptions::new().with_emphasis(emphasize)).segment(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::XhtmlParser;
    use crate::render::{inner_html, to_html};
    use crate::segment::{emphasize, word_units};

    fn parse(source: &str) -> Document {
        XhtmlParser::from_string(source).parse().unwrap()
    }

    #[test]
    fn test_segment_plain() {
        let mut doc = parse("<body><p>Hi there</p></body>");
        let stats = segment(&mut doc, false);

        assert_eq!(stats.regions_processed, 1);
        assert_eq!(stats.runs_replaced, 1);
        assert_eq!(stats.words_wrapped, 2);
        assert_eq!(
            to_html(&doc),
            "<body><p data-processed=\"true\"><span data-beeline-run=\"true\">\
             <span data-beeline-word=\"true\">Hi</span> \
             <span data-beeline-word=\"true\">there</span></span></p></body>"
        );
    }

    #[test]
    fn test_segment_with_emphasis() {
        let mut doc = parse("<p>a cat</p>");
        segment(&mut doc, true);

        let units = word_units(&doc);
        assert_eq!(units.len(), 2);
        assert_eq!(inner_html(&doc, units[0]), "a");
        assert_eq!(inner_html(&doc, units[1]), "<b>ca</b>t");
        assert_eq!(inner_html(&doc, units[1]), emphasize("cat"));
    }

    #[test]
    fn test_inline_markup_is_preserved() {
        let mut doc = parse("<p>See <a href=\"/x\">the docs</a> now</p>");
        segment(&mut doc, false);

        let link = doc.query_tags(&["a"])[0];
        assert_eq!(doc.attr(link, "href"), Some("/x"));
        assert_eq!(doc.text_content(link), "the docs");
        assert_eq!(word_units(&doc).len(), 4);
        assert_eq!(doc.text_content(doc.root()), "See the docs now");
    }

    #[test]
    fn test_whitespace_only_nodes_untouched() {
        let mut doc = parse("<p>\n  <em>x</em>\n</p>");
        let stats = segment(&mut doc, false);

        assert_eq!(stats.runs_replaced, 1);
        let p = doc.root();
        let first = doc.children(p)[0];
        assert_eq!(doc.text(first), Some("\n  "));
    }

    #[test]
    fn test_empty_region_is_flagged() {
        let mut doc = parse("<body><p>   </p><h1></h1></body>");
        let stats = segment(&mut doc, true);

        assert_eq!(stats.regions_processed, 2);
        assert_eq!(stats.words_wrapped, 0);
        assert_eq!(doc.query_attr(PROCESSED_ATTR, MARKER_VALUE).len(), 2);
    }

    #[test]
    fn test_second_pass_is_noop() {
        let mut doc = parse("<body><p>one two</p><li>three</li></body>");
        segment(&mut doc, true);
        let after_first = doc.clone();

        let stats = segment(&mut doc, true);
        assert_eq!(stats.regions_skipped, 2);
        assert_eq!(stats.regions_processed, 0);
        assert_eq!(doc, after_first);
    }

    #[test]
    fn test_empty_flag_is_not_processed() {
        let mut doc =
            parse("<body><p data-processed=\"\">one</p><p data-processed=\"yes\">two</p></body>");
        let stats = segment(&mut doc, false);

        assert_eq!(stats.regions_processed, 1);
        assert_eq!(stats.regions_skipped, 1);
        assert_eq!(word_units(&doc).len(), 1);
        assert_eq!(doc.text_content(word_units(&doc)[0]), "one");
    }

    #[test]
    fn test_nested_regions_wrapped_once() {
        let mut doc = parse("<ul><li><p>deep text</p></li></ul>");
        let stats = segment(&mut doc, true);

        assert_eq!(stats.regions_processed, 2);
        assert_eq!(stats.words_wrapped, 2);
        assert_eq!(word_units(&doc).len(), 2);
    }

    #[test]
    fn test_non_region_text_untouched() {
        let mut doc = parse("<body><div>outside</div><p>inside</p></body>");
        segment(&mut doc, false);

        let div = doc.query_tags(&["div"])[0];
        assert_eq!(doc.children(div).len(), 1);
        assert!(doc.node(doc.children(div)[0]).is_text());
    }

    #[test]
    fn test_custom_region_tags() {
        let mut doc = parse("<body><td>cell text</td><p>para</p></body>");
        let segmenter = Segmenter::new(SegmentOptions::new().with_region_tags(["td"]));
        let stats = segmenter.segment(&mut doc);

        assert_eq!(stats.regions_found, 1);
        assert_eq!(stats.words_wrapped, 2);
    }
}
