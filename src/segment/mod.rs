//! Text segmentation into addressable word units.
//!
//! Eligible regions are found by tag, their non-blank text runs are split
//! into words and whitespace, and each run is swapped for a fragment in
//! which every word is its own `span`. Regions are flagged once processed
//! and skipped on later passes.

mod emphasis;
mod segmenter;
mod tokenize;

pub use emphasis::{emphasize, split_emphasis, MIN_EMPHASIS_CHARS};
pub use segmenter::{segment, SegmentOptions, SegmentStats, Segmenter, DEFAULT_REGION_TAGS};
pub use tokenize::{join_tokens, Token, Tokenizer};

use crate::model::{Document, NodeId};

/// Attribute marking a word unit as colorable.
pub const WORD_ATTR: &str = "data-beeline-word";

/// Attribute marking the fragment that replaced one text run.
pub const RUN_ATTR: &str = "data-beeline-run";

/// Attribute flagging a region as already processed.
pub const PROCESSED_ATTR: &str = "data-processed";

/// Value written to all marker attributes.
pub const MARKER_VALUE: &str = "true";

/// All word units of `doc`, in document order.
pub fn word_units(doc: &Document) -> Vec<NodeId> {
    doc.query_attr(WORD_ATTR, MARKER_VALUE)
}

/// Check if a node is a word unit.
pub fn is_word_unit(doc: &Document, id: NodeId) -> bool {
    doc.attr(id, WORD_ATTR) == Some(MARKER_VALUE)
}

/// Check if a region carries the processed flag.
///
/// An empty value does not count as set.
pub fn is_processed(doc: &Document, id: NodeId) -> bool {
    doc.attr(id, PROCESSED_ATTR).is_some_and(|value| !value.is_empty())
}
