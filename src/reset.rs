//! Reverting segmentation, coloring and the font override.

use serde::{Deserialize, Serialize};

use crate::font::StyleRule;
use crate::model::Document;
use crate::segment::{DEFAULT_REGION_TAGS, MARKER_VALUE, PROCESSED_ATTR, RUN_ATTR};

/// Counts collected during a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetStats {
    /// Run wrappers collapsed back into text
    pub runs_restored: u32,

    /// Regions whose processed flag was cleared
    pub regions_cleared: u32,

    /// Whether the font rule was removed
    pub font_removed: bool,
}

/// Undo all processing applied to `doc`.
///
/// Every run wrapper becomes a single text node again, processed flags
/// are cleared and the font rule is removed. Word colors disappear with
/// their wrappers.
pub fn reset(doc: &mut Document) -> ResetStats {
    reset_regions(doc, DEFAULT_REGION_TAGS)
}

/// Undo all processing, clearing processed flags only on `region_tags`.
///
/// A flag is cleared only when it holds the value segmentation writes, so
/// `data-processed` attributes owned by the page survive.
pub fn reset_regions(doc: &mut Document, region_tags: &[&str]) -> ResetStats {
    let mut stats = ResetStats::default();

    for wrapper in doc.query_attr(RUN_ATTR, MARKER_VALUE) {
        // Skip wrappers already detached along with an outer one
        if !doc.is_attached(wrapper) {
            continue;
        }
        let text = doc.text_content(wrapper);
        let node = doc.create_text(text);
        if doc.replace_with(wrapper, &[node]) {
            stats.runs_restored += 1;
        }
    }

    let flagged: Vec<_> = doc
        .query_tags(region_tags)
        .into_iter()
        .filter(|&id| doc.attr(id, PROCESSED_ATTR) == Some(MARKER_VALUE))
        .collect();
    for region in flagged {
        doc.remove_attr(region, PROCESSED_ATTR);
        stats.regions_cleared += 1;
    }

    stats.font_removed = StyleRule::font_override().ensure_absent(doc);

    log::debug!(
        "Reset {} runs and {} regions",
        stats.runs_restored,
        stats.regions_cleared
    );
    stats
}
