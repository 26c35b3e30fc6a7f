//! Bionic emphasis: bold the first half of a word.

use crate::render::escape_text;

/// Words shorter than this are left unsplit.
pub const MIN_EMPHASIS_CHARS: usize = 2;

/// Split a word into its emphasized head and plain tail.
///
/// The head holds the first `ceil(n / 2)` characters, counted as Unicode
/// scalar values. Returns `None` for words under [`MIN_EMPHASIS_CHARS`].
pub fn split_emphasis(word: &str) -> Option<(&str, &str)> {
    let len = word.chars().count();
    if len < MIN_EMPHASIS_CHARS {
        return None;
    }

    let mid = len.div_ceil(2);
    let split_at = word
        .char_indices()
        .nth(mid)
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    Some(word.split_at(split_at))
}

/// Render a word as markup with its first half wrapped in `<b>`.
///
/// ```
/// use beeline::segment::emphasize;
///
/// assert_eq!(emphasize("cat"), "<b>ca</b>t");
/// assert_eq!(emphasize("a"), "a");
/// ```
pub fn emphasize(word: &str) -> String {
    match split_emphasis(word) {
        Some((head, tail)) => format!("<b>{}</b>{}", escape_text(head), escape_text(tail)),
        None => escape_text(word),
    }
}
