//! Grouping measured words into visual lines.

use crate::model::NodeId;

/// Default vertical tolerance for two words to share a line.
pub const DEFAULT_LINE_TOLERANCE: f64 = 10.0;

/// A word unit with its absolute top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredWord {
    /// The word unit
    pub node: NodeId,
    /// Top edge relative to the page origin
    pub top: f64,
}

impl MeasuredWord {
    /// Create a measured word.
    pub fn new(node: NodeId, top: f64) -> Self {
        Self { node, top }
    }
}

/// Word units judged to share one visual row.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Members in document order
    pub words: Vec<NodeId>,
    /// Reference top edge (the first member's)
    pub top: f64,
}

impl Line {
    /// Number of words in the line.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the line has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Strategy for clustering measured words into lines.
///
/// Implementations receive words in document order. A host that can
/// report exact line boxes can supply its own strategy instead of the
/// geometric heuristic.
pub trait LineStrategy {
    /// Group words into lines.
    fn group(&self, words: &[MeasuredWord]) -> Vec<Line>;
}

/// Greedy single-pass clustering on top-edge distance.
///
/// A word joins the current line when its top is strictly within
/// `tolerance` of the line's first word; otherwise it starts a new line.
/// Words are never reordered, so the result is only meaningful when
/// document order matches reading order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceClustering {
    /// Maximum top-edge distance (exclusive)
    pub tolerance: f64,
}

impl ToleranceClustering {
    /// Create a strategy with the given tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for ToleranceClustering {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_TOLERANCE)
    }
}

impl LineStrategy for ToleranceClustering {
    fn group(&self, words: &[MeasuredWord]) -> Vec<Line> {
        let mut lines: Vec<Line> = Vec::new();
        let mut current_words: Vec<NodeId> = Vec::new();
        let mut current_top: Option<f64> = None;

        for word in words {
            if let Some(top) = current_top {
                if (word.top - top).abs() < self.tolerance {
                    // Same line
                    current_words.push(word.node);
                } else {
                    // New line
                    lines.push(Line {
                        words: std::mem::take(&mut current_words),
                        top,
                    });
                    current_top = Some(word.top);
                    current_words.push(word.node);
                }
            } else {
                current_top = Some(word.top);
                current_words.push(word.node);
            }
        }

        // Don't forget the last line
        if let Some(top) = current_top {
            lines.push(Line {
                words: current_words,
                top,
            });
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(tops: &[f64]) -> Vec<MeasuredWord> {
        tops.iter()
            .enumerate()
            .map(|(i, &top)| MeasuredWord::new(NodeId(i), top))
            .collect()
    }

    fn sizes(lines: &[Line]) -> Vec<usize> {
        lines.iter().map(Line::len).collect()
    }

    #[test]
    fn test_two_lines() {
        let lines =
            ToleranceClustering::default().group(&measured(&[100.0, 102.0, 100.0, 250.0, 252.0]));
        assert_eq!(sizes(&lines), vec![3, 2]);
        assert_eq!(lines[0].top, 100.0);
        assert_eq!(lines[1].top, 250.0);
        assert_eq!(lines[1].words, vec![NodeId(3), NodeId(4)]);
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        let lines = ToleranceClustering::default().group(&measured(&[100.0, 110.0]));
        assert_eq!(sizes(&lines), vec![1, 1]);

        let lines = ToleranceClustering::default().group(&measured(&[100.0, 109.9]));
        assert_eq!(sizes(&lines), vec![2]);
    }

    #[test]
    fn test_reference_is_first_member() {
        // Drift accumulates against the first word, not the previous one
        let lines = ToleranceClustering::default().group(&measured(&[100.0, 106.0, 112.0]));
        assert_eq!(sizes(&lines), vec![2, 1]);
    }

    #[test]
    fn test_no_reordering() {
        // A word back on an earlier row opens a new line rather than rejoining
        let lines = ToleranceClustering::default().group(&measured(&[100.0, 200.0, 100.0]));
        assert_eq!(sizes(&lines), vec![1, 1, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ToleranceClustering::default().group(&[]).is_empty());
    }

    #[test]
    fn test_custom_tolerance() {
        let lines = ToleranceClustering::new(30.0).group(&measured(&[0.0, 20.0, 40.0]));
        assert_eq!(sizes(&lines), vec![2, 1]);
    }
}
