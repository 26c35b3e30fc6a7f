//! The boundary between document mutation and geometry reads.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Document, NodeId};
use crate::segment::word_units;

use super::geometry::Rect;

/// Read-only access to a laid-out document.
///
/// A view is only obtainable from [`LayoutHost::flush`], so every geometry
/// read reflects the tree as it stood when layout was flushed.
pub trait RenderedView {
    /// Viewport-relative bounding box of a node, or `None` if it has no box.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;

    /// Computed foreground color of a node as a CSS color string.
    fn foreground_color(&self, node: NodeId) -> Option<String>;
}

/// A rendering host that lays out a mutated document.
pub trait LayoutHost {
    /// The view produced by a flush.
    type View: RenderedView;

    /// Commit all pending mutations of `doc` to layout and return a view.
    fn flush(&mut self, doc: &Document) -> Self::View;
}

/// Geometry captured from a real renderer, in word-unit document order.
///
/// Used where no live renderer is available: the host measures the word
/// units once after segmentation and hands the boxes back as JSON.
///
/// ```json
/// {
///   "scroll_y": 120.0,
///   "foreground": "rgb(230, 230, 230)",
///   "words": [{"x": 8, "y": 20, "width": 31, "height": 18}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Vertical scroll offset at capture time
    #[serde(default)]
    pub scroll_y: f64,

    /// Computed foreground color of the content root
    #[serde(default)]
    pub foreground: Option<String>,

    /// One box per word unit, in document order
    #[serde(default)]
    pub words: Vec<Rect>,
}

impl GeometrySnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scroll offset.
    pub fn with_scroll_y(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Set the computed foreground color.
    pub fn with_foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    /// Set the word boxes.
    pub fn with_words(mut self, words: Vec<Rect>) -> Self {
        self.words = words;
        self
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl LayoutHost for GeometrySnapshot {
    type View = BoundGeometry;

    fn flush(&mut self, doc: &Document) -> BoundGeometry {
        let units = word_units(doc);
        if units.len() != self.words.len() {
            log::warn!(
                "Geometry snapshot has {} boxes for {} word units; unmatched units are treated as hidden",
                self.words.len(),
                units.len()
            );
        }

        let rects = units.into_iter().zip(self.words.iter().copied()).collect();
        BoundGeometry::new(rects, self.scroll_y, self.foreground.clone())
    }
}

/// A snapshot bound to the word units of one document.
#[derive(Debug, Clone, Default)]
pub struct BoundGeometry {
    rects: HashMap<NodeId, Rect>,
    scroll_y: f64,
    foreground: Option<String>,
}

impl BoundGeometry {
    /// Create a view from per-node boxes.
    pub fn new(rects: HashMap<NodeId, Rect>, scroll_y: f64, foreground: Option<String>) -> Self {
        Self {
            rects,
            scroll_y,
            foreground,
        }
    }

    /// Number of nodes with a box.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Check if no node has a box.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl RenderedView for BoundGeometry {
    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(&node).copied()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn foreground_color(&self, _node: NodeId) -> Option<String> {
        self.foreground.clone()
    }
}
