//! Rendered geometry primitives.

use serde::{Deserialize, Serialize};

/// A viewport-relative bounding box, in layout units.
///
/// Deserializes from `DOMRect`-like JSON: `x`/`y` may also be spelled
/// `left`/`top`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    #[serde(alias = "left")]
    pub x: f64,
    /// Top edge
    #[serde(alias = "top")]
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge relative to the viewport.
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Top edge relative to the page origin, given the vertical scroll.
    pub fn absolute_top(&self, scroll_y: f64) -> f64 {
        self.y + scroll_y
    }

    /// A box with zero width or height was not rendered.
    pub fn is_rendered(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }
}
