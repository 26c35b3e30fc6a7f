//! The four-phase line gradient.

use serde::{Deserialize, Serialize};

use super::palette::Palette;
use super::rgb::Rgb;

/// One segment of the repeating gradient cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// warm → anchor
    WarmToAnchor,
    /// anchor → cool
    AnchorToCool,
    /// cool → anchor
    CoolToAnchor,
    /// anchor → warm
    AnchorToWarm,
}

impl Phase {
    /// Phase of the line at `index` (`index mod 4`).
    pub fn for_line(index: usize) -> Self {
        match index % 4 {
            0 => Phase::WarmToAnchor,
            1 => Phase::AnchorToCool,
            2 => Phase::CoolToAnchor,
            _ => Phase::AnchorToWarm,
        }
    }

    /// Start and end colors of this phase.
    pub fn endpoints(self, palette: &Palette) -> (Rgb, Rgb) {
        match self {
            Phase::WarmToAnchor => (palette.warm, palette.anchor),
            Phase::AnchorToCool => (palette.anchor, palette.cool),
            Phase::CoolToAnchor => (palette.cool, palette.anchor),
            Phase::AnchorToWarm => (palette.anchor, palette.warm),
        }
    }
}

/// Normalized position of member `position` in a line of `count` words.
///
/// Single-word lines sit at 0.
pub fn progress(position: usize, count: usize) -> f64 {
    if count > 1 {
        position as f64 / (count - 1) as f64
    } else {
        0.0
    }
}

/// Per-channel linear interpolation, floored to integers.
pub fn lerp(start: Rgb, end: Rgb, t: f64) -> Rgb {
    let s = start.channels();
    let e = end.channels();
    let channel = |i: usize| (s[i] + (e[i] - s[i]) * t).floor().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(0), channel(1), channel(2))
}

/// Color of word `position` of `count` on line `line_index`.
pub fn gradient_color(palette: &Palette, line_index: usize, position: usize, count: usize) -> Rgb {
    let (start, end) = Phase::for_line(line_index).endpoints(palette);
    lerp(start, end, progress(position, count))
}
