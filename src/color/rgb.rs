//! RGB colors and CSS color parsing.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// White.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceptual luminance on a 0–255 scale (`0.299R + 0.587G + 0.114B`).
    pub fn luminance(&self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    /// Channels as floats, for interpolation.
    pub(crate) fn channels(&self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Parse a computed CSS color.
///
/// Accepts `rgb()`/`rgba()` in comma or space syntax, `#rgb`, `#rrggbb`
/// (alpha digits are ignored), and the keywords `black` and `white`.
/// Channel values are rounded and clamped to 0–255. Returns `None` for
/// anything else.
pub fn parse_css_color(input: &str) -> Option<Rgb> {
    let value = input.trim().to_ascii_lowercase();

    match value.as_str() {
        "black" => return Some(Rgb::BLACK),
        "white" => return Some(Rgb::WHITE),
        _ => {}
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    let re = Regex::new(
        r"^rgba?\(\s*([0-9.]+)[\s,]+([0-9.]+)[\s,]+([0-9.]+)\s*(?:[,/]\s*[0-9.]+%?\s*)?\)$",
    )
    .ok()?;
    let caps = re.captures(&value)?;
    let channel = |i: usize| -> Option<u8> {
        let v: f64 = caps.get(i)?.as_str().parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let pair = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 | 4 => {
            let digit = |i: usize| pair(&hex[i..i + 1]).map(|d| d * 17);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 | 8 => Some(Rgb::new(
            pair(&hex[0..2])?,
            pair(&hex[2..4])?,
            pair(&hex[4..6])?,
        )),
        _ => None,
    }
}
