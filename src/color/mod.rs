//! Gradient coloring of measured word units.
//!
//! Colors are chosen per visual line from a four-phase cycle between a
//! warm, an anchor and a cool color. The anchor follows the detected
//! background: black on light pages, white on dark ones.

mod colorizer;
mod gradient;
mod palette;
mod rgb;

pub use colorizer::{colorize, ColorizeOptions, ColorizeStats, Colorizer};
pub use gradient::{gradient_color, lerp, progress, Phase};
pub use palette::{detect_mode, BackgroundMode, Palette, LUMINANCE_MIDPOINT};
pub use rgb::{parse_css_color, Rgb};
