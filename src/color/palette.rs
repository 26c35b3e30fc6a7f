//! Light and dark palettes and background detection.

use serde::{Deserialize, Serialize};

use super::rgb::{parse_css_color, Rgb};

/// Luminance above which text is considered bright (dark background).
pub const LUMINANCE_MIDPOINT: f64 = 128.0;

/// Inferred page background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Dark text on a light background
    #[default]
    Light,
    /// Bright text on a dark background
    Dark,
}

/// Gradient endpoints and the mid-cycle anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Red-family endpoint
    pub warm: Rgb,
    /// Blue-family endpoint
    pub cool: Rgb,
    /// Black or white, matching the page text
    pub anchor: Rgb,
}

impl Palette {
    /// Pure red and blue through black.
    pub const LIGHT: Palette = Palette {
        warm: Rgb::new(255, 0, 0),
        cool: Rgb::new(0, 0, 255),
        anchor: Rgb::BLACK,
    };

    /// Lightened red and blue through white, visible on dark backgrounds.
    pub const DARK: Palette = Palette {
        warm: Rgb::new(255, 60, 60),
        cool: Rgb::new(80, 80, 255),
        anchor: Rgb::WHITE,
    };

    /// Default palette for a background mode.
    pub fn for_mode(mode: BackgroundMode) -> Self {
        match mode {
            BackgroundMode::Light => Self::LIGHT,
            BackgroundMode::Dark => Self::DARK,
        }
    }
}

/// Infer the background mode from the computed text color.
///
/// Missing or unparseable colors fall back to [`BackgroundMode::Light`].
pub fn detect_mode(foreground: Option<&str>, threshold: f64) -> BackgroundMode {
    let Some(raw) = foreground else {
        log::debug!("No foreground color available, assuming light background");
        return BackgroundMode::Light;
    };

    match parse_css_color(raw) {
        Some(color) if color.luminance() > threshold => BackgroundMode::Dark,
        Some(_) => BackgroundMode::Light,
        None => {
            log::warn!("Unparseable foreground color {:?}, assuming light background", raw);
            BackgroundMode::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bright_text_means_dark_mode() {
        let mode = detect_mode(Some("rgb(230, 230, 230)"), LUMINANCE_MIDPOINT);
        assert_eq!(mode, BackgroundMode::Dark);

        let palette = Palette::for_mode(mode);
        assert_eq!(palette.anchor, Rgb::WHITE);
        assert_eq!(palette.warm, Rgb::new(255, 60, 60));
        assert_eq!(palette.cool, Rgb::new(80, 80, 255));
    }

    #[test]
    fn test_dark_text_means_light_mode() {
        let mode = detect_mode(Some("rgb(33, 33, 33)"), LUMINANCE_MIDPOINT);
        assert_eq!(mode, BackgroundMode::Light);
        assert_eq!(Palette::for_mode(mode).anchor, Rgb::BLACK);
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(
            detect_mode(Some("rgb(127, 127, 127)"), LUMINANCE_MIDPOINT),
            BackgroundMode::Light
        );
        assert_eq!(
            detect_mode(Some("rgb(129, 129, 129)"), LUMINANCE_MIDPOINT),
            BackgroundMode::Dark
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(detect_mode(None, LUMINANCE_MIDPOINT), BackgroundMode::Light);
        assert_eq!(
            detect_mode(Some("not-a-color"), LUMINANCE_MIDPOINT),
            BackgroundMode::Light
        );
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BackgroundMode::Dark).unwrap(),
            "\"dark\""
        );
    }
}
