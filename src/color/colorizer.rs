//! Post-layout line grouping and gradient coloring.

use serde::{Deserialize, Serialize};

use crate::layout::{
    LineStrategy, MeasuredWord, Rect, RenderedView, ToleranceClustering, DEFAULT_LINE_TOLERANCE,
};
use crate::model::Document;
use crate::segment::word_units;

use super::gradient::gradient_color;
use super::palette::{detect_mode, BackgroundMode, Palette, LUMINANCE_MIDPOINT};

/// Options for coloring.
#[derive(Debug, Clone)]
pub struct ColorizeOptions {
    /// Vertical tolerance for the default line strategy
    pub tolerance: f64,

    /// Palette used on light backgrounds
    pub light_palette: Palette,

    /// Palette used on dark backgrounds
    pub dark_palette: Palette,

    /// Text luminance above which the background is considered dark
    pub luminance_threshold: f64,
}

impl ColorizeOptions {
    /// Create new colorize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the light-background palette.
    pub fn with_light_palette(mut self, palette: Palette) -> Self {
        self.light_palette = palette;
        self
    }

    /// Set the dark-background palette.
    pub fn with_dark_palette(mut self, palette: Palette) -> Self {
        self.dark_palette = palette;
        self
    }

    /// Set the luminance threshold.
    pub fn with_luminance_threshold(mut self, threshold: f64) -> Self {
        self.luminance_threshold = threshold;
        self
    }

    /// Palette for a background mode.
    pub fn palette(&self, mode: BackgroundMode) -> &Palette {
        match mode {
            BackgroundMode::Light => &self.light_palette,
            BackgroundMode::Dark => &self.dark_palette,
        }
    }
}

impl Default for ColorizeOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_LINE_TOLERANCE,
            light_palette: Palette::LIGHT,
            dark_palette: Palette::DARK,
            luminance_threshold: LUMINANCE_MIDPOINT,
        }
    }
}

/// Counts collected during one coloring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorizeStats {
    /// Word units found by marker
    pub words_found: u32,

    /// Word units with a rendered box (these are colored)
    pub words_measured: u32,

    /// Word units without a box or with a zero-size box
    pub words_hidden: u32,

    /// Visual lines detected
    pub lines: u32,

    /// Detected background, `None` when there was nothing to color
    pub mode: Option<BackgroundMode>,
}

/// Colors word units along a four-phase gradient, line by line.
pub struct Colorizer {
    options: ColorizeOptions,
    strategy: Box<dyn LineStrategy>,
}

impl Colorizer {
    /// Create a colorizer using tolerance clustering.
    pub fn new(options: ColorizeOptions) -> Self {
        let strategy = Box::new(ToleranceClustering::new(options.tolerance));
        Self { options, strategy }
    }

    /// Replace the line strategy.
    pub fn with_strategy(mut self, strategy: impl LineStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Get the options in use.
    pub fn options(&self) -> &ColorizeOptions {
        &self.options
    }

    /// Color every rendered word unit of `doc`.
    ///
    /// `view` must come from a layout flush taken after segmentation.
    /// Always recolors in full; previous colors are overwritten.
    pub fn colorize<V>(&self, doc: &mut Document, view: &V) -> ColorizeStats
    where
        V: RenderedView + ?Sized,
    {
        let units = word_units(doc);
        let mut stats = ColorizeStats {
            words_found: units.len() as u32,
            ..Default::default()
        };
        if units.is_empty() {
            log::debug!("No word units to color");
            return stats;
        }

        let scroll_y = view.scroll_y();
        let measured: Vec<MeasuredWord> = units
            .iter()
            .filter_map(|&node| {
                let rect = view.bounding_rect(node).filter(Rect::is_rendered)?;
                Some(MeasuredWord::new(node, rect.absolute_top(scroll_y)))
            })
            .collect();
        stats.words_measured = measured.len() as u32;
        stats.words_hidden = stats.words_found - stats.words_measured;

        let lines = self.strategy.group(&measured);
        stats.lines = lines.len() as u32;

        let foreground = view.foreground_color(doc.content_root());
        let mode = detect_mode(foreground.as_deref(), self.options.luminance_threshold);
        stats.mode = Some(mode);
        let palette = self.options.palette(mode);

        for (index, line) in lines.iter().enumerate() {
            let count = line.len();
            for (position, &node) in line.words.iter().enumerate() {
                let color = gradient_color(palette, index, position, count);
                doc.set_style_property(node, "color", &color.to_string());
            }
        }

        log::debug!(
            "Colored {} of {} words on {} lines ({:?} mode)",
            stats.words_measured,
            stats.words_found,
            stats.lines,
            mode
        );
        stats
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new(ColorizeOptions::default())
    }
}

impl std::fmt::Debug for Colorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Colorizer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Color `doc` with default options.
pub fn colorize<V>(doc: &mut Document, view: &V) -> ColorizeStats
where
    V: RenderedView + ?Sized,
{
    Colorizer::default().colorize(doc, view)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;
    use crate::layout::{BoundGeometry, Line};
    use crate::model::NodeId;
    use crate::parser::XhtmlParser;
    use crate::segment::segment;

    fn segmented(source: &str) -> Document {
        let mut doc = XhtmlParser::from_string(source).parse().unwrap();
        segment(&mut doc, false);
        doc
    }

    fn view_with_tops(doc: &Document, tops: &[f64], foreground: Option<&str>) -> BoundGeometry {
        let rects: HashMap<NodeId, Rect> = word_units(doc)
            .into_iter()
            .zip(tops)
            .map(|(node, &top)| (node, Rect::new(0.0, top, 10.0, 10.0)))
            .collect();
        BoundGeometry::new(rects, 0.0, foreground.map(str::to_string))
    }

    fn colors(doc: &Document) -> Vec<Option<String>> {
        word_units(doc)
            .into_iter()
            .map(|n| doc.style_property(n, "color"))
            .collect()
    }

    struct CountingView {
        reads: Cell<usize>,
    }

    impl RenderedView for CountingView {
        fn bounding_rect(&self, _node: NodeId) -> Option<Rect> {
            self.reads.set(self.reads.get() + 1);
            None
        }

        fn scroll_y(&self) -> f64 {
            self.reads.set(self.reads.get() + 1);
            0.0
        }

        fn foreground_color(&self, _node: NodeId) -> Option<String> {
            self.reads.set(self.reads.get() + 1);
            None
        }
    }

    #[test]
    fn test_single_line_gradient() {
        let mut doc = segmented("<body><p>a b c d e</p></body>");
        let view = view_with_tops(&doc, &[100.0; 5], None);

        let stats = colorize(&mut doc, &view);
        assert_eq!(stats.words_found, 5);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.mode, Some(BackgroundMode::Light));

        let colors = colors(&doc);
        assert_eq!(colors[0].as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(colors[2].as_deref(), Some("rgb(127, 0, 0)"));
        assert_eq!(colors[4].as_deref(), Some("rgb(0, 0, 0)"));
    }

    #[test]
    fn test_second_line_uses_next_phase() {
        let mut doc = segmented("<body><p>a b c d</p></body>");
        let view = view_with_tops(&doc, &[100.0, 102.0, 250.0, 252.0], None);

        let stats = colorize(&mut doc, &view);
        assert_eq!(stats.lines, 2);

        let colors = colors(&doc);
        assert_eq!(colors[1].as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(colors[2].as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(colors[3].as_deref(), Some("rgb(0, 0, 255)"));
    }

    #[test]
    fn test_dark_mode_from_foreground() {
        let mut doc = segmented("<body><p>one</p></body>");
        let view = view_with_tops(&doc, &[0.0], Some("rgb(230, 230, 230)"));

        let stats = colorize(&mut doc, &view);
        assert_eq!(stats.mode, Some(BackgroundMode::Dark));
        assert_eq!(colors(&doc)[0].as_deref(), Some("rgb(255, 60, 60)"));
    }

    #[test]
    fn test_hidden_units_stay_uncolored() {
        let mut doc = segmented("<body><p>seen hidden gone</p></body>");
        let units = word_units(&doc);
        let mut rects = HashMap::new();
        rects.insert(units[0], Rect::new(0.0, 0.0, 10.0, 10.0));
        rects.insert(units[1], Rect::new(0.0, 0.0, 0.0, 10.0));
        let view = BoundGeometry::new(rects, 0.0, None);

        let stats = colorize(&mut doc, &view);
        assert_eq!(stats.words_measured, 1);
        assert_eq!(stats.words_hidden, 2);

        let colors = colors(&doc);
        assert!(colors[0].is_some());
        assert_eq!(colors[1], None);
        assert_eq!(colors[2], None);
    }

    #[test]
    fn test_scroll_offset_is_added() {
        let mut doc = segmented("<body><p>a b</p></body>");
        let units = word_units(&doc);
        let mut rects = HashMap::new();
        // Same absolute top once scroll is applied to both
        rects.insert(units[0], Rect::new(0.0, 5.0, 10.0, 10.0));
        rects.insert(units[1], Rect::new(20.0, 5.0, 10.0, 10.0));
        let view = BoundGeometry::new(rects, 400.0, None);

        let stats = colorize(&mut doc, &view);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_zero_units_reads_no_geometry() {
        let mut doc = segmented("<body><div>not a region</div></body>");
        let view = CountingView {
            reads: Cell::new(0),
        };

        let stats = colorize(&mut doc, &view);
        assert_eq!(stats, ColorizeStats::default());
        assert_eq!(view.reads.get(), 0);
    }

    #[test]
    fn test_only_color_is_touched() {
        let mut doc = segmented("<body><p>word</p></body>");
        let unit = word_units(&doc)[0];
        doc.set_style_property(unit, "font-weight", "bold");
        let view = view_with_tops(&doc, &[0.0], None);

        colorize(&mut doc, &view);
        assert_eq!(doc.style_property(unit, "font-weight").as_deref(), Some("bold"));
        assert_eq!(doc.style_property(unit, "color").as_deref(), Some("rgb(255, 0, 0)"));
    }

    #[test]
    fn test_rerun_overwrites_colors() {
        let mut doc = segmented("<body><p>a b</p></body>");
        let first = view_with_tops(&doc, &[0.0, 0.0], None);
        colorize(&mut doc, &first);

        // Reflowed: the second word moved to its own line
        let second = view_with_tops(&doc, &[0.0, 50.0], None);
        let stats = colorize(&mut doc, &second);
        assert_eq!(stats.lines, 2);
        assert_eq!(colors(&doc)[1].as_deref(), Some("rgb(0, 0, 0)"));
    }

    #[test]
    fn test_custom_strategy() {
        struct OneLinePerWord;

        impl LineStrategy for OneLinePerWord {
            fn group(&self, words: &[MeasuredWord]) -> Vec<Line> {
                words
                    .iter()
                    .map(|w| Line {
                        words: vec![w.node],
                        top: w.top,
                    })
                    .collect()
            }
        }

        let mut doc = segmented("<body><p>a b c</p></body>");
        let view = view_with_tops(&doc, &[0.0; 3], None);
        let colorizer = Colorizer::default().with_strategy(OneLinePerWord);

        let stats = colorizer.colorize(&mut doc, &view);
        assert_eq!(stats.lines, 3);
        let colors = colors(&doc);
        assert_eq!(colors[0].as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(colors[1].as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(colors[2].as_deref(), Some("rgb(0, 0, 255)"));
    }

    #[test]
    fn test_options_builders() {
        let options = ColorizeOptions::new()
            .with_tolerance(4.0)
            .with_luminance_threshold(200.0);
        assert_eq!(options.tolerance, 4.0);
        assert_eq!(options.luminance_threshold, 200.0);
        assert_eq!(options.palette(BackgroundMode::Dark), &Palette::DARK);
    }
}
