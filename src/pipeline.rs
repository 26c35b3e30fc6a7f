//! Running commands against a document.
//!
//! An apply is two-phase: all segmentation mutations happen first, then
//! the host flushes layout, and only the resulting view is read for
//! geometry.

use serde::{Deserialize, Serialize};

use crate::color::{ColorizeOptions, ColorizeStats, Colorizer};
use crate::command::{Command, Settings};
use crate::font::set_font_override;
use crate::layout::LayoutHost;
use crate::model::Document;
use crate::reset::{reset_regions, ResetStats};
use crate::segment::{SegmentOptions, SegmentStats, Segmenter};

/// Summary of one apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Settings the apply ran with
    pub settings: Settings,

    /// Segmentation counts
    pub segment: SegmentStats,

    /// Coloring counts, absent when coloring was off
    pub colorize: Option<ColorizeStats>,

    /// Whether the font rule is present afterwards
    pub font: bool,
}

/// Result of dispatching a [`Command`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Outcome {
    /// An apply ran
    Apply(ApplyReport),
    /// A reset ran
    Reset(ResetStats),
}

/// Segmenter, colorizer and font stages wired together.
#[derive(Debug, Default)]
pub struct Pipeline {
    segment_options: SegmentOptions,
    colorizer: Colorizer,
}

impl Pipeline {
    /// Create a pipeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segmentation options. The emphasis flag is overridden per
    /// apply by [`Settings::bionic`].
    pub fn with_segment_options(mut self, options: SegmentOptions) -> Self {
        self.segment_options = options;
        self
    }

    /// Set the coloring options.
    pub fn with_colorize_options(mut self, options: ColorizeOptions) -> Self {
        self.colorizer = Colorizer::new(options);
        self
    }

    /// Use a custom colorizer (for example one with its own line strategy).
    pub fn with_colorizer(mut self, colorizer: Colorizer) -> Self {
        self.colorizer = colorizer;
        self
    }

    /// Segment, then flush and color if enabled, then set the font rule.
    pub fn apply<H>(&self, doc: &mut Document, settings: &Settings, host: &mut H) -> ApplyReport
    where
        H: LayoutHost + ?Sized,
    {
        let segmenter = Segmenter::new(
            self.segment_options
                .clone()
                .with_emphasis(settings.bionic),
        );
        let segment = segmenter.segment(doc);

        let colorize = if settings.beeline {
            let view = host.flush(doc);
            Some(self.colorizer.colorize(doc, &view))
        } else {
            None
        };

        set_font_override(doc, settings.font);

        log::info!(
            "Applied (bionic={}, beeline={}, font={})",
            settings.bionic,
            settings.beeline,
            settings.font
        );

        ApplyReport {
            settings: *settings,
            segment,
            colorize,
            font: settings.font,
        }
    }

    /// Undo all processing, clearing flags on this pipeline's region tags.
    pub fn reset(&self, doc: &mut Document) -> ResetStats {
        let tags: Vec<&str> = self
            .segment_options
            .region_tags
            .iter()
            .map(String::as_str)
            .collect();
        reset_regions(doc, &tags)
    }

    /// Run a decoded command.
    pub fn dispatch<H>(&self, command: &Command, doc: &mut Document, host: &mut H) -> Outcome
    where
        H: LayoutHost + ?Sized,
    {
        match command {
            Command::Apply { settings } => Outcome::Apply(self.apply(doc, settings, host)),
            Command::Reset => Outcome::Reset(self.reset(doc)),
        }
    }
}

/// Apply `settings` with a default pipeline.
pub fn apply<H>(doc: &mut Document, settings: &Settings, host: &mut H) -> ApplyReport
where
    H: LayoutHost + ?Sized,
{
    Pipeline::new().apply(doc, settings, host)
}

/// Run `command` with a default pipeline.
pub fn dispatch<H>(command: &Command, doc: &mut Document, host: &mut H) -> Outcome
where
    H: LayoutHost + ?Sized,
{
    Pipeline::new().dispatch(command, doc, host)
}
