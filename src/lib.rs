//! # beeline
//!
//! Reading-aid reformatter for XHTML documents.
//!
//! This library rewrites the text of block-level regions so every word is
//! an addressable unit, optionally bolds the first half of each word
//! ("bionic" emphasis), and colors words along a gradient that changes
//! from one visual line to the next so the eye can track line breaks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use beeline::{parse_file, render, GeometrySnapshot, Settings};
//!
//! fn main() -> beeline::Result<()> {
//!     let mut doc = parse_file("page.xhtml")?;
//!
//!     // Word boxes measured by a renderer after segmentation
//!     let mut host = GeometrySnapshot::load("geometry.json")?;
//!     let report = beeline::apply(&mut doc, &Settings::default(), &mut host);
//!     println!("{} words on {:?} lines", report.segment.words_wrapped,
//!         report.colorize.map(|c| c.lines));
//!
//!     println!("{}", render::to_html(&doc));
//!     Ok(())
//! }
//! ```
//!
//! ## Stages
//!
//! - **Segment**: split region text into word units, optionally emphasized
//! - **Colorize**: group measured units into lines and apply the gradient
//! - **Font**: toggle a global serif font rule
//! - **Reset**: undo all of the above
//!
//! Geometry is only available through [`LayoutHost::flush`], which is
//! called after segmentation has finished mutating the tree.

pub mod color;
pub mod command;
pub mod error;
pub mod font;
pub mod layout;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod reset;
pub mod segment;

// Re-export commonly used types
pub use color::{
    colorize, BackgroundMode, ColorizeOptions, ColorizeStats, Colorizer, Palette, Rgb,
};
pub use command::{Command, Settings};
pub use error::{Error, Result};
pub use font::{set_font_override, StyleRule, FONT_STYLE_ID};
pub use layout::{
    GeometrySnapshot, LayoutHost, Line, LineStrategy, Rect, RenderedView, ToleranceClustering,
};
pub use model::{Document, NodeId};
pub use parser::{ErrorMode, ParseOptions, XhtmlParser};
pub use pipeline::{apply, dispatch, ApplyReport, Outcome, Pipeline};
pub use render::HtmlOptions;
pub use reset::{reset, reset_regions, ResetStats};
pub use segment::{emphasize, segment, SegmentOptions, SegmentStats, Segmenter};

use std::io::Read;
use std::path::Path;

/// Parse an XHTML file.
///
/// # Example
///
/// ```no_run
/// use beeline::parse_file;
///
/// let doc = parse_file("page.xhtml").unwrap();
/// println!("Nodes: {}", doc.arena_len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    XhtmlParser::open(path)?.parse()
}

/// Parse an XHTML file with custom options.
///
/// # Example
///
/// ```no_run
/// use beeline::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_comments(false);
/// let doc = parse_file_with_options("page.xhtml", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    XhtmlParser::open_with_options(path, options)?.parse()
}

/// Parse XHTML from a string.
///
/// # Example
///
/// ```
/// use beeline::parse_str;
///
/// let doc = parse_str("<p>Hello world</p>").unwrap();
/// assert_eq!(doc.text_content(doc.root()), "Hello world");
/// ```
pub fn parse_str(source: &str) -> Result<Document> {
    XhtmlParser::from_string(source).parse()
}

/// Parse XHTML from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    XhtmlParser::from_bytes(data)?.parse()
}

/// Parse XHTML from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    XhtmlParser::from_reader(reader)?.parse()
}

/// Builder for processing XHTML documents.
///
/// # Example
///
/// ```no_run
/// use beeline::{Beeline, GeometrySnapshot, Settings};
///
/// let mut host = GeometrySnapshot::load("geometry.json")?;
/// let html = Beeline::new()
///     .lenient()
///     .with_settings(Settings::new().with_font(true))
///     .with_tolerance(6.0)
///     .parse("page.xhtml")?
///     .apply(&mut host)
///     .to_html();
/// # Ok::<(), beeline::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Beeline {
    parse_options: ParseOptions,
    segment_options: SegmentOptions,
    colorize_options: ColorizeOptions,
    settings: Settings,
}

impl Beeline {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the preferences used by [`BeelineResult::apply`].
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the region tags to process.
    pub fn with_region_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segment_options = self.segment_options.with_region_tags(tags);
        self
    }

    /// Set the line tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.colorize_options = self.colorize_options.with_tolerance(tolerance);
        self
    }

    /// Parse an XHTML file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<BeelineResult> {
        let document = XhtmlParser::open_with_options(path, self.parse_options.clone())?.parse()?;
        Ok(self.wrap(document))
    }

    /// Parse XHTML from a string.
    pub fn parse_str(self, source: &str) -> Result<BeelineResult> {
        let document =
            XhtmlParser::from_string_with_options(source, self.parse_options.clone()).parse()?;
        Ok(self.wrap(document))
    }

    fn wrap(self, document: Document) -> BeelineResult {
        let pipeline = Pipeline::new()
            .with_segment_options(self.segment_options)
            .with_colorize_options(self.colorize_options);
        BeelineResult {
            document,
            pipeline,
            settings: self.settings,
            report: None,
        }
    }
}

/// A parsed document bound to a configured pipeline.
#[derive(Debug)]
pub struct BeelineResult {
    document: Document,
    pipeline: Pipeline,
    settings: Settings,
    report: Option<ApplyReport>,
}

impl BeelineResult {
    /// Run the configured settings against the document.
    pub fn apply<H: LayoutHost + ?Sized>(mut self, host: &mut H) -> Self {
        let report = self.pipeline.apply(&mut self.document, &self.settings, host);
        self.report = Some(report);
        self
    }

    /// Undo all processing.
    pub fn reset(mut self) -> Self {
        self.pipeline.reset(&mut self.document);
        self.report = None;
        self
    }

    /// Report of the last apply, if any.
    pub fn report(&self) -> Option<&ApplyReport> {
        self.report.as_ref()
    }

    /// Get the underlying document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consume and return the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Serialize the document to XHTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.document)
    }
}
