//! Layout access and line grouping.
//!
//! Geometry is read through [`RenderedView`], which can only be obtained
//! from a [`LayoutHost`] flush. Measured words are clustered into visual
//! lines by a pluggable [`LineStrategy`].

mod geometry;
mod lines;
mod view;

pub use geometry::Rect;
pub use lines::{Line, LineStrategy, MeasuredWord, ToleranceClustering, DEFAULT_LINE_TOLERANCE};
pub use view::{BoundGeometry, GeometrySnapshot, LayoutHost, RenderedView};
