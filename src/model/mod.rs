//! Document model types for rendered page snapshots.
//!
//! This module defines the tree the reformatting stages mutate. It stands
//! in for the host's live document: elements with ordered attributes, text
//! leaves and comments, addressed by stable [`NodeId`] handles.

mod document;
mod node;
pub mod style;

pub use document::{Descendants, Document};
pub use node::{Element, Node, NodeId, NodeKind};
