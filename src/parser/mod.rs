//! XHTML snapshot parsing module.

mod options;
mod xhtml_parser;

pub use options::{ErrorMode, ParseOptions};
pub use xhtml_parser::XhtmlParser;
