//! Rendering module for writing documents back out.

mod html;

pub use html::{
    escape_attr, escape_text, inner_html, node_to_html, save_html, to_html, to_html_with_options,
    write_html, HtmlOptions,
};
