//! XHTML serialization of a document tree.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Document, NodeId, NodeKind};

/// Elements serialized as `<tag/>` when they have no children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Options for XHTML output.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Emit the `<!DOCTYPE ...>` line when the document has one
    pub include_doctype: bool,

    /// Emit an `<?xml version="1.0" encoding="UTF-8"?>` declaration first
    pub xml_declaration: bool,
}

impl HtmlOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the doctype line.
    pub fn with_doctype(mut self, include: bool) -> Self {
        self.include_doctype = include;
        self
    }

    /// Enable or disable the XML declaration.
    pub fn with_xml_declaration(mut self, include: bool) -> Self {
        self.xml_declaration = include;
        self
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            include_doctype: true,
            xml_declaration: false,
        }
    }
}

/// Serialize a document to XHTML with default options.
pub fn to_html(doc: &Document) -> String {
    to_html_with_options(doc, &HtmlOptions::default())
}

/// Serialize a document to XHTML.
pub fn to_html_with_options(doc: &Document, options: &HtmlOptions) -> String {
    let mut out = String::new();
    if options.xml_declaration {
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    }
    if options.include_doctype {
        if let Some(doctype) = doc.doctype() {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype);
            out.push('>');
        }
    }
    write_node(doc, doc.root(), &mut out);
    out
}

/// Serialize a document to a writer.
///
/// Fails with [`Error::Render`] when a comment cannot be written as
/// well-formed XHTML (it contains `--` or ends with `-`).
pub fn write_html<W: Write>(doc: &Document, options: &HtmlOptions, mut writer: W) -> Result<()> {
    for id in doc.traverse(doc.root()) {
        if let NodeKind::Comment(text) = &doc.node(id).kind {
            if text.contains("--") || text.ends_with('-') {
                return Err(Error::Render(format!(
                    "comment {:?} is not valid in XHTML",
                    text
                )));
            }
        }
    }

    writer.write_all(to_html_with_options(doc, options).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Serialize a document to a file.
pub fn save_html<P: AsRef<Path>>(doc: &Document, options: &HtmlOptions, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_html(doc, options, std::io::BufWriter::new(file))
}

/// Serialize one subtree to XHTML.
pub fn node_to_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

/// Serialize the children of a node (its "inner HTML").
pub fn inner_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for &child in doc.children(id) {
        write_node(doc, child, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match &doc.node(id).kind {
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeKind::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in &el.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }

            let children = doc.children(id);
            if children.is_empty()
                && VOID_ELEMENTS
                    .iter()
                    .any(|v| el.tag.eq_ignore_ascii_case(v))
            {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for &child in children {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

/// Escape text content for XHTML output.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for double-quoted XHTML output.
pub fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
