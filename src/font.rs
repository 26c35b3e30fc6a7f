//! Global font override.
//!
//! The override is a single `<style>` element in `head`, identified by
//! [`FONT_STYLE_ID`]. [`StyleRule`] manages any such id-keyed rule.

use crate::model::{Document, NodeId};

/// Id of the injected font style element.
pub const FONT_STYLE_ID: &str = "beeline-font-style";

/// Attribute marking a `head` element inserted to hold a rule.
pub const INSERTED_HEAD_ATTR: &str = "data-beeline-head";

/// Stylesheet forcing a serif reading font.
pub const FONT_CSS: &str = "body, p, li, h1, h2, h3, h4, h5, h6, span, div, td, a { font-family: 'Georgia', serif !important; }";

/// An idempotent handle to one global `<style>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    id: String,
    css: String,
}

impl StyleRule {
    /// Create a handle for a rule with the given element id and contents.
    pub fn new(id: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            css: css.into(),
        }
    }

    /// The font override rule.
    pub fn font_override() -> Self {
        Self::new(FONT_STYLE_ID, FONT_CSS)
    }

    /// Element id of this rule.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stylesheet text of this rule.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Check if the rule is present in `doc`.
    pub fn is_present(&self, doc: &Document) -> bool {
        self.find(doc).is_some()
    }

    /// Insert the rule into `head` unless already present.
    ///
    /// Returns the style element.
    pub fn ensure_present(&self, doc: &mut Document) -> NodeId {
        if let Some(existing) = self.find(doc) {
            return existing;
        }

        let head = match doc.head() {
            Some(head) => head,
            None => {
                let head = doc.ensure_head();
                doc.set_attr(head, INSERTED_HEAD_ATTR, "true");
                head
            }
        };
        let style = doc.create_element("style");
        doc.set_attr(style, "id", &self.id);
        let text = doc.create_text(self.css.as_str());
        doc.append_child(style, text);
        doc.append_child(head, style);

        log::debug!("Inserted style rule #{}", self.id);
        style
    }

    /// Remove the rule if present. Returns whether anything was removed.
    ///
    /// A `head` inserted by [`StyleRule::ensure_present`] is dropped again
    /// once it has no children left.
    pub fn ensure_absent(&self, doc: &mut Document) -> bool {
        let mut removed = false;
        while let Some(existing) = self.find(doc) {
            let parent = doc.parent(existing);
            doc.detach(existing);
            if let Some(head) = parent {
                drop_inserted_head(doc, head);
            }
            removed = true;
        }
        if removed {
            log::debug!("Removed style rule #{}", self.id);
        }
        removed
    }

    fn find(&self, doc: &Document) -> Option<NodeId> {
        doc.traverse(doc.root()).find(|&node| {
            doc.attr(node, "id") == Some(self.id.as_str())
                && doc.element(node).is_some_and(|el| el.has_tag("style"))
        })
    }
}

fn drop_inserted_head(doc: &mut Document, head: NodeId) {
    if doc.attr(head, INSERTED_HEAD_ATTR).is_some() && doc.children(head).is_empty() {
        doc.detach(head);
        log::debug!("Removed inserted head");
    }
}

/// Enable or disable the font override on `doc`.
pub fn set_font_override(doc: &mut Document, enabled: bool) {
    let rule = StyleRule::font_override();
    if enabled {
        rule.ensure_present(doc);
    } else {
        rule.ensure_absent(doc);
    }
}
