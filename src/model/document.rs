//! Document-level types.

use super::node::{Element, Node, NodeId, NodeKind};
use super::style;

/// An owned, arena-backed document tree.
///
/// All nodes live in one arena and are addressed by [`NodeId`]. The tree
/// has exactly one root element; replacing or removing a node detaches it
/// from the tree but keeps it in the arena, so outstanding handles never
/// dangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    doctype: Option<String>,
}

impl Document {
    /// Create a document whose root element has the given tag.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Element(Element::new(root_tag)))],
            root: NodeId(0),
            doctype: None,
        }
    }

    /// Create an empty `<html><head/><body/></html>` skeleton.
    pub fn html() -> Self {
        let mut doc = Self::new("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.append_child(doc.root, head);
        doc.append_child(doc.root, body);
        doc
    }

    /// Get the root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the doctype declaration content, if any (e.g. `html`).
    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    /// Set the doctype declaration content.
    pub fn set_doctype(&mut self, doctype: Option<String>) {
        self.doctype = doctype;
    }

    /// Number of nodes in the arena, including detached ones.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by handle.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Get the children of a node in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` at `index` among the children of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Replace `old` with `replacements` at the same position.
    ///
    /// Returns `false` and changes nothing when `old` is detached.
    pub fn replace_with(&mut self, old: NodeId, replacements: &[NodeId]) -> bool {
        let Some(parent) = self.nodes[old.0].parent else {
            return false;
        };

        for &node in replacements {
            self.detach(node);
        }

        let Some(pos) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == old)
        else {
            return false;
        };

        for &node in replacements {
            self.nodes[node.0].parent = Some(parent);
        }
        self.nodes[parent.0]
            .children
            .splice(pos..pos + 1, replacements.iter().copied());
        self.nodes[old.0].parent = None;
        true
    }

    /// Detach a node from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Check whether a node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).any(|a| a == self.root)
    }

    /// Iterate over the descendants of `id` in pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Iterate over `id` followed by its descendants in pre-order.
    pub fn traverse(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Iterate over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// Get element data for a node.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Get mutable element data for a node.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Get the tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Get the value of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get mutable access to the value of a text node.
    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get an attribute of an element node.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    /// Set an attribute on an element node. Ignored for non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    /// Remove an attribute from an element node.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id).and_then(|el| el.remove_attr(name))
    }

    /// Read one property from an element's inline style.
    pub fn style_property(&self, id: NodeId, name: &str) -> Option<String> {
        self.attr(id, "style")
            .and_then(|style| style::get_property(style, name))
    }

    /// Set one property in an element's inline style.
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            let updated = style::set_property(el.attr("style").unwrap_or(""), name, value);
            el.set_attr("style", updated);
        }
    }

    /// Collect attached elements whose tag is in `tags`, in document order.
    pub fn query_tags(&self, tags: &[&str]) -> Vec<NodeId> {
        self.traverse(self.root)
            .filter(|&id| {
                self.element(id)
                    .is_some_and(|el| tags.iter().any(|t| el.has_tag(t)))
            })
            .collect()
    }

    /// Collect attached elements carrying `name="value"`, in document order.
    pub fn query_attr(&self, name: &str, value: &str) -> Vec<NodeId> {
        self.traverse(self.root)
            .filter(|&id| self.attr(id, name) == Some(value))
            .collect()
    }

    /// Find the first attached element with the given `id` attribute.
    pub fn element_by_id(&self, id_value: &str) -> Option<NodeId> {
        self.traverse(self.root)
            .find(|&id| self.attr(id, "id") == Some(id_value))
    }

    /// Find the first attached element with the given tag.
    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        self.traverse(self.root)
            .find(|&id| self.element(id).is_some_and(|el| el.has_tag(tag)))
    }

    /// Get the `head` element.
    pub fn head(&self) -> Option<NodeId> {
        self.find_first("head")
    }

    /// Get the `body` element.
    pub fn body(&self) -> Option<NodeId> {
        self.find_first("body")
    }

    /// Get the `head` element, creating it as the root's first child if absent.
    pub fn ensure_head(&mut self) -> NodeId {
        if let Some(head) = self.head() {
            return head;
        }
        let head = self.create_element("head");
        self.insert_child(self.root, 0, head);
        head
    }

    /// The element whose computed text color represents the page: `body`,
    /// falling back to the root.
    pub fn content_root(&self) -> NodeId {
        self.body().unwrap_or(self.root)
    }

    /// Concatenate all text beneath (and including) a node.
    pub fn text_content(&self, id: NodeId) -> String {
        self.traverse(id)
            .filter_map(|n| self.text(n))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::html()
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}
