//! Arena-based DOM owned by a single [`Document`].
//!
//! Key properties:
//! - **indextree Arena**: all nodes of one parse live in contiguous memory,
//!   addressed by [`NodeId`] handles instead of owning pointers
//! - **Bulk deallocation**: dropping the Document frees the whole tree;
//!   only [`Document::remove_child`] releases a subtree early
//! - **Handle identity**: two `NodeId`s naming the same slot compare equal
//!   and alias the same underlying node

use indextree::{Arena, NodeId};
use tendril::StrTendril;

/// Classification of a node, derived from its tag name at read time.
///
/// Tags outside the fixed table classify as [`NodeType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// `<a>`
    Href,
    /// A text node (libxml-style tag name `"text"`)
    Text,
    /// `<code>`
    Code,
    /// `<span>`
    Span,
    /// `<p>`
    Paragraph,
    /// `<li>`
    List,
    /// `<ul>`
    UnorderedList,
    /// `<image>`
    Image,
    /// `<ol>`
    OrderedList,
    /// `<strong>`
    Strong,
    /// `<pre>`
    Preformatted,
    /// `<blockquote>`
    Blockquote,
    /// Anything else
    Unknown,
}

impl NodeType {
    /// Classify a tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "a" => NodeType::Href,
            "text" => NodeType::Text,
            "code" => NodeType::Code,
            "span" => NodeType::Span,
            "p" => NodeType::Paragraph,
            "li" => NodeType::List,
            "ul" => NodeType::UnorderedList,
            "image" => NodeType::Image,
            "ol" => NodeType::OrderedList,
            "strong" => NodeType::Strong,
            "pre" => NodeType::Preformatted,
            "blockquote" => NodeType::Blockquote,
            _ => NodeType::Unknown,
        }
    }
}

/// An ordered collection of attributes.
///
/// Insertion order is preserved. The storage itself does not force names to
/// be unique; lookup by name returns the first match, case-sensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, StrTendril)>,
}

impl Attributes {
    /// Create an empty attribute collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Collect from (name, value) pairs, keeping source order.
    pub fn collect_from<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, StrTendril)>,
    {
        Self {
            entries: iter.into_iter().collect(),
        }
    }

    /// Value of the first attribute whose name matches exactly.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_ref())
    }

    /// Overwrite the first attribute with this name, or append a new one.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some((_, v)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            *v = StrTendril::from(value);
        } else {
            self.entries.push((name.to_string(), StrTendril::from(value)));
        }
    }

    /// Append only if the name is not present yet (parser first-wins policy).
    pub fn set_if_missing(&mut self, name: &str, value: StrTendril) {
        if !self.entries.iter().any(|(n, _)| n == name) {
            self.entries.push((name.to_string(), value));
        }
    }

    /// Remove the first attribute with this name, returning its old value.
    pub fn remove(&mut self, name: &str) -> Option<StrTendril> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Check whether an attribute with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterate over all attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Element payload (tag + attributes).
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (StrTendril shares the source buffer via refcounting)
    pub tag: StrTendril,
    /// Attributes in source order
    pub attrs: Attributes,
}

/// What goes in each arena slot.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Document pseudo-root (invisible, parent of `<html>`)
    Document,
    /// Element with tag and attributes
    Element(ElementData),
    /// Text content
    Text(StrTendril),
    /// HTML comment
    Comment(StrTendril),
}

impl NodeData {
    /// Returns true if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, NodeData::Element(_))
    }

    /// Returns true if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeData::Text(_))
    }

    /// Get as element reference.
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get as mutable element reference.
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// The node's tag name, following libxml naming: elements report their
    /// tag, text nodes report `"text"`, comments `"comment"`.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            NodeData::Document => None,
            NodeData::Element(e) => Some(e.tag.as_ref()),
            NodeData::Text(_) => Some("text"),
            NodeData::Comment(_) => Some("comment"),
        }
    }
}

/// A parsed (or programmatically built) tree and the arena that owns every
/// node in it.
///
/// All `NodeId` handles obtained from a Document are valid only while that
/// Document lives. Handles into a subtree released by
/// [`remove_child`](Document::remove_child) resolve to nothing afterwards.
#[derive(Debug, Clone)]
pub struct Document {
    /// THE tree - all nodes live here
    pub arena: Arena<NodeData>,
    /// The document pseudo-node (parent of the root element)
    pub(crate) document: NodeId,
    /// DOCTYPE if present (usually "html")
    pub doctype: Option<StrTendril>,
    /// Declared encoding resolved at parse time
    pub(crate) encoding: &'static encoding_rs::Encoding,
}

impl Document {
    /// Create an empty document (one pseudo-root, no elements) for pure
    /// mutation sessions.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let document = arena.new_node(NodeData::Document);
        Self {
            arena,
            document,
            doctype: None,
            encoding: encoding_rs::UTF_8,
        }
    }

    /// The document pseudo-node, origin for whole-tree searches.
    pub fn document_node(&self) -> NodeId {
        self.document
    }

    /// Canonical name of the document's declared encoding.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Get immutable reference to node data.
    pub fn get(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }

    /// Get mutable reference to node data.
    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.arena[id].get_mut()
    }

    /// The topmost parsed element (usually `<html>`).
    pub fn root(&self) -> Option<NodeId> {
        self.document
            .children(&self.arena)
            .find(|&id| self.arena[id].get().is_element())
    }

    /// The `<head>` element if present.
    pub fn head(&self) -> Option<NodeId> {
        let root = self.root()?;
        self.find_child_by_tag(root, "head")
    }

    /// The `<body>` element if present.
    pub fn body(&self) -> Option<NodeId> {
        let root = self.root()?;
        self.find_child_by_tag(root, "body")
    }

    // ------------------------------------------------------------------
    // Tree links
    // ------------------------------------------------------------------

    /// Parent node, if any. The root element's parent is the document
    /// pseudo-node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.parent())
    }

    /// First child, if any.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.first_child())
    }

    /// Next sibling, if any.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.next_sibling())
    }

    /// Previous sibling, if any.
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.previous_sibling())
    }

    /// All direct children, as a snapshot taken at call time.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        id.children(&self.arena).collect()
    }

    // ------------------------------------------------------------------
    // Tag, type, attributes, content
    // ------------------------------------------------------------------

    /// The node's tag name (`"text"` for text nodes, `"comment"` for
    /// comments, absent for the document pseudo-node).
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).and_then(|node| node.get().tag_name())
    }

    /// Rename an element in place. Attributes and children are untouched.
    /// No-op on non-element nodes.
    pub fn set_tag_name(&mut self, id: NodeId, tag: &str) {
        if let NodeData::Element(elem) = self.arena[id].get_mut() {
            elem.tag = StrTendril::from(tag);
        }
    }

    /// Classification of the node, computed from its tag name.
    pub fn node_type(&self, id: NodeId) -> NodeType {
        self.tag_name(id).map_or(NodeType::Unknown, NodeType::from_tag)
    }

    /// Value of the first attribute whose name matches exactly.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.arena.get(id)?.get().as_element()?.attrs.get(name)
    }

    /// Create-or-overwrite an attribute. No-op on non-element nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element(elem) = self.arena[id].get_mut() {
            elem.attrs.set(name, value);
        }
    }

    /// Remove an attribute entirely, returning its old value.
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<StrTendril> {
        self.arena[id].get_mut().as_element_mut()?.attrs.remove(name)
    }

    /// Value of the `class` attribute.
    pub fn class_name(&self, id: NodeId) -> Option<&str> {
        self.attr(id, "class")
    }

    /// Text of the node's *first child* only - shallow extraction without
    /// recursing. Present when that child is a text or comment node.
    pub fn content(&self, id: NodeId) -> Option<&str> {
        let first = self.arena.get(id)?.first_child()?;
        match self.arena[first].get() {
            NodeData::Text(t) | NodeData::Comment(t) => Some(t.as_ref()),
            _ => None,
        }
    }

    /// Full text of the node's subtree, concatenated in document order.
    /// Comments below the node do not contribute; a comment node queried
    /// directly yields its own text.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for n in id.descendants(&self.arena) {
            match self.arena[n].get() {
                NodeData::Text(t) => out.push_str(t),
                NodeData::Comment(t) if n == id => out.push_str(t),
                _ => {}
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Create a new, detached element node in this document's arena.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(NodeData::Element(ElementData {
            tag: StrTendril::from(tag),
            attrs: Attributes::new(),
        }))
    }

    /// Create a new, detached text node in this document's arena.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData::Text(StrTendril::from(text)))
    }

    /// Unlink `child` from wherever it currently sits, then append it as the
    /// last child of `parent`.
    ///
    /// No cycle check is performed: the caller must not attach an ancestor
    /// below one of its own descendants.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        parent.append(child, &mut self.arena);
    }

    /// Unlink `child` from its parent and siblings without freeing it.
    /// Detaching an already-detached node is a no-op.
    pub fn detach(&mut self, child: NodeId) {
        child.detach(&mut self.arena);
    }

    /// Unlink `child` and free its whole subtree. Handles into the removed
    /// subtree resolve to nothing afterwards.
    pub fn remove_child(&mut self, child: NodeId) {
        child.detach(&mut self.arena);
        child.remove_subtree(&mut self.arena);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
