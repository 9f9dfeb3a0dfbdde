//! Tolerant HTML parsing using html5ever's TreeSink.
//!
//! The sink builds the arena-based [`Document`] directly during tree
//! construction, which includes browser-compatible error recovery: malformed
//! tags and unclosed elements still yield a usable tree. Disabling
//! [`ParseOptions::RECOVER`] turns any recorded diagnostic into a failure
//! instead, mirroring strict parsing.

use std::borrow::Cow;
use std::cell::RefCell;

use bitflags::bitflags;
use encoding_rs::Encoding;
use html5ever::tree_builder::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, LocalName, QualName, local_name, namespace_url, ns, parse_document};
use indextree::{Arena, NodeId};
use tendril::{StrTendril, TendrilSink};

use crate::dom::{Attributes, Document, ElementData, NodeData};
use crate::encoding;
use crate::error::ParseError;
use crate::tracing_macros::debug;

bitflags! {
    /// Recovery behavior for the parse entry points.
    ///
    /// The default enables all three flags, matching permissive
    /// browser-style parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParseOptions: u32 {
        /// Tolerate malformed markup and keep building a best-effort tree.
        const RECOVER = 1 << 0;
        /// Do not emit parse errors through `tracing`.
        const SUPPRESS_ERRORS = 1 << 1;
        /// Do not emit parse warnings through `tracing`.
        const SUPPRESS_WARNINGS = 1 << 2;
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::RECOVER | Self::SUPPRESS_ERRORS | Self::SUPPRESS_WARNINGS
    }
}

/// Parse UTF-8 HTML text with default (recovering) options.
///
/// # Example
///
/// ```rust
/// let doc = mulch::parse("<html><body><p>Hello!</p></body></html>").unwrap();
/// let body = doc.body().expect("should have body");
/// let p = doc.first_child(body).unwrap();
/// assert_eq!(doc.tag_name(p), Some("p"));
/// ```
pub fn parse(html: &str) -> Result<Document, ParseError> {
    parse_with(html, "utf-8", ParseOptions::default())
}

/// Parse HTML text declared to be in the named encoding.
///
/// The label must resolve against the encoding-name table
/// ([`ParseError::UnsupportedEncoding`] otherwise); the text itself is
/// already decoded, so the label only becomes the document's declared
/// encoding. Empty input fails with [`ParseError::EmptyInput`]. Parsing is
/// one-shot: callers wanting a fallback encoding re-invoke with a different
/// label.
pub fn parse_with(
    html: &str,
    encoding_label: &str,
    options: ParseOptions,
) -> Result<Document, ParseError> {
    if html.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let enc = resolve_label(encoding_label)?;
    run(html, enc, options)
}

/// Decode a byte buffer with the named encoding, then parse it.
pub fn parse_bytes(
    bytes: &[u8],
    encoding_label: &str,
    options: ParseOptions,
) -> Result<Document, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let enc = resolve_label(encoding_label)?;
    let text = encoding::decode(bytes, enc);
    run(&text, enc, options)
}

fn resolve_label(label: &str) -> Result<&'static Encoding, ParseError> {
    encoding::resolve(label).ok_or_else(|| ParseError::UnsupportedEncoding {
        label: label.to_string(),
    })
}

fn run(html: &str, enc: &'static Encoding, options: ParseOptions) -> Result<Document, ParseError> {
    let sink = ArenaSink::new();
    // html5ever creates subtendrils that share this buffer via refcounting
    let tendril = StrTendril::from(html);
    let sink = parse_document(sink, Default::default()).one(tendril);
    sink.into_document(enc, options)
}

/// Owned element name wrapper, reconstructed from the stored tag.
#[derive(Debug, Clone)]
struct SinkElemName(QualName);

impl ElemName for SinkElemName {
    fn ns(&self) -> &html5ever::Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// TreeSink that builds the arena-based DOM.
struct ArenaSink {
    /// The arena under construction - RefCell for interior mutability
    arena: RefCell<Arena<NodeData>>,

    /// Document pseudo-node (parent of `<html>`)
    document: NodeId,

    /// DOCTYPE encountered during parse
    doctype: RefCell<Option<StrTendril>>,

    /// Diagnostics the tree builder reported while recovering
    errors: RefCell<Vec<Cow<'static, str>>>,
}

impl ArenaSink {
    fn new() -> Self {
        let mut arena = Arena::new();
        let document = arena.new_node(NodeData::Document);

        ArenaSink {
            arena: RefCell::new(arena),
            document,
            doctype: RefCell::new(None),
            errors: RefCell::new(Vec::new()),
        }
    }

    fn into_document(
        self,
        encoding: &'static Encoding,
        options: ParseOptions,
    ) -> Result<Document, ParseError> {
        let errors = self.errors.into_inner();
        if !errors.is_empty() {
            let suppressed = options.contains(ParseOptions::SUPPRESS_ERRORS)
                && options.contains(ParseOptions::SUPPRESS_WARNINGS);
            if !suppressed {
                for msg in &errors {
                    debug!("parse diagnostic: {msg}");
                }
            }
            if !options.contains(ParseOptions::RECOVER) {
                return Err(ParseError::UnrecoverableParse {
                    detail: errors[0].to_string(),
                });
            }
        }

        let arena = self.arena.into_inner();
        let has_root = self
            .document
            .children(&arena)
            .any(|id| arena[id].get().is_element());
        if !has_root {
            return Err(ParseError::UnrecoverableParse {
                detail: "no root element".to_string(),
            });
        }

        Ok(Document {
            arena,
            document: self.document,
            doctype: self.doctype.into_inner(),
            encoding,
        })
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeId;
    type Output = Self;
    type ElemName<'a>
        = SinkElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        // Recorded, not raised: recovery policy is decided after the parse
        self.errors.borrow_mut().push(msg);
    }

    fn get_document(&self) -> Self::Handle {
        self.document
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn same_node(&self, a: &Self::Handle, b: &Self::Handle) -> bool {
        a == b
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> SinkElemName {
        let arena = self.arena.borrow();
        if let NodeData::Element(elem) = arena[*target].get() {
            SinkElemName(QualName {
                prefix: None,
                ns: ns!(html),
                local: LocalName::from(elem.tag.as_ref()),
            })
        } else {
            // Not an element - return placeholder
            SinkElemName(QualName {
                prefix: None,
                ns: ns!(html),
                local: local_name!(""),
            })
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let tag = StrTendril::from(name.local.as_ref());
        // Attribute values are StrTendrils sharing the source buffer
        let attrs = Attributes::collect_from(
            attrs
                .into_iter()
                .map(|attr| (attr.name.local.to_string(), attr.value)),
        );

        self.arena
            .borrow_mut()
            .new_node(NodeData::Element(ElementData { tag, attrs }))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.arena.borrow_mut().new_node(NodeData::Comment(text))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        // Processing instructions degrade to empty comments
        self.arena
            .borrow_mut()
            .new_node(NodeData::Comment(StrTendril::new()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                parent.append(node, &mut arena);
            }
            NodeOrText::AppendText(text) => {
                // Merge with a trailing text node (html5ever behavior)
                if let Some(last) = arena[*parent].last_child() {
                    if let NodeData::Text(existing) = arena[last].get_mut() {
                        existing.push_tendril(&text);
                        return;
                    }
                }

                let text_node = arena.new_node(NodeData::Text(text));
                parent.append(text_node, &mut arena);
            }
        }
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node,
            NodeOrText::AppendText(text) => arena.new_node(NodeData::Text(text)),
        };
        sibling.insert_before(node, &mut arena);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        _prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        self.append(element, child);
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        *self.doctype.borrow_mut() = Some(name);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // For <template>, return the element itself
        *target
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        let mut arena = self.arena.borrow_mut();
        if let NodeData::Element(elem) = arena[*target].get_mut() {
            for attr in attrs {
                elem.attrs.set_if_missing(attr.name.local.as_ref(), attr.value);
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        target.detach(&mut self.arena.borrow_mut());
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut arena = self.arena.borrow_mut();
        let children: Vec<NodeId> = node.children(&arena).collect();
        for child in children {
            child.detach(&mut arena);
            new_parent.append(child, &mut arena);
        }
    }
}
