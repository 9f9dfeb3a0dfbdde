//! Tolerant HTML parsing into a navigable, mutable DOM tree.
//!
//! mulch provides:
//! - **Parsing**: browser-compatible HTML5 parsing via html5ever with full
//!   error recovery, building one arena of nodes owned by the [`Document`]
//! - **Traversal & search**: O(1) parent/child/sibling links plus pre-order
//!   depth-first search by tag name, attribute, or class
//! - **Mutation**: detach/reattach nodes, remove subtrees, rename tags,
//!   set and remove attributes
//! - **Serialization**: render any subtree back to HTML or to strict
//!   XML-style markup
//!
//! Nodes are addressed by [`NodeId`] handles into the document's arena; the
//! whole tree is freed together when the Document is dropped.
//!
//! # Example
//!
//! ```rust
//! use mulch::{AttrMatch, NodeType, parse};
//!
//! let doc = parse(r#"<html><body><p class="intro">Hello!</p></body></html>"#).unwrap();
//! let body = doc.body().expect("should have body");
//!
//! let p = doc.find_child_by_tag(body, "p").unwrap();
//! assert_eq!(doc.node_type(p), NodeType::Paragraph);
//! assert_eq!(doc.content(p), Some("Hello!"));
//!
//! // Attribute search, exact or substring
//! assert_eq!(doc.find_child_by_attr(body, "class", "intro", AttrMatch::Exact), Some(p));
//! assert_eq!(doc.class_name(p), Some("intro"));
//!
//! // Serialize the subtree back out
//! assert_eq!(doc.node_to_html(p), r#"<p class="intro">Hello!</p>"#);
//! ```

mod tracing_macros;

pub mod dom;
mod encoding;
mod error;
mod parser;
pub mod search;
pub mod serialize;

// Re-export the DOM types at crate root for convenience
pub use dom::{Attributes, Document, ElementData, NodeData, NodeType};

// Re-export parsing functions
pub use parser::{ParseOptions, parse, parse_bytes, parse_with};

pub use error::ParseError;
pub use search::AttrMatch;
pub use serialize::{serialize_html, serialize_xml};

// Node handles are plain indextree ids
pub use indextree::NodeId;
