//! Rendering subtrees back to markup text.
//!
//! Two flavors share one serializer:
//!
//! - **HTML** follows HTML5 serialization rules: void elements never get end
//!   tags, raw text elements (`script`, `style`) are not escaped, RCDATA
//!   elements (`title`, `textarea`) escape only `&` and `<`, everything else
//!   escapes `&`, `<`, `>`; attribute values are double-quoted.
//! - **XML** is strict: every element is closed (childless elements
//!   self-close) and all text content is escaped, including inside `script`.

use std::fmt::Write;

use indextree::NodeId;

use crate::dom::{Document, ElementData, NodeData};

/// HTML5 void elements - these never have end tags.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Raw text elements - content is not escaped.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// RCDATA elements - only `&` and `<` are escaped.
const RCDATA_ELEMENTS: &[&str] = &["title", "textarea"];

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

fn is_rcdata_element(tag: &str) -> bool {
    RCDATA_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Html,
    Xml,
}

/// Serialize a node and its subtree as HTML.
pub fn serialize_html(doc: &Document, id: NodeId) -> String {
    serialize(doc, id, Flavor::Html)
}

/// Serialize a node and its subtree as strict XML-style markup.
pub fn serialize_xml(doc: &Document, id: NodeId) -> String {
    serialize(doc, id, Flavor::Xml)
}

fn serialize(doc: &Document, id: NodeId, flavor: Flavor) -> String {
    let mut out = String::new();
    let mut ser = Serializer {
        doc,
        out: &mut out,
        flavor,
    };
    ser.write_node(id);
    out
}

impl Document {
    /// Serialize a node and its subtree as HTML.
    pub fn node_to_html(&self, id: NodeId) -> String {
        serialize_html(self, id)
    }

    /// Serialize a node and its subtree as strict XML-style markup.
    pub fn node_to_xml(&self, id: NodeId) -> String {
        serialize_xml(self, id)
    }

    /// Serialize the whole document as HTML, doctype included.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            let _ = write!(out, "<!DOCTYPE {doctype}>");
        }
        out.push_str(&serialize_html(self, self.document_node()));
        out
    }
}

struct Serializer<'a, W: Write> {
    doc: &'a Document,
    out: &'a mut W,
    flavor: Flavor,
}

impl<'a, W: Write> Serializer<'a, W> {
    fn write_node(&mut self, id: NodeId) {
        let doc = self.doc;
        match doc.arena[id].get() {
            NodeData::Document => {
                // Invisible: render the children only
                for child in id.children(&doc.arena) {
                    self.write_node(child);
                }
            }
            NodeData::Element(elem) => self.write_element(id, elem),
            NodeData::Text(text) => self.write_text_escaped(text),
            NodeData::Comment(text) => {
                // Defuse -- to prevent early closing
                let safe = text.replace("--", "- -");
                let _ = write!(self.out, "<!--{safe}-->");
            }
        }
    }

    fn write_element(&mut self, id: NodeId, elem: &ElementData) {
        let doc = self.doc;
        let tag = elem.tag.as_ref();

        let _ = write!(self.out, "<{tag}");
        for (name, value) in elem.attrs.iter() {
            self.write_attr(name, value);
        }

        match self.flavor {
            Flavor::Html => {
                if is_void_element(tag) {
                    let _ = self.out.write_char('>');
                    return;
                }
                let _ = self.out.write_char('>');

                if is_raw_text_element(tag) || is_rcdata_element(tag) {
                    let raw = is_raw_text_element(tag);
                    for child in id.children(&doc.arena) {
                        if let NodeData::Text(text) = doc.arena[child].get() {
                            if raw {
                                let _ = self.out.write_str(text);
                            } else {
                                self.write_rcdata_escaped(text);
                            }
                        }
                    }
                } else {
                    for child in id.children(&doc.arena) {
                        self.write_node(child);
                    }
                }

                let _ = write!(self.out, "</{tag}>");
            }
            Flavor::Xml => {
                if doc.arena[id].first_child().is_none() {
                    let _ = self.out.write_str("/>");
                    return;
                }
                let _ = self.out.write_char('>');
                for child in id.children(&doc.arena) {
                    self.write_node(child);
                }
                let _ = write!(self.out, "</{tag}>");
            }
        }
    }

    /// Escape text content for normal elements.
    fn write_text_escaped(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '&' => {
                    let _ = self.out.write_str("&amp;");
                }
                '<' => {
                    let _ = self.out.write_str("&lt;");
                }
                '>' => {
                    let _ = self.out.write_str("&gt;");
                }
                _ => {
                    let _ = self.out.write_char(c);
                }
            }
        }
    }

    /// Escape text content for RCDATA elements (only & and <).
    fn write_rcdata_escaped(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '&' => {
                    let _ = self.out.write_str("&amp;");
                }
                '<' => {
                    let _ = self.out.write_str("&lt;");
                }
                _ => {
                    let _ = self.out.write_char(c);
                }
            }
        }
    }

    /// Escape an attribute value and write it double-quoted.
    fn write_attr(&mut self, name: &str, value: &str) {
        let _ = write!(self.out, " {name}=\"");
        for c in value.chars() {
            match c {
                '&' => {
                    let _ = self.out.write_str("&amp;");
                }
                '<' => {
                    let _ = self.out.write_str("&lt;");
                }
                '>' => {
                    let _ = self.out.write_str("&gt;");
                }
                '"' => {
                    let _ = self.out.write_str("&quot;");
                }
                _ => {
                    let _ = self.out.write_char(c);
                }
            }
        }
        let _ = self.out.write_char('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(body_html: &str) -> Document {
        crate::parser::parse(&format!("<html><body>{body_html}</body></html>")).unwrap()
    }

    #[test]
    fn test_html_void_elements() {
        let doc = doc_with("<br><img src=\"test.png\">");
        let body = doc.body().unwrap();
        let html = doc.node_to_html(body);

        assert!(html.contains("<br>"));
        assert!(!html.contains("</br>"));
        assert!(html.contains("src=\"test.png\">"));
        assert!(!html.contains("</img>"));
    }

    #[test]
    fn test_xml_closes_everything() {
        let doc = doc_with("<div><br>text</div>");
        let body = doc.body().unwrap();
        let div = doc.first_child(body).unwrap();
        let xml = doc.node_to_xml(div);

        assert_eq!(xml, "<div><br/>text</div>");
    }

    #[test]
    fn test_text_escaping() {
        let doc = doc_with("<div>&lt;script&gt; &amp; more</div>");
        let body = doc.body().unwrap();
        let div = doc.first_child(body).unwrap();

        assert_eq!(doc.node_to_html(div), "<div>&lt;script&gt; &amp; more</div>");
    }

    #[test]
    fn test_attribute_escaping() {
        let doc = doc_with(r#"<a href="a?x=1&amp;y=2" title="say &quot;hi&quot;">z</a>"#);
        let body = doc.body().unwrap();
        let a = doc.first_child(body).unwrap();
        let html = doc.node_to_html(a);

        assert!(html.contains("href=\"a?x=1&amp;y=2\""));
        assert!(html.contains("title=\"say &quot;hi&quot;\""));
    }

    #[test]
    fn test_raw_text_not_escaped_in_html() {
        let doc = doc_with("<script>if (a < b && c > d) {}</script>");
        let body = doc.body().unwrap();
        let script = doc.find_child_by_tag(body, "script").unwrap();

        let html = doc.node_to_html(script);
        assert!(html.contains("a < b && c > d"));

        // XML flavor escapes the same content
        let xml = doc.node_to_xml(script);
        assert!(xml.contains("a &lt; b &amp;&amp; c &gt; d"));
    }

    #[test]
    fn test_comment_serialization() {
        let doc = doc_with("<div><!--a -- b--></div>");
        let body = doc.body().unwrap();
        let div = doc.first_child(body).unwrap();

        assert_eq!(doc.node_to_html(div), "<div><!--a - - b--></div>");
    }

    #[test]
    fn test_document_to_html_includes_doctype() {
        let doc = crate::parser::parse("<!DOCTYPE html><html><body><p>x</p></body></html>")
            .unwrap();
        let html = doc.to_html();

        assert!(html.starts_with("<!DOCTYPE html><html>"));
        assert!(html.contains("<p>x</p>"));
        assert!(html.ends_with("</html>"));
    }
}
