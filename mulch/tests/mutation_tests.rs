//! Mutation semantics: detach/reattach bookkeeping, subtree removal, and
//! in-place edits.

use mulch::{Document, NodeType, parse};

#[test]
fn test_reattach_moves_between_parents() {
    let doc_html = concat!(
        "<html><body>",
        r#"<div id="a"><span id="x">x</span><em>keep</em></div>"#,
        r#"<div id="b"><strong>y</strong></div>"#,
        "</body></html>",
    );
    let mut doc = parse(doc_html).unwrap();
    let body = doc.body().unwrap();

    let parent_a = doc.find_child_by_tag(body, "div").unwrap();
    let parent_b = doc.next_sibling(parent_a).unwrap();
    let x = doc.find_child_by_tag(parent_a, "span").unwrap();

    let before_a = doc.children(parent_a).len();
    let before_b = doc.children(parent_b).len();

    doc.append_child(parent_b, x);

    assert_eq!(doc.parent(x), Some(parent_b));
    assert!(!doc.children(parent_a).contains(&x));
    assert_eq!(doc.children(parent_a).len(), before_a - 1);
    assert_eq!(doc.children(parent_b).len(), before_b + 1);
    // Appended as the LAST child
    assert_eq!(doc.children(parent_b).last(), Some(&x));
}

#[test]
fn test_reappend_to_same_parent_moves_to_end() {
    let mut doc = parse("<html><body><ul><li>1</li><li>2</li><li>3</li></ul></body></html>")
        .unwrap();
    let body = doc.body().unwrap();
    let ul = doc.first_child(body).unwrap();
    let first = doc.first_child(ul).unwrap();

    doc.append_child(ul, first);

    let texts: Vec<String> = doc
        .children(ul)
        .into_iter()
        .map(|li| doc.text_content(li))
        .collect();
    assert_eq!(texts, vec!["2", "3", "1"]);
    assert_eq!(doc.children(ul).len(), 3);
}

#[test]
fn test_remove_child_releases_subtree() {
    let mut doc =
        parse("<html><body><div><span>gone</span></div><p>stays</p></body></html>").unwrap();
    let body = doc.body().unwrap();
    let div = doc.find_child_by_tag(body, "div").unwrap();
    let span = doc.find_child_by_tag(div, "span").unwrap();

    doc.remove_child(div);

    assert_eq!(doc.children(body).len(), 1);
    assert_eq!(doc.find_child_by_tag(body, "div"), None);
    // Handles into the removed subtree resolve to nothing
    assert!(doc.arena.get(span).is_none());
    assert_eq!(doc.text_content(body), "stays");
}

#[test]
fn test_detach_is_idempotent() {
    let mut doc = parse("<html><body><p>x</p></body></html>").unwrap();
    let body = doc.body().unwrap();
    let p = doc.first_child(body).unwrap();

    doc.detach(p);
    doc.detach(p);

    assert_eq!(doc.parent(p), None);
    assert!(doc.children(body).is_empty());
    // The node itself is still alive, just unlinked
    assert_eq!(doc.text_content(p), "x");
}

#[test]
fn test_attribute_set_and_remove() {
    let mut doc = parse(r#"<html><body><p class="old">x</p></body></html>"#).unwrap();
    let body = doc.body().unwrap();
    let p = doc.first_child(body).unwrap();

    doc.set_attr(p, "class", "new");
    assert_eq!(doc.class_name(p), Some("new"));

    doc.set_attr(p, "id", "para");
    assert_eq!(doc.attr(p, "id"), Some("para"));

    assert_eq!(doc.remove_attr(p, "class").as_deref(), Some("new"));
    assert_eq!(doc.class_name(p), None);
    assert_eq!(doc.remove_attr(p, "class"), None);
}

#[test]
fn test_rename_keeps_children_and_attrs() {
    let mut doc = parse(r#"<html><body><ul id="list"><li>a</li></ul></body></html>"#).unwrap();
    let body = doc.body().unwrap();
    let list = doc.first_child(body).unwrap();
    assert_eq!(doc.node_type(list), NodeType::UnorderedList);

    doc.set_tag_name(list, "ol");

    assert_eq!(doc.node_type(list), NodeType::OrderedList);
    assert_eq!(doc.attr(list, "id"), Some("list"));
    assert_eq!(doc.children(list).len(), 1);
    assert_eq!(doc.node_to_html(list), r#"<ol id="list"><li>a</li></ol>"#);
}

#[test]
fn test_build_document_from_scratch() {
    let mut doc = Document::new();
    let root = doc.create_element("html");
    let body = doc.create_element("body");
    let p = doc.create_element("p");
    let text = doc.create_text("built by hand");

    let document = doc.document_node();
    doc.append_child(document, root);
    doc.append_child(root, body);
    doc.append_child(body, p);
    doc.append_child(p, text);
    doc.set_attr(p, "class", "generated");

    assert_eq!(doc.root(), Some(root));
    assert_eq!(doc.body(), Some(body));
    assert_eq!(
        doc.to_html(),
        r#"<html><body><p class="generated">built by hand</p></body></html>"#
    );
}
