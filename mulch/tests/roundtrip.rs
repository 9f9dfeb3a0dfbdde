//! Round-trip tests: parse, serialize, re-parse, and compare.

use mulch::parse;

#[test]
fn test_fragment_round_trips_exactly() {
    let doc = parse("<html><body><div><ul><li>one</li><li>two</li></ul></div></body></html>")
        .unwrap();
    let body = doc.body().unwrap();

    assert_eq!(
        doc.node_to_html(body),
        "<body><div><ul><li>one</li><li>two</li></ul></div></body>"
    );
}

#[test]
fn test_reserialization_is_stable() {
    let doc = parse(concat!(
        "<!DOCTYPE html><html><head><title>T &amp; t</title></head>",
        r#"<body><p class="a">x<br>y</p><!--note--></body></html>"#,
    ))
    .unwrap();

    let once = doc.to_html();
    let reparsed = parse(&once).unwrap();
    assert_eq!(reparsed.to_html(), once);
}

#[test]
fn test_structure_survives_attribute_noise() {
    let doc = parse(r#"<html><body><a href="/x" title="&quot;q&quot;">link</a></body></html>"#)
        .unwrap();
    let body = doc.body().unwrap();
    let html = doc.node_to_html(body);

    let reparsed = parse(&format!("<html>{html}</html>")).unwrap();
    let body2 = reparsed.body().unwrap();
    let a = reparsed.find_child_by_tag(body2, "a").unwrap();

    assert_eq!(reparsed.attr(a, "href"), Some("/x"));
    assert_eq!(reparsed.attr(a, "title"), Some("\"q\""));
    assert_eq!(reparsed.text_content(a), "link");
}

#[test]
fn test_xml_flavor_closes_void_elements() {
    let doc = parse("<html><body><p>a<br>b</p></body></html>").unwrap();
    let body = doc.body().unwrap();
    let p = doc.first_child(body).unwrap();

    assert_eq!(doc.node_to_html(p), "<p>a<br>b</p>");
    assert_eq!(doc.node_to_xml(p), "<p>a<br/>b</p>");
}

#[test]
fn test_text_content_round_trip() {
    let doc = parse("<html><body><p>5 &lt; 7 &amp; 9 &gt; 2</p></body></html>").unwrap();
    let body = doc.body().unwrap();
    let p = doc.first_child(body).unwrap();

    // Decoded in the tree, re-encoded in the markup
    assert_eq!(doc.text_content(p), "5 < 7 & 9 > 2");
    assert_eq!(doc.node_to_html(p), "<p>5 &lt; 7 &amp; 9 &gt; 2</p>");
}
