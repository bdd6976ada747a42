use dom::{Document, DomError, listener};
use dom_test_support::{Probe, assert_outline};

fn list_document() -> (Document, dom::NodeKey) {
    let mut doc = Document::new();
    let body = doc.body();
    let ul = doc.create_element("UL").unwrap();
    doc.append_child(body, ul).unwrap();
    for label in ["one", "two"] {
        let li = doc.create_element("li").unwrap();
        doc.set_text_content(li, label).unwrap();
        doc.append_child(ul, li).unwrap();
    }
    (doc, ul)
}

#[test]
fn outline_tracks_moves_and_destroys() {
    let (mut doc, ul) = list_document();
    let first = doc.children(ul)[0];
    doc.append_child(ul, first).unwrap();

    assert_outline(
        &doc.outline(usize::MAX),
        &[
            "#document",
            "  <body>",
            "    <ul>",
            "      <li>",
            r#"        "two""#,
            "      <li>",
            r#"        "one""#,
        ],
    );

    doc.destroy(ul).unwrap();
    assert_outline(&doc.outline(usize::MAX), &["#document", "  <body>"]);
    assert_eq!(doc.text_content(first), "");
}

#[test]
fn listeners_on_destroyed_nodes_are_unreachable() {
    let (mut doc, ul) = list_document();
    let probe = Probe::new();
    let item = doc.children(ul)[1];
    doc.add_event_listener(ul, "click", listener(probe.callback::<dom::Event>()))
        .unwrap();

    assert_eq!(doc.dispatch_event(item, "click"), Ok(1));
    doc.destroy(ul).unwrap();
    assert_eq!(
        doc.dispatch_event(item, "click"),
        Err(DomError::UnknownNode(item))
    );
    assert_eq!(probe.count(), 1);
}

#[test]
fn markup_and_text_both_count_as_text_content() {
    let (mut doc, ul) = list_document();
    let extra = doc.create_element("li").unwrap();
    doc.set_inner_html(extra, "<i>three</i>").unwrap();
    doc.append_child(ul, extra).unwrap();

    assert_eq!(doc.text_content(ul), "onetwo<i>three</i>");
    assert_eq!(
        doc.outline(usize::MAX).last().map(String::as_str),
        Some("        #markup <i>three</i>")
    );
}
