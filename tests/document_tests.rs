#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use std::error::Error;

use tagtree::node::{Comment, TextElement, TEXT_NODE_NAME};
use tagtree::{documents_equal, Document, ErrorKind, Node, NodeKind, NodeType};

const SAMPLE: &str = include_str!("input/sample.xml");

fn text_of(node: &Node) -> Option<(&str, bool)> {
    node.as_text().map(|t| (t.text.as_str(), t.show_tag))
}

#[test]
fn test_comment_name_and_content() -> Result<(), Box<dyn Error>> {
    let document = Document::parse("<!-- note this is a comment -->")?;
    let node = &document.nodes()[0];
    assert_eq!(node.name(), "note");
    assert_eq!(
        node.kind(),
        &NodeKind::Comment(Comment::new("this is a comment", true))
    );
    assert_eq!(document.print(), "<!-- note this is a comment -->");
    Ok(())
}

#[test]
fn test_mixed_content_paragraph() -> Result<(), Box<dyn Error>> {
    let document = Document::parse("<p>Hello <b>World</b>!</p>")?;
    assert_eq!(document.len(), 1);
    let p = &document.nodes()[0];
    assert_eq!(p.name(), "p");
    assert_eq!(p.node_type(), NodeType::Element);

    let children = p.children().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].name(), TEXT_NODE_NAME);
    assert_eq!(text_of(&children[0]), Some(("Hello ", false)));
    assert_eq!(children[1].name(), "b");
    assert_eq!(text_of(&children[1]), Some(("World", true)));
    assert_eq!(text_of(&children[2]), Some(("!", false)));

    assert_eq!(document.print(), "<p>Hello <b>World</b>!</p>");
    Ok(())
}

#[test]
fn test_nested_same_name_elements() -> Result<(), Box<dyn Error>> {
    let document = Document::parse("<a><a>x</a>y</a>")?;
    assert_eq!(document.len(), 1);
    let outer = &document.nodes()[0];
    assert_eq!(outer.node_type(), NodeType::Element);

    let children = outer.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].name(), "a");
    assert_eq!(text_of(&children[0]), Some(("x", true)));
    assert_eq!(text_of(&children[1]), Some(("y", false)));
    Ok(())
}

#[test]
fn test_self_closing_with_two_attributes() -> Result<(), Box<dyn Error>> {
    let document = Document::parse("<el k1=\"v1\" k2='v2'/>")?;
    let el = &document.nodes()[0];
    assert_eq!(el.attribute_count(), 2);
    assert_eq!(el.attribute("k1"), Some("v1"));
    assert_eq!(el.attribute("k2"), Some("v2"));
    assert!(el.children().unwrap().is_empty());
    assert_eq!(document.print(), "<el k1=\"v1\" k2=\"v2\" />");
    Ok(())
}

#[test]
fn test_single_line_element_has_no_newlines() -> Result<(), Box<dyn Error>> {
    let mut div = Node::element("div")?.with_end_of_line(false);
    if let Some(element) = div.as_element_mut() {
        element.single_line = true;
    }
    div.push_child(Node::text("first"))?;
    div.push_child(Node::text("second"))?;
    let printed = div.serialize(0);
    assert_eq!(printed, "<div>firstsecond</div>");
    assert!(!printed.contains('\n'));
    Ok(())
}

#[test]
fn test_empty_element_always_self_closes() -> Result<(), Box<dyn Error>> {
    let mut element = Node::element("empty")?;
    for single_line in [false, true] {
        if let Some(payload) = element.as_element_mut() {
            payload.single_line = single_line;
        }
        let printed = element.serialize(1);
        assert!(printed.trim_end().ends_with(" />"));
        assert!(!printed.contains("</empty>"));
    }
    Ok(())
}

#[test]
fn test_sample_document_structure() -> Result<(), Box<dyn Error>> {
    let document = Document::parse(SAMPLE)?;
    let types: Vec<_> = document.iter().map(Node::node_type).collect();
    assert_eq!(
        types,
        vec![
            NodeType::Prolog,
            NodeType::ProcessingInstruction,
            NodeType::DoctypeDtd,
            NodeType::Comment,
            NodeType::Element,
        ]
    );

    let prolog = document.nodes()[0].as_prolog().unwrap();
    assert_eq!(prolog.encoding.as_deref(), Some("UTF-8"));
    assert_eq!(prolog.standalone.as_deref(), Some("no"));

    let note = &document.nodes()[4];
    assert_eq!(note.attribute("priority"), Some("high"));
    assert_eq!(note.attribute("id"), Some("n1"));
    let children = note.children().unwrap();
    assert_eq!(children.len(), 5);
    assert_eq!(children.count_named("to"), 1);
    assert_eq!(children.get_named("heading", 0).unwrap().attribute("lang"), Some("en"));

    let body = children.get_named("body", 0).unwrap();
    assert!(body.as_element().unwrap().single_line);
    let body_children = body.children().unwrap();
    assert_eq!(body_children.len(), 3);
    assert_eq!(
        body_children[0].as_text().unwrap().plain_text(),
        "Don't forget me this weekend & bring "
    );
    Ok(())
}

#[test]
fn test_sample_prints_back_with_normalized_quotes() -> Result<(), Box<dyn Error>> {
    let document = Document::parse(SAMPLE)?;
    assert_eq!(document.print(), SAMPLE.replace("id='n1'", "id=\"n1\""));
    Ok(())
}

#[test]
fn test_reparse_is_structurally_stable() -> Result<(), Box<dyn Error>> {
    let inputs = [
        SAMPLE,
        "<p>Hello <b>World</b>!</p>",
        "<a><a>x</a>y</a>\n<!-- tail -->",
        "<r>\n  <a k='say \"hi\"'>1 &lt; 2</a>\n  <b/>\n</r>",
    ];
    for input in inputs {
        let first = Document::parse(input)?;
        let second = Document::parse(&first.print())?;
        assert!(documents_equal(&first, &second), "{input}");
        assert_eq!(first.print(), second.print(), "{input}");
    }
    Ok(())
}

#[test]
fn test_attribute_values_survive_reparse() -> Result<(), Box<dyn Error>> {
    let values = ["C:\\dir\\", "say \"it's\"", "a < b && c > d", "\\\"", ""];
    let mut node = Node::element("a")?;
    for (index, value) in values.iter().enumerate() {
        node.set_attribute(format!("k{index}"), *value);
    }
    let mut document = Document::new();
    document.push(node);

    let reparsed = Document::parse(&document.print())?;
    let parsed = &reparsed.nodes()[0];
    for (index, value) in values.iter().enumerate() {
        assert_eq!(parsed.attribute(&format!("k{index}")), Some(*value));
    }
    assert!(documents_equal(&document, &reparsed));
    Ok(())
}

#[test]
fn test_api_built_text_is_escaped() -> Result<(), Box<dyn Error>> {
    let mut root = Node::element("root")?;
    root.push_child(Node::text_element("code", "if a < b && c > \"d\"")?)?;
    let printed = root.serialize(0);
    assert!(printed.contains("<code>if a &lt; b &amp;&amp; c &gt; &quot;d&quot;</code>"));

    let parsed = Document::parse(&printed)?;
    let code = parsed.nodes()[0].child(0).unwrap();
    assert_eq!(code.as_text().unwrap().plain_text(), "if a < b && c > \"d\"");
    Ok(())
}

#[test]
fn test_parsed_entities_survive_printing() -> Result<(), Box<dyn Error>> {
    let document = Document::parse("<t>a &amp; b</t>")?;
    let text = document.nodes()[0].as_text().unwrap();
    assert_eq!(
        text,
        &TextElement {
            text: "a &amp; b".to_string(),
            show_tag: true,
            escape: false,
        }
    );
    assert_eq!(document.print(), "<t>a &amp; b</t>");
    Ok(())
}

#[test]
fn test_editing_a_loaded_document() -> Result<(), Box<dyn Error>> {
    let mut document = Document::parse("<list>\n\t<item>one</item>\n\t<item>two</item>\n</list>\n")?;
    let list = document.get_mut(0).unwrap();
    assert_eq!(list.find_child("item", 1), Some(1));

    let removed = list.remove_child(0)?;
    assert_eq!(removed.as_text().unwrap().text, "one");
    list.insert_child(1, Node::text_element("item", "three")?)?;
    list.set_attribute("kind", "numbers");
    assert!(list.set_name("9list").is_err());

    assert_eq!(
        document.print(),
        "<list kind=\"numbers\">\n\t<item>two</item>\n\t<item>three</item>\n</list>\n"
    );
    Ok(())
}

#[test]
fn test_removing_last_child_self_closes() -> Result<(), Box<dyn Error>> {
    let mut document = Document::parse("<a>\n\t<b/>\n</a>\n")?;
    document.get_mut(0).unwrap().remove_child(0)?;
    assert_eq!(document.print(), "<a />\n");
    Ok(())
}

#[test]
fn test_out_of_range_is_an_error() -> Result<(), Box<dyn Error>> {
    let mut document = Document::parse("<a/>")?;
    assert!(document.get(3).is_none());
    let err = document.remove(3).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange { index: 3, len: 1 }));
    let err = document.insert(4, Node::comment("c", "")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange { index: 4, len: 1 }));
    Ok(())
}

#[test]
fn test_multiple_top_level_roots() -> Result<(), Box<dyn Error>> {
    let document = Document::parse("<a/>\n<b/>\n<a/>\n")?;
    assert_eq!(document.len(), 3);
    assert_eq!(document.count_named("a"), 2);
    assert_eq!(document.find("a", 1), Some(2));
    Ok(())
}

#[test]
fn test_file_round_trip() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join(format!("tagtree-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("sample.xml");
    std::fs::write(&path, SAMPLE)?;

    let document = tagtree::parse_file(&path)?;
    assert_eq!(document.path(), Some(path.as_path()));

    let copy = dir.join("copy.xml");
    document.save(&copy)?;
    let reloaded = tagtree::parse_file(&copy)?;
    assert!(documents_equal(&document, &reloaded));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = tagtree::parse_file("does/not/exist.xml").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io(_)));
}
