#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use tagtree::config::{ParserConfig, DEFAULT_MAX_DEPTH};
use tagtree::{Document, ErrorKind, NodeType};

fn nested(depth: usize) -> String {
    format!("{}x{}", "<a>".repeat(depth), "</a>".repeat(depth))
}

#[test]
fn test_max_input_size() {
    let config = ParserConfig {
        max_size: 16,
        ..ParserConfig::default()
    };
    let mut document = Document::new();
    let result = document.load_with("<root>0123456789</root>", &config);
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::MaxSizeExceeded { max: 16 }
    ));
    assert!(document.is_empty());
}

#[test]
fn test_max_depth() {
    let input = nested(DEFAULT_MAX_DEPTH + 10);
    let result = Document::parse(&input);
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::MaxDepthExceeded { max: DEFAULT_MAX_DEPTH }
    ));
}

#[test]
fn test_depth_within_custom_limit() {
    let input = nested(DEFAULT_MAX_DEPTH + 10);
    let config = ParserConfig {
        max_depth: DEFAULT_MAX_DEPTH * 2,
        ..ParserConfig::default()
    };
    let mut document = Document::new();
    assert!(document.load_with(&input, &config).unwrap().is_empty());
    assert_eq!(document.print(), input);
}

#[test]
fn test_doctype_subset_counts_as_nesting() {
    let config = ParserConfig {
        max_depth: 0,
        ..ParserConfig::default()
    };
    let mut document = Document::new();
    let result = document.load_with("<!DOCTYPE a [<!ELEMENT a ANY>]>", &config);
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::MaxDepthExceeded { max: 0 }
    ));
    assert!(document.load_with("<!DOCTYPE a>", &config).is_ok());
}

#[test]
fn test_unterminated_constructs_fail_with_position() {
    let cases = [
        ("<a/>\n<!-- never closed", "comment", 2),
        ("<a attr=\"open/>", "element", 1),
        ("<root>\n  <child>text\n</root>", "element", 2),
        ("<?pi a=\"1\"", "processing instruction", 1),
        ("<!DOCTYPE a [\n<!ELEMENT a ANY>", "DOCTYPE", 1),
    ];
    for (input, construct, line) in cases {
        let err = Document::parse(input).unwrap_err();
        match err.kind() {
            ErrorKind::UnterminatedConstruct { construct: found } => {
                assert_eq!(found, construct, "{input}");
            }
            other => panic!("unexpected error {other:?} for {input}"),
        }
        assert_eq!(err.span().start.line, line, "{input}");
        assert!(!err.is_recoverable());
    }
}

#[test]
fn test_recovery_builds_partial_declarations() {
    let config = ParserConfig::recovering();
    let mut document = Document::new();

    document.load_with("<a/>\n<!-- never closed", &config).unwrap();
    assert_eq!(document.len(), 2);
    let comment = document.nodes()[1].as_comment().unwrap();
    assert_eq!(document.nodes()[1].name(), "never");
    assert_eq!(comment.content, "closed");

    document.load_with("<root><child>text</child>", &config).unwrap();
    assert_eq!(document.len(), 1);
    let root = &document.nodes()[0];
    assert_eq!(root.node_type(), NodeType::Element);
    assert_eq!(root.children().unwrap().len(), 1);

    document.load_with("<a attr=\"open", &config).unwrap();
    assert_eq!(document.nodes()[0].name(), "a");
    assert!(!document.nodes()[0].has_attributes());
}

#[test]
fn test_malformed_input_never_panics() {
    let inputs = [
        "",
        "<",
        "<<<<",
        ">>>",
        "</>",
        "<!",
        "<?",
        "<!--",
        "<!---->",
        "<a b=\"c' d='e\">",
        "<a>\"unbalanced</a>",
        "<!DOCTYPE [ ] ] >",
        "<!ELEMENT ((((>",
        "<!ATTLIST a b c \"d>",
        "text only",
        "\u{feff}<é>ü</é>",
        "<a></b></a>",
        "&amp;&lt;",
    ];
    let config = ParserConfig::recovering();
    for input in inputs {
        let mut document = Document::new();
        if document.load_with(input, &config).is_ok() {
            let _ = document.print();
        }
        let _ = Document::parse(input);
    }
}
