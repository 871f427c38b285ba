use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_compare_core::{parse, parse_file, NodeKind, ParseError};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_prolog_namespaces_and_mixed_content() {
    let doc = parse_file(&fixture("fixtures/catalog_a.xml")).expect("parse should succeed");
    assert_eq!(doc.kind, NodeKind::Document);

    let prolog: Vec<NodeKind> = doc
        .children
        .iter()
        .map(|c| c.kind)
        .filter(|k| *k != NodeKind::Whitespace)
        .collect();
    assert_eq!(
        prolog,
        vec![
            NodeKind::XmlDeclaration,
            NodeKind::Comment,
            NodeKind::Element
        ]
    );

    let root = doc.root_element().expect("root should exist");
    assert_eq!(root.local_name, "catalog");
    assert_eq!(root.prefix.as_deref(), Some("cat"));
    assert_eq!(root.namespace_uri.as_deref(), Some("urn:example:catalog"));

    let products = root.get_children("product");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].get_attribute("id"), Some("p1"));

    let notes = products[1].get_child("notes").expect("notes should exist");
    assert_eq!(notes.children.len(), 1);
    assert_eq!(notes.children[0].kind, NodeKind::CData);
    assert_eq!(
        notes.children[0].value.as_deref(),
        Some("fragile <handle with care>")
    );

    let name = products[0].get_child("name").expect("name should exist");
    assert_eq!(name.namespace_uri, None);
}

#[test]
fn attributes_keep_source_order_and_declarations() {
    let doc = parse(br#"<a xmlns:p="urn:p" z="1" p:y="2" x="3"/>"#).expect("parse");
    let root = doc.root_element().expect("root");

    let names: Vec<String> = root.attributes.iter().map(|a| a.qualified_name()).collect();
    assert_eq!(names, vec!["xmlns:p", "z", "p:y", "x"]);
    assert_eq!(root.attributes[2].namespace_uri.as_deref(), Some("urn:p"));
}

#[test]
fn entities_are_unescaped_in_text_and_attributes() {
    let doc = parse(br#"<a title="&lt;b&gt;">x &amp; y</a>"#).expect("parse");
    let root = doc.root_element().expect("root");

    assert_eq!(root.get_attribute("title"), Some("<b>"));
    assert_eq!(root.children[0].value.as_deref(), Some("x & y"));
}

#[test]
fn rejects_documents_without_single_root() {
    assert!(matches!(parse(b"<!-- only -->"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse(b"<a/><b/>"), Err(ParseError::Malformed(_))));
    assert!(parse(b"<a><b></a>").is_err());
    assert!(matches!(parse(b"junk<a/>"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse(b"<a/>trailing"), Err(ParseError::Malformed(_))));
}

#[test]
fn rendered_markup_escapes_special_characters() {
    let doc = parse(br#"<a t="x&quot;&lt;y">1 &lt; 2 &amp; 3</a>"#).expect("parse");
    let root = doc.root_element().expect("root");
    assert_eq!(root.get_attribute("t"), Some("x\"<y"));

    let rendered = root.to_string();
    let reparsed = parse(rendered.as_bytes()).expect("rendered markup should parse");
    assert_eq!(reparsed.root_element(), Some(root));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let err = parse_file(&dir.path().join("absent.xml")).expect_err("file is missing");
    assert!(matches!(err, ParseError::Io(_)));
}
