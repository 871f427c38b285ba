use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{QName, ResolveResult};
use quick_xml::NsReader;
use thiserror::Error;

use crate::tree::{NodeKind, XmlNode};

const XMLNS: &str = "xmlns";
const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for name/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into a document node.
///
/// The returned node has kind [`NodeKind::Document`]; its children hold the
/// root element along with any declaration, doctype, comments, and
/// processing instructions around it.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = vec![XmlNode::document()];

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let node = build_element(&e, &reader)?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = build_element(&e, &reader)?;
                attach(&mut stack, node)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                push_text(&mut stack, text)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e)?.to_string();
                attach(&mut stack, XmlNode::cdata(text))?;
            }
            Event::Comment(e) => {
                let text = std::str::from_utf8(&e)?.to_string();
                attach(&mut stack, XmlNode::comment(text))?;
            }
            Event::PI(e) => {
                let raw = std::str::from_utf8(&e)?;
                let (target, content) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
                let mut node = XmlNode::new(NodeKind::ProcessingInstruction);
                node.local_name = target.to_string();
                node.value = Some(content.trim_start().to_string());
                attach(&mut stack, node)?;
            }
            Event::DocType(e) => {
                let text = std::str::from_utf8(&e)?.trim().to_string();
                let mut node = XmlNode::new(NodeKind::DocumentType);
                node.local_name = text.split_whitespace().next().unwrap_or_default().to_string();
                node.value = Some(text);
                attach(&mut stack, node)?;
            }
            Event::Decl(_) => {
                let mut node = XmlNode::new(NodeKind::XmlDeclaration);
                node.local_name = "xml".to_string();
                attach(&mut stack, node)?;
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(ParseError::Malformed(
                        "encountered closing tag without open tag".to_string(),
                    ));
                }
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(&mut stack, node)?;
            }
            Event::Eof => break,
        }
        buf.clear();
    }

    if stack.len() != 1 {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    let document = stack.pop().ok_or_else(|| {
        ParseError::Malformed("document node missing at end of input".to_string())
    })?;
    if document.root_element().is_none() {
        return Err(ParseError::Malformed("no root element found".to_string()));
    }
    Ok(document)
}

/// Parse an XML file into a document node.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn attach(stack: &mut [XmlNode], node: XmlNode) -> Result<(), ParseError> {
    let depth = stack.len();
    let parent = stack
        .last_mut()
        .ok_or_else(|| ParseError::Malformed("node outside of document".to_string()))?;

    if depth == 1 && node.kind == NodeKind::Element && parent.root_element().is_some() {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    parent.children.push(node);
    Ok(())
}

fn push_text(stack: &mut [XmlNode], text: String) -> Result<(), ParseError> {
    let depth = stack.len();
    let Some(parent) = stack.last_mut() else {
        return Ok(());
    };

    if depth == 1 && !text.trim().is_empty() {
        return Err(ParseError::Malformed("text outside root element".to_string()));
    }

    if let Some(last) = parent.children.last_mut() {
        if matches!(last.kind, NodeKind::Text | NodeKind::Whitespace) {
            let merged = last.value.get_or_insert_with(String::new);
            merged.push_str(&text);
            if !merged.trim().is_empty() {
                last.kind = NodeKind::Text;
            }
            return Ok(());
        }
    }

    if text.trim().is_empty() {
        parent.children.push(XmlNode::whitespace(text));
    } else {
        parent.children.push(XmlNode::text(text));
    }
    Ok(())
}

/// Build an element from a start tag. Must run right after the tag is read,
/// while the reader still has that tag's namespace declarations in scope.
fn build_element(e: &BytesStart<'_>, reader: &NsReader<&[u8]>) -> Result<XmlNode, ParseError> {
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let (prefix, local_name) = split_qname(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();

        let is_declaration = match prefix.as_deref() {
            Some(prefix) => prefix == XMLNS,
            None => local_name == XMLNS,
        };
        let namespace_uri = if is_declaration {
            Some(XMLNS_NAMESPACE.to_string())
        } else {
            namespace_of(reader.resolve_attribute(attr.key).0)?
        };

        let mut node = XmlNode::attribute(local_name, value);
        node.prefix = prefix;
        node.namespace_uri = namespace_uri;
        attributes.push(node);
    }

    let (prefix, local_name) = split_qname(e.name())?;
    let namespace_uri = namespace_of(reader.resolve_element(e.name()).0)?;

    Ok(XmlNode {
        prefix,
        namespace_uri,
        attributes,
        ..XmlNode::element(local_name)
    })
}

fn namespace_of(resolved: ResolveResult<'_>) -> Result<Option<String>, ParseError> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(Some(std::str::from_utf8(ns.as_ref())?.to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::Malformed(format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn split_qname(name: QName<'_>) -> Result<(Option<String>, String), ParseError> {
    let qualified = std::str::from_utf8(name.as_ref())?;
    Ok(match qualified.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, qualified.to_string()),
    })
}
