use std::fmt::{self, Display, Formatter};

use quick_xml::escape::escape;
use serde::Serialize;

/// The category of a node in a document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    CData,
    Comment,
    /// Text made up only of whitespace between markup.
    Whitespace,
    ProcessingInstruction,
    DocumentType,
    XmlDeclaration,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Element => "Element",
            NodeKind::Attribute => "Attribute",
            NodeKind::Text => "Text",
            NodeKind::CData => "CDATA",
            NodeKind::Comment => "Comment",
            NodeKind::Whitespace => "Whitespace",
            NodeKind::ProcessingInstruction => "ProcessingInstruction",
            NodeKind::DocumentType => "DocumentType",
            NodeKind::XmlDeclaration => "XmlDeclaration",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of a node, as consumed by [`crate::Comparer`].
///
/// Implementations must return attributes and children in a stable order;
/// the comparer never mutates a node and keeps no references past a single
/// comparison.
pub trait Node: Sized {
    fn kind(&self) -> NodeKind;

    /// Name without namespace prefix. Empty for text-like nodes.
    fn local_name(&self) -> &str;

    fn prefix(&self) -> Option<&str>;

    fn namespace_uri(&self) -> Option<&str>;

    /// Textual content of text, CDATA, comment and attribute nodes.
    fn value(&self) -> Option<&str>;

    fn attributes(&self) -> &[Self];

    fn children(&self) -> &[Self];
}

/// An owned XML node, as produced by [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlNode {
    pub kind: NodeKind,
    pub local_name: String,
    pub prefix: Option<String>,
    pub namespace_uri: Option<String>,
    pub value: Option<String>,
    /// Attribute nodes in source order, namespace declarations included.
    pub attributes: Vec<XmlNode>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create a bare node of `kind` with no name, value, attributes, or children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            local_name: String::new(),
            prefix: None,
            namespace_uri: None,
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn document() -> Self {
        Self::new(NodeKind::Document)
    }

    pub fn element(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Self::new(NodeKind::Element)
        }
    }

    pub fn attribute(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            value: Some(value.into()),
            ..Self::new(NodeKind::Attribute)
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::valued(NodeKind::Text, value)
    }

    pub fn cdata(value: impl Into<String>) -> Self {
        Self::valued(NodeKind::CData, value)
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Self::valued(NodeKind::Comment, value)
    }

    pub fn whitespace(value: impl Into<String>) -> Self {
        Self::valued(NodeKind::Whitespace, value)
    }

    fn valued(kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(kind)
        }
    }

    /// Set the namespace prefix and URI of this node.
    pub fn with_namespace(mut self, prefix: Option<&str>, uri: impl Into<String>) -> Self {
        self.prefix = prefix.map(ToString::to_string);
        self.namespace_uri = Some(uri.into());
        self
    }

    pub fn with_attribute(mut self, local_name: &str, value: &str) -> Self {
        self.attributes.push(XmlNode::attribute(local_name, value));
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// The qualified name, `prefix:local` when a prefix is set.
    pub fn qualified_name(&self) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", self.local_name),
            _ => self.local_name.clone(),
        }
    }

    /// Return the first element child with the provided local name.
    pub fn get_child(&self, local_name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|child| child.kind == NodeKind::Element && child.local_name == local_name)
    }

    /// Return all element children with the provided local name.
    pub fn get_children(&self, local_name: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.kind == NodeKind::Element && child.local_name == local_name)
            .collect()
    }

    /// Return the value of the attribute with the provided local name.
    pub fn get_attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.local_name == local_name)
            .and_then(|attr| attr.value.as_deref())
    }

    /// The document element of a document node.
    pub fn root_element(&self) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|child| child.kind == NodeKind::Element)
    }
}

impl Node for XmlNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn local_name(&self) -> &str {
        &self.local_name
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn attributes(&self) -> &[Self] {
        &self.attributes
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = self.value.as_deref().unwrap_or_default();
        match self.kind {
            NodeKind::Document => {
                for child in &self.children {
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            NodeKind::Element => {
                let name = self.qualified_name();
                write!(f, "<{name}")?;
                for attr in &self.attributes {
                    write!(f, " {attr}")?;
                }
                if self.children.is_empty() {
                    return write!(f, "/>");
                }
                write!(f, ">")?;
                for child in &self.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{name}>")
            }
            NodeKind::Attribute => write!(f, "{}=\"{}\"", self.qualified_name(), escape(value)),
            NodeKind::Text | NodeKind::Whitespace => write!(f, "{}", escape(value)),
            NodeKind::CData => write!(f, "<![CDATA[{value}]]>"),
            NodeKind::Comment => write!(f, "<!--{value}-->"),
            NodeKind::ProcessingInstruction => write!(f, "<?{} {value}?>", self.local_name),
            NodeKind::DocumentType => write!(f, "<!DOCTYPE {value}>"),
            NodeKind::XmlDeclaration => write!(f, "<?xml {value}?>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeKind, XmlNode};

    #[test]
    fn get_child_skips_text_nodes() {
        let root = XmlNode::element("root")
            .with_child(XmlNode::text("parent"))
            .with_child(XmlNode::element("parent").with_attribute("id", "1"));

        let parent = root.get_child("parent").expect("parent should exist");
        assert_eq!(parent.kind, NodeKind::Element);
        assert_eq!(parent.get_attribute("id"), Some("1"));
    }

    #[test]
    fn display_renders_prefixed_markup() {
        let node = XmlNode::element("item")
            .with_namespace(Some("a"), "urn:a")
            .with_attribute("id", "7")
            .with_child(XmlNode::text("x"))
            .with_child(XmlNode::comment(" note "));

        assert_eq!(node.to_string(), r#"<a:item id="7">x<!-- note --></a:item>"#);
    }

    #[test]
    fn display_escapes_text_and_attribute_values() {
        let node = XmlNode::element("a")
            .with_attribute("t", "say \"hi\"")
            .with_child(XmlNode::text("1 < 2 & 3"));

        assert_eq!(
            node.to_string(),
            r#"<a t="say &quot;hi&quot;">1 &lt; 2 &amp; 3</a>"#
        );
    }
}
