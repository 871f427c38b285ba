use xml_compare_core::{NodeKind, XmlNode};

/// Render a node tree with kinds, namespaces, and values, to a max depth.
pub fn render_tree(node: &XmlNode, max_depth: usize) -> String {
    let mut out = String::new();
    render_node(node, 0, max_depth, &mut out);
    out
}

fn render_node(node: &XmlNode, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{}\n", describe(node)));

    if depth >= max_depth {
        return;
    }

    for attr in &node.attributes {
        out.push_str(&format!("{indent}  @{}\n", describe(attr)));
    }
    for child in &node.children {
        render_node(child, depth + 1, max_depth, out);
    }
}

fn describe(node: &XmlNode) -> String {
    let mut line = match node.kind {
        NodeKind::Element | NodeKind::Attribute => format!("{} {}", node.kind, node.qualified_name()),
        NodeKind::ProcessingInstruction => format!("{} {}", node.kind, node.local_name),
        _ => node.kind.to_string(),
    };
    if let Some(uri) = node.namespace_uri.as_deref() {
        line.push_str(&format!(" {{{uri}}}"));
    }
    if let Some(value) = node.value.as_deref() {
        line.push_str(&format!(" = {value:?}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use xml_compare_core::XmlNode;

    use super::render_tree;

    #[test]
    fn render_stops_at_max_depth() {
        let tree = XmlNode::element("a")
            .with_child(XmlNode::element("b").with_child(XmlNode::text("deep")));

        let out = render_tree(&tree, 1);
        assert_eq!(out, "Element a\n  Element b\n");
    }

    #[test]
    fn render_shows_attributes_and_values() {
        let tree = XmlNode::element("a")
            .with_namespace(Some("p"), "urn:p")
            .with_attribute("id", "1")
            .with_child(XmlNode::comment("c"));

        let out = render_tree(&tree, 2);
        assert!(out.contains("Element p:a {urn:p}"));
        assert!(out.contains("@Attribute id = \"1\""));
        assert!(out.contains("  Comment = \"c\""));
    }
}
