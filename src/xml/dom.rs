//! Arena-backed document tree produced by the parser.
//!
//! Nodes live in a flat `Vec` and refer to each other through [`NodeId`]
//! indices, so the checking passes can walk and mutate the tree without
//! fighting the borrow checker over parent/child links.

use smol_str::SmolStr;

use crate::diag::Diag;

/// Index of a node within its [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(super) usize);

/// An attribute on an element node.
///
/// Namespace declarations (`xmlns="…"`, `xmlns:p="…"`) are kept as ordinary
/// attributes; consumers that need real namespace semantics resolve them
/// through [`XmlDocument::namespace_for_prefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    prefix: SmolStr,
    local: SmolStr,
    value: String,
}

impl XmlAttribute {
    /// Creates an attribute; `prefix` is `""` for unprefixed names.
    pub fn new(prefix: impl Into<SmolStr>, local: impl Into<SmolStr>, value: String) -> Self {
        Self {
            prefix: prefix.into(),
            local: local.into(),
            value,
        }
    }

    /// Returns the namespace prefix, or `""`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the local name.
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// Returns the attribute value, with entity references already decoded.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` when the local name equals `name`.
    pub fn is_type(&self, name: &str) -> bool {
        self.local == name
    }

    /// Returns the name as written, `prefix:local` or plain `local`.
    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.local.to_string()
        } else {
            format!("{}:{}", self.prefix, self.local)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum NodeKind {
    Element {
        prefix: SmolStr,
        local: SmolStr,
        attributes: Vec<XmlAttribute>,
    },
    Text {
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct NodeData {
    pub(super) kind: NodeKind,
    pub(super) parent: Option<NodeId>,
    pub(super) first_child: Option<NodeId>,
    pub(super) last_child: Option<NodeId>,
    pub(super) next_sibling: Option<NodeId>,
}

/// A parsed XML document: the node arena, the root element, and any
/// diagnostics collected while parsing.
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
    errors: Vec<Diag>,
}

impl XmlDocument {
    pub(super) fn empty() -> Self {
        Self::default()
    }

    /// Returns the root element, if one was parsed.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the number of parse diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the parse diagnostic at `index`.
    pub fn error(&self, index: usize) -> Option<&Diag> {
        self.errors.get(index)
    }

    /// Returns all parse diagnostics in discovery order.
    pub fn errors(&self) -> &[Diag] {
        &self.errors
    }

    /// Returns the first child of `node`.
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].first_child
    }

    /// Returns the following sibling of `node`.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].next_sibling
    }

    /// Returns the parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Returns `true` when `node`'s type name equals `name`.
    ///
    /// Elements answer to their local name (any prefix is ignored); text
    /// nodes answer to `"text"`.
    pub fn is_type(&self, node: NodeId, name: &str) -> bool {
        match &self.nodes[node.0].kind {
            NodeKind::Element { local, .. } => local == name,
            NodeKind::Text { .. } => name == "text",
        }
    }

    /// Returns `node`'s type name: the element local name, or `"text"`.
    pub fn type_name(&self, node: NodeId) -> &str {
        match &self.nodes[node.0].kind {
            NodeKind::Element { local, .. } => local,
            NodeKind::Text { .. } => "text",
        }
    }

    /// Returns the `(prefix, local)` name of an element node.
    pub fn element_name(&self, node: NodeId) -> Option<(&str, &str)> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { prefix, local, .. } => Some((prefix, local)),
            NodeKind::Text { .. } => None,
        }
    }

    /// Returns the content of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Text { content } => Some(content),
            NodeKind::Element { .. } => None,
        }
    }

    /// Returns the number of attributes on `node` (zero for text nodes).
    pub fn attribute_count(&self, node: NodeId) -> usize {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes.len(),
            NodeKind::Text { .. } => 0,
        }
    }

    /// Returns the attribute at `index` on `node`.
    pub fn attribute(&self, node: NodeId, index: usize) -> Option<&XmlAttribute> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes.get(index),
            NodeKind::Text { .. } => None,
        }
    }

    /// Removes the attribute at `index` on `node`, shifting later ones down.
    pub fn remove_attribute(&mut self, node: NodeId, index: usize) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            if index < attributes.len() {
                attributes.remove(index);
            }
        }
    }

    /// Resolves a namespace prefix against the `xmlns:prefix` declarations
    /// in scope at `node`, nearest ancestor first.
    pub fn namespace_for_prefix(&self, node: NodeId, prefix: &str) -> Option<&str> {
        let mut current = Some(node);
        while let Some(id) = current {
            if let NodeKind::Element { attributes, .. } = &self.nodes[id.0].kind {
                for attribute in attributes {
                    if attribute.prefix() == "xmlns" && attribute.local_name() == prefix {
                        return Some(attribute.value());
                    }
                }
            }
            current = self.nodes[id.0].parent;
        }
        None
    }

    /// Serializes the root subtree back to markup. Returns `""` when the
    /// document has no root.
    pub fn serialize(&self) -> String {
        match self.root {
            Some(root) => self.serialize_node(root),
            None => String::new(),
        }
    }

    /// Serializes the subtree rooted at `node`.
    pub fn serialize_node(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text { content } => escape_text(content, out),
            NodeKind::Element {
                prefix,
                local,
                attributes,
            } => {
                out.push('<');
                write_qname(prefix, local, out);
                for attribute in attributes {
                    out.push(' ');
                    write_qname(attribute.prefix(), attribute.local_name(), out);
                    out.push_str("=\"");
                    escape_attribute(attribute.value(), out);
                    out.push('"');
                }
                if self.nodes[node.0].first_child.is_none() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    let mut child = self.nodes[node.0].first_child;
                    while let Some(id) = child {
                        self.write_node(id, out);
                        child = self.nodes[id.0].next_sibling;
                    }
                    out.push_str("</");
                    write_qname(prefix, local, out);
                    out.push('>');
                }
            }
        }
    }

    pub(super) fn set_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    pub(super) fn push_error(&mut self, diag: Diag) {
        self.errors.push(diag);
    }

    pub(super) fn push_element(
        &mut self,
        prefix: SmolStr,
        local: SmolStr,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.push_node(
            NodeKind::Element {
                prefix,
                local,
                attributes: Vec::new(),
            },
            parent,
        );
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        id
    }

    pub(super) fn push_text(&mut self, parent: NodeId, content: String) {
        let id = self.push_node(NodeKind::Text { content }, Some(parent));
        self.append_child(parent, id);
    }

    pub(super) fn push_attribute(&mut self, node: NodeId, attribute: XmlAttribute) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            attributes.push(attribute);
        }
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
        });
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        match self.nodes[parent.0].last_child {
            Some(previous) => self.nodes[previous.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
    }
}

fn write_qname(prefix: &str, local: &str, out: &mut String) {
    if !prefix.is_empty() {
        out.push_str(prefix);
        out.push(':');
    }
    out.push_str(local);
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;

    #[test]
    fn navigation_and_types() {
        let doc = parse("<math><apply><eq/><ci>x</ci></apply></math>");
        let root = doc.root().expect("root");
        assert!(doc.is_type(root, "math"));

        let apply = doc.first_child(root).expect("apply");
        assert_eq!(doc.type_name(apply), "apply");

        let eq = doc.first_child(apply).expect("eq");
        let ci = doc.next_sibling(eq).expect("ci");
        assert!(doc.is_type(ci, "ci"));
        assert_eq!(doc.parent(ci), Some(apply));

        let text = doc.first_child(ci).expect("text");
        assert!(doc.is_type(text, "text"));
        assert_eq!(doc.text(text), Some("x"));
    }

    #[test]
    fn serialize_round_trips_order_and_self_closing() {
        let source = "<math xmlns=\"http://www.w3.org/1998/Math/MathML\"><apply><eq/><ci>x</ci></apply></math>";
        let doc = parse(source);
        assert_eq!(doc.serialize(), source);
    }

    #[test]
    fn serialize_preserves_namespace_declaration_verbatim() {
        let source = "<math xmlns:cellml=\"http://www.cellml.org/cellml/2.0#\"><cn cellml:units=\"second\">1</cn></math>";
        let doc = parse(source);
        assert_eq!(doc.serialize(), source);
    }

    #[test]
    fn remove_attribute_shifts_following_entries() {
        let mut doc = parse("<cn cellml:units=\"second\" type=\"e-notation\">1</cn>");
        let root = doc.root().expect("root");
        assert_eq!(doc.attribute_count(root), 2);

        doc.remove_attribute(root, 0);
        assert_eq!(doc.attribute_count(root), 1);
        assert_eq!(
            doc.attribute(root, 0).map(|a| a.local_name().to_string()),
            Some("type".to_string())
        );
        assert_eq!(doc.serialize(), "<cn type=\"e-notation\">1</cn>");
    }

    #[test]
    fn namespace_resolution_walks_ancestors() {
        let doc = parse(
            "<math xmlns:cellml=\"http://www.cellml.org/cellml/2.0#\"><apply><cn cellml:units=\"second\">1</cn></apply></math>",
        );
        let root = doc.root().expect("root");
        let apply = doc.first_child(root).expect("apply");
        let cn = doc.first_child(apply).expect("cn");

        assert_eq!(
            doc.namespace_for_prefix(cn, "cellml"),
            Some("http://www.cellml.org/cellml/2.0#")
        );
        assert_eq!(doc.namespace_for_prefix(cn, "xlink"), None);
    }

    #[test]
    fn text_escaping_round_trip() {
        let doc = parse("<ci>a &amp; b &lt; c</ci>");
        let root = doc.root().expect("root");
        let text = doc.first_child(root).expect("text");
        assert_eq!(doc.text(text), Some("a & b < c"));
        assert_eq!(doc.serialize(), "<ci>a &amp; b &lt; c</ci>");
    }
}
