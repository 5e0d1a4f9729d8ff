//! MathML grammar checking.
//!
//! Stands in for validating against the MathML DTD: the cleaned math
//! string is re-parsed and every element and attribute is checked against
//! the content-markup tables in `grammar.rs`. Three classes of problem
//! are reported, in document order after any well-formedness errors:
//! undeclared elements, undeclared attributes, and names whose namespace
//! prefix has no in-scope declaration (which is exactly what a stray
//! domain-namespace attribute looks like once the declaration has been
//! stripped).

mod grammar;

use crate::diag::Diag;
use crate::xml::{self, NodeId, XmlDocument};

/// Parses `source` and returns every grammar problem found.
pub fn check(source: &str) -> Vec<Diag> {
    let doc = xml::parse(source);
    let mut diags: Vec<Diag> = doc.errors().to_vec();
    if let Some(root) = doc.root() {
        check_node(&doc, root, &mut diags);
    }
    diags
}

fn check_node(doc: &XmlDocument, node: NodeId, diags: &mut Vec<Diag>) {
    let mut current = Some(node);
    while let Some(id) = current {
        if let Some((prefix, local)) = doc.element_name(id) {
            if !prefix.is_empty() && doc.namespace_for_prefix(id, prefix).is_none() {
                diags.push(Diag::error(format!(
                    "Namespace prefix {prefix} on {local} is not defined."
                )));
            } else if !grammar::is_mathml_element(local) {
                diags.push(Diag::error(format!("No declaration for element {local}.")));
            } else {
                check_attributes(doc, id, local, diags);
            }
        }
        if let Some(child) = doc.first_child(id) {
            check_node(doc, child, diags);
        }
        current = doc.next_sibling(id);
    }
}

fn check_attributes(doc: &XmlDocument, node: NodeId, element: &str, diags: &mut Vec<Diag>) {
    for index in 0..doc.attribute_count(node) {
        let Some(attribute) = doc.attribute(node, index) else {
            break;
        };
        let prefix = attribute.prefix();
        let local = attribute.local_name();
        // Namespace declarations are not subject to the grammar.
        if prefix == "xmlns" || (prefix.is_empty() && local == "xmlns") {
            continue;
        }
        // xml:space and friends are always declared.
        if prefix == "xml" {
            continue;
        }
        if !prefix.is_empty() {
            if doc.namespace_for_prefix(node, prefix).is_none() {
                diags.push(Diag::error(format!(
                    "Namespace prefix {prefix} for {local} on {element} is not defined."
                )));
            } else {
                diags.push(Diag::error(format!(
                    "No declaration for attribute {prefix}:{local} of element {element}."
                )));
            }
            continue;
        }
        if !grammar::is_allowed_attribute(element, local) {
            diags.push(Diag::error(format!(
                "No declaration for attribute {local} of element {element}."
            )));
        }
    }
}
