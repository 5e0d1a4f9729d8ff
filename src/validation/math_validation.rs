//! Validation of a component's embedded MathML body.
//!
//! The math string is parsed into a temporary tree owned by this pass. Two
//! walks follow, both pre-order, child before sibling, so errors come out
//! in a stable document order:
//!
//! 1. gather the names bound by `bvar` elements and flag any that collide
//!    with a declared variable of the host component;
//! 2. check every `ci`/`cn` leaf (text content, domain-namespace
//!    attributes, units references) and strip the `units` attributes from
//!    the tree.
//!
//! The cleaned tree is then serialized, the domain namespace declaration
//! is removed verbatim, and the result goes through the MathML grammar
//! check. The component's stored math string is never touched.

use smol_str::SmolStr;

use super::error::{ErrorKind, Subject, ValidationError};
use super::is_invalid_real;
use crate::mathml;
use crate::model::Component;
use crate::standard_units::is_standard_unit;
use crate::xml::{self, NodeId, XmlDocument};

/// The CellML 2.0 namespace URI.
const CELLML_NAMESPACE: &str = "http://www.cellml.org/cellml/2.0#";

/// The namespace declaration removed, as an exact substring, from the
/// serialized math before the grammar check.
const CELLML_NAMESPACE_DECL: &str = " xmlns:cellml=\"http://www.cellml.org/cellml/2.0#\"";

/// Runs the math pass for `component`, appending to `errors`.
pub(super) fn run_math_validation(
    component: &Component,
    variable_names: &[SmolStr],
    errors: &mut Vec<ValidationError>,
) {
    let mut doc = xml::parse(component.math());
    for diag in doc.errors() {
        errors.push(ValidationError::new(
            ErrorKind::Xml,
            diag.message.clone(),
            Subject::Component(component.name().into()),
        ));
    }
    let Some(root) = doc.root() else {
        errors.push(ValidationError::new(
            ErrorKind::Xml,
            format!(
                "Could not get a valid XML root node from the math on component '{}'.",
                component.name()
            ),
            Subject::Component(component.name().into()),
        ));
        return;
    };
    if !doc.is_type(root, "math") {
        errors.push(ValidationError::new(
            ErrorKind::Xml,
            format!(
                "Math root node is of invalid type '{}' on component '{}'. A valid math root node should be of type 'math'.",
                doc.type_name(root),
                component.name()
            ),
            Subject::Component(component.name().into()),
        ));
        return;
    }

    let mut bvar_names: Vec<SmolStr> = Vec::new();
    gather_bvar_names(&doc, root, &mut bvar_names);
    for variable_name in variable_names {
        if bvar_names.contains(variable_name) {
            errors.push(ValidationError::new(
                ErrorKind::MathMl,
                format!(
                    "Math in component '{}' contains '{variable_name}' as a bvar ci element but it is already a variable name.",
                    component.name()
                ),
                Subject::Component(component.name().into()),
            ));
        }
    }

    check_and_clean_ci_cn_nodes(&mut doc, root, component, variable_names, &bvar_names, errors);

    let mut clean = doc.serialize();
    remove_substring(&mut clean, CELLML_NAMESPACE_DECL);
    for diag in mathml::check(&clean) {
        errors.push(ValidationError::new(
            ErrorKind::MathMl,
            diag.message,
            Subject::Component(component.name().into()),
        ));
    }
}

/// Collects the names introduced by `bvar` elements: the text of a `ci`
/// first child, when that text is not whitespace-only. The walk does not
/// descend into a `bvar` once recorded.
fn gather_bvar_names(doc: &XmlDocument, node: NodeId, bvar_names: &mut Vec<SmolStr>) {
    let mut current = Some(node);
    while let Some(id) = current {
        if doc.is_type(id, "bvar") {
            let text = doc
                .first_child(id)
                .filter(|&child| doc.is_type(child, "ci"))
                .and_then(|ci| doc.first_child(ci))
                .and_then(|grandchild| doc.text(grandchild));
            if let Some(text) = text {
                if !is_whitespace_only(text) {
                    bvar_names.push(SmolStr::new(text));
                }
            }
        } else if let Some(child) = doc.first_child(id) {
            gather_bvar_names(doc, child, bvar_names);
        }
        current = doc.next_sibling(id);
    }
}

/// Checks each `ci`/`cn` leaf and removes its domain-namespace `units`
/// attribute so the tree can be serialized for the grammar check.
fn check_and_clean_ci_cn_nodes(
    doc: &mut XmlDocument,
    node: NodeId,
    component: &Component,
    variable_names: &[SmolStr],
    bvar_names: &[SmolStr],
    errors: &mut Vec<ValidationError>,
) {
    let mut current = Some(node);
    while let Some(id) = current {
        let node_type = doc.type_name(id);
        if node_type == "ci" || node_type == "cn" {
            let node_type = node_type.to_string();
            let mut text_content = String::new();
            match doc.first_child(id) {
                None => errors.push(math_error(
                    component,
                    format!("MathML {node_type} element has no child."),
                )),
                Some(child) => {
                    if let Some(text) = doc.text(child) {
                        text_content = text.to_string();
                        if is_whitespace_only(&text_content) {
                            errors.push(math_error(
                                component,
                                format!(
                                    "MathML {node_type} element has a whitespace-only child element."
                                ),
                            ));
                        } else if node_type == "ci" {
                            if !contains_name(variable_names, &text_content)
                                && !contains_name(bvar_names, &text_content)
                            {
                                errors.push(math_error(
                                    component,
                                    format!(
                                        "MathML ci element has the child text '{text_content}', which does not correspond with any variable names present in component '{}' and is not a variable defined within a bvar element.",
                                        component.name()
                                    ),
                                ));
                            }
                        } else if is_invalid_real(&text_content) {
                            errors.push(math_error(
                                component,
                                format!(
                                    "MathML cn element has the value '{text_content}', which cannot be converted to a real number."
                                ),
                            ));
                        }
                    }
                }
            }

            // Find the units attribute among the domain-namespace
            // attributes; any other one there is an error.
            let mut units_name: Option<String> = None;
            let mut units_attribute: Option<usize> = None;
            for index in 0..doc.attribute_count(id) {
                let Some(attribute) = doc.attribute(id, index) else {
                    break;
                };
                if attribute.value().is_empty() {
                    continue;
                }
                let prefix = attribute.prefix();
                if prefix.is_empty() || prefix == "xmlns" {
                    continue;
                }
                if doc.namespace_for_prefix(id, prefix) != Some(CELLML_NAMESPACE) {
                    continue;
                }
                if attribute.is_type("units") {
                    units_name = Some(attribute.value().to_string());
                    units_attribute = Some(index);
                } else {
                    let attribute_type = attribute.local_name().to_string();
                    errors.push(math_error(
                        component,
                        format!(
                            "Math {node_type} element has an invalid attribute type '{attribute_type}' in the cellml namespace."
                        ),
                    ));
                }
            }

            match units_name {
                None => {
                    if node_type == "cn" {
                        errors.push(math_error(
                            component,
                            format!(
                                "Math cn element with the value '{text_content}' does not have a cellml:units attribute."
                            ),
                        ));
                    } else if doc
                        .parent(id)
                        .is_some_and(|parent| doc.is_type(parent, "bvar"))
                    {
                        errors.push(math_error(
                            component,
                            format!(
                                "Math bvar ci element with the value '{text_content}' does not have a valid cellml:units attribute."
                            ),
                        ));
                    }
                }
                Some(units_name) => {
                    if !component.has_units(&units_name) && !is_standard_unit(&units_name) {
                        errors.push(math_error(
                            component,
                            format!(
                                "Math has a {node_type} element with a cellml:units attribute '{units_name}' that is not a valid reference to units in component '{}' or a standard unit.",
                                component.name()
                            ),
                        ));
                    }
                }
            }

            // Clean the node so the serialized tree is plain MathML. The
            // component's stored math string is unaffected.
            if let Some(index) = units_attribute {
                doc.remove_attribute(id, index);
            }
        } else if let Some(child) = doc.first_child(id) {
            check_and_clean_ci_cn_nodes(doc, child, component, variable_names, bvar_names, errors);
        }
        current = doc.next_sibling(id);
    }
}

fn math_error(component: &Component, description: String) -> ValidationError {
    ValidationError::new(
        ErrorKind::MathMl,
        description,
        Subject::Component(component.name().into()),
    )
}

fn contains_name(names: &[SmolStr], text: &str) -> bool {
    names.iter().any(|name| name.as_str() == text)
}

/// Whitespace in the XML sense: space, tab, and the newline family.
fn is_whitespace_only(text: &str) -> bool {
    text.chars()
        .all(|ch| matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r'))
}

fn remove_substring(input: &mut String, pattern: &str) {
    while let Some(index) = input.find(pattern) {
        input.replace_range(index..index + pattern.len(), "");
    }
}
