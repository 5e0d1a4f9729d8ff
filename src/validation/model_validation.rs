//! Model-level validation pass.
//!
//! Checks the model name, uniqueness of component and units names across
//! the model, and the well-formedness of imported components and units,
//! then delegates into each component and each units definition.

use smol_str::SmolStr;

use super::error::{ErrorKind, Subject, ValidationError};
use super::{component_validation, units_validation};
use crate::model::Model;

/// Runs the model pass, appending every violation to `errors`.
pub(super) fn run_model_validation(model: &Model, errors: &mut Vec<ValidationError>) {
    if model.name().is_empty() {
        errors.push(ValidationError::new(
            ErrorKind::Model,
            "Model does not have a valid name attribute.",
            Subject::Model(model.name().into()),
        ));
    }

    let mut component_names: Vec<&str> = Vec::new();
    let mut component_refs: Vec<&str> = Vec::new();
    let mut component_sources: Vec<&str> = Vec::new();
    for component in model.components() {
        let component_name = component.name();
        if !component_name.is_empty() {
            if let Some(import) = component.import() {
                let reference = component.import_reference();
                let source = import.source();
                let mut found_import_error = false;
                if reference.is_empty() {
                    errors.push(ValidationError::new(
                        ErrorKind::Component,
                        format!(
                            "Imported component '{component_name}' does not have a valid component_ref attribute."
                        ),
                        Subject::Component(component_name.into()),
                    ));
                    found_import_error = true;
                }
                if source.is_empty() {
                    errors.push(ValidationError::new(
                        ErrorKind::Import,
                        format!(
                            "Import of component '{component_name}' does not have a valid locator xlink:href attribute."
                        ),
                        Subject::Import(source.into()),
                    ));
                    found_import_error = true;
                }
                if !found_import_error
                    && is_duplicate_import(&component_sources, &component_refs, source, reference)
                {
                    errors.push(ValidationError::new(
                        ErrorKind::Model,
                        format!(
                            "Model '{}' contains multiple imported components from '{source}' with the same component_ref attribute '{reference}'.",
                            model.name()
                        ),
                        Subject::Model(model.name().into()),
                    ));
                }
                component_sources.push(source);
                component_refs.push(reference);
            }
            if component_names.contains(&component_name) {
                errors.push(ValidationError::new(
                    ErrorKind::Model,
                    format!(
                        "Model '{}' contains multiple components with the name '{component_name}'. Valid component names should be unique to their model.",
                        model.name()
                    ),
                    Subject::Model(model.name().into()),
                ));
            }
            component_names.push(component_name);
        }
        component_validation::run_component_validation(component, errors);
    }

    let mut units_names: Vec<SmolStr> = Vec::new();
    let mut units_refs: Vec<&str> = Vec::new();
    let mut units_sources: Vec<&str> = Vec::new();
    for units in model.units_iter() {
        let units_name = units.name();
        if units_name.is_empty() {
            continue;
        }
        if let Some(import) = units.import() {
            let reference = units.import_reference();
            let source = import.source();
            let mut found_import_error = false;
            if reference.is_empty() {
                errors.push(ValidationError::new(
                    ErrorKind::Units,
                    format!(
                        "Imported units '{units_name}' does not have a valid units_ref attribute."
                    ),
                    Subject::Units(units_name.into()),
                ));
                found_import_error = true;
            }
            if source.is_empty() {
                errors.push(ValidationError::new(
                    ErrorKind::Import,
                    format!(
                        "Import of units '{units_name}' does not have a valid locator xlink:href attribute."
                    ),
                    Subject::Import(source.into()),
                ));
                found_import_error = true;
            }
            if !found_import_error
                && is_duplicate_import(&units_sources, &units_refs, source, reference)
            {
                errors.push(ValidationError::new(
                    ErrorKind::Model,
                    format!(
                        "Model '{}' contains multiple imported units from '{source}' with the same units_ref attribute '{reference}'.",
                        model.name()
                    ),
                    Subject::Model(model.name().into()),
                ));
            }
            units_sources.push(source);
            units_refs.push(reference);
        }
        if units_names.iter().any(|name| name.as_str() == units_name) {
            errors.push(ValidationError::new(
                ErrorKind::Model,
                format!(
                    "Model '{}' contains multiple units with the name '{units_name}'. Valid units names should be unique to their model.",
                    model.name()
                ),
                Subject::Model(model.name().into()),
            ));
        }
        units_names.push(units_name.into());
    }
    // Uniqueness errors for the whole list come before any structural
    // errors from the definitions themselves, so the units are validated
    // in a second pass.
    for units in model.units_iter() {
        units_validation::run_units_validation(units, &units_names, errors);
    }
}

/// Duplicate-import rule: a (source, reference) pair is a duplicate when
/// the first occurrence of `source` among the seen sources and the first
/// occurrence of `reference` among the seen references sit at the same
/// position, meaning both were recorded together by one earlier import.
/// A value that has not been seen at all never matches.
fn is_duplicate_import(
    sources: &[&str],
    references: &[&str],
    source: &str,
    reference: &str,
) -> bool {
    match (
        sources.iter().position(|seen| *seen == source),
        references.iter().position(|seen| *seen == reference),
    ) {
        (Some(source_index), Some(reference_index)) => source_index == reference_index,
        _ => false,
    }
}
