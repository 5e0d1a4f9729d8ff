//! Component-level validation pass.

use smol_str::SmolStr;

use super::error::{ErrorKind, Subject, ValidationError};
use super::{math_validation, units_validation, variable_validation};
use crate::model::Component;

/// Runs the component pass: name, local units and variable uniqueness,
/// delegation into each child, and the math body if one is present.
pub(super) fn run_component_validation(component: &Component, errors: &mut Vec<ValidationError>) {
    if component.name().is_empty() {
        errors.push(ValidationError::new(
            ErrorKind::Component,
            "Component does not have a valid name attribute.",
            Subject::Component(component.name().into()),
        ));
    }

    // Duplicate names first, then the definitions themselves, so a
    // component's uniqueness errors lead its units errors.
    let mut units_names: Vec<SmolStr> = Vec::new();
    for units in component.units_iter() {
        let units_name = units.name();
        if units_name.is_empty() {
            continue;
        }
        if units_names.iter().any(|name| name.as_str() == units_name) {
            errors.push(ValidationError::new(
                ErrorKind::Component,
                format!(
                    "Component '{}' contains multiple units with the name '{units_name}'. Valid units names should be unique to their component.",
                    component.name()
                ),
                Subject::Component(component.name().into()),
            ));
        }
        units_names.push(units_name.into());
    }
    for units in component.units_iter() {
        units_validation::run_units_validation(units, &units_names, errors);
    }

    // Collect every variable name up front: an initial_value may refer to
    // a sibling declared later in the component.
    let mut variable_names: Vec<SmolStr> = Vec::new();
    for variable in component.variables() {
        let variable_name = variable.name();
        if variable_name.is_empty() {
            continue;
        }
        if variable_names
            .iter()
            .any(|name| name.as_str() == variable_name)
        {
            errors.push(ValidationError::new(
                ErrorKind::Component,
                format!(
                    "Component '{}' contains multiple variables with the name '{variable_name}'. Valid variable names should be unique to their component.",
                    component.name()
                ),
                Subject::Component(component.name().into()),
            ));
        }
        variable_names.push(variable_name.into());
    }
    for variable in component.variables() {
        variable_validation::run_variable_validation(variable, &variable_names, errors);
    }

    if !component.math().is_empty() {
        math_validation::run_math_validation(component, &variable_names, errors);
    }
}
