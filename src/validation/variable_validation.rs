//! Variable-level validation pass.

use smol_str::SmolStr;

use super::error::{ErrorKind, Subject, ValidationError};
use super::is_invalid_real;
use crate::model::Variable;

const INTERFACE_TYPES: [&str; 4] = ["public", "private", "none", "public_and_private"];

/// Runs the variable pass: name, units, interface, and initial value.
///
/// `variable_names` holds every variable name declared in the enclosing
/// component, so an initial value may be resolved as a sibling reference.
pub(super) fn run_variable_validation(
    variable: &Variable,
    variable_names: &[SmolStr],
    errors: &mut Vec<ValidationError>,
) {
    if variable.name().is_empty() {
        errors.push(ValidationError::new(
            ErrorKind::Variable,
            "Variable does not have a valid name attribute.",
            Subject::Variable(variable.name().into()),
        ));
    }

    if variable.units().is_empty() {
        errors.push(ValidationError::new(
            ErrorKind::Variable,
            format!(
                "Variable '{}' does not have a valid units attribute.",
                variable.name()
            ),
            Subject::Variable(variable.name().into()),
        ));
    }

    let interface_type = variable.interface_type();
    if !interface_type.is_empty() && !INTERFACE_TYPES.contains(&interface_type) {
        errors.push(ValidationError::new(
            ErrorKind::Variable,
            format!(
                "Variable '{}' has an invalid interface attribute value '{interface_type}'.",
                variable.name()
            ),
            Subject::Variable(variable.name().into()),
        ));
    }

    let initial_value = variable.initial_value();
    if !initial_value.is_empty()
        && !variable_names
            .iter()
            .any(|name| name.as_str() == initial_value)
        && is_invalid_real(initial_value)
    {
        errors.push(ValidationError::new(
            ErrorKind::Variable,
            format!(
                "Variable '{}' has an invalid initial value '{initial_value}'. Initial values must be a real number string or a variable reference.",
                variable.name()
            ),
            Subject::Variable(variable.name().into()),
        ));
    }
}
