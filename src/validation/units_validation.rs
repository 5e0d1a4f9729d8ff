//! Units-level validation pass.

use smol_str::SmolStr;

use super::error::{ErrorKind, Subject, ValidationError};
use crate::model::Units;
use crate::standard_units::is_standard_unit;

/// Runs the units pass: the name rules, then the entity's own per-unit
/// entry validation against the names visible in the enclosing scope.
pub(super) fn run_units_validation(
    units: &Units,
    names_in_scope: &[SmolStr],
    errors: &mut Vec<ValidationError>,
) {
    if units.name().is_empty() {
        errors.push(ValidationError::new(
            ErrorKind::Units,
            "Units does not have a valid name attribute.",
            Subject::Units(units.name().into()),
        ));
    } else if is_standard_unit(units.name()) {
        errors.push(ValidationError::new(
            ErrorKind::Units,
            format!(
                "Units is named '{}', which is a protected standard unit name.",
                units.name()
            ),
            Subject::Units(units.name().into()),
        ));
    }

    for description in units.validate_unit_entries(names_in_scope) {
        errors.push(ValidationError::new(
            ErrorKind::Units,
            description,
            Subject::Units(units.name().into()),
        ));
    }
}
