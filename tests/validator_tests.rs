//! Integration tests for the entity validation passes.
//!
//! Covers the model, component, units, and variable rules: names,
//! uniqueness at each scope, import well-formedness, protected standard
//! unit names, and variable attributes. Math-body validation has its own
//! suite in `math_validation_tests.rs`.

use cellml_validator::{
    Component, ErrorKind, Import, Model, Subject, Unit, Units, ValidationError, Validator, Variable,
};

fn validate(model: &Model) -> Validator {
    let mut validator = Validator::new();
    validator.validate_model(model);
    validator
}

fn descriptions(validator: &Validator) -> Vec<&str> {
    validator
        .errors()
        .iter()
        .map(ValidationError::description)
        .collect()
}

// ===== Names =====

#[test]
fn unnamed_model_reports_one_model_error() {
    let validator = validate(&Model::new(""));

    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Model);
    assert_eq!(
        error.description(),
        "Model does not have a valid name attribute."
    );
    assert_eq!(error.subject(), &Subject::Model("".into()));
}

#[test]
fn named_empty_model_is_valid() {
    let validator = validate(&Model::new("m"));
    assert_eq!(validator.error_count(), 0);
}

#[test]
fn unnamed_component_reports_one_component_error() {
    let mut model = Model::new("m");
    model.add_component(Component::new(""));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Component);
    assert_eq!(
        error.description(),
        "Component does not have a valid name attribute."
    );
}

#[test]
fn unnamed_units_reports_one_units_error() {
    let mut model = Model::new("m");
    model.add_units(Units::new(""));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Units);
    assert_eq!(
        error.description(),
        "Units does not have a valid name attribute."
    );
}

#[test]
fn unnamed_variable_reports_name_and_units_errors() {
    let mut component = Component::new("c");
    component.add_variable(Variable::new(""));
    let mut model = Model::new("m");
    model.add_component(component);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 2);
    assert_eq!(
        descriptions(&validator),
        vec![
            "Variable does not have a valid name attribute.",
            "Variable '' does not have a valid units attribute.",
        ]
    );
    assert!(
        validator
            .errors()
            .iter()
            .all(|e| e.kind() == ErrorKind::Variable)
    );
}

// ===== Uniqueness =====

#[test]
fn duplicate_component_names_report_one_model_error() {
    let mut model = Model::new("m");
    model.add_component(Component::new("c"));
    model.add_component(Component::new("c"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Model);
    assert_eq!(
        error.description(),
        "Model 'm' contains multiple components with the name 'c'. Valid component names should be unique to their model."
    );
}

#[test]
fn duplicate_units_names_in_model_report_one_model_error() {
    let mut model = Model::new("m");
    model.add_units(Units::new("u"));
    model.add_units(Units::new("u"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    assert_eq!(
        validator.error(0).map(ValidationError::description),
        Some(
            "Model 'm' contains multiple units with the name 'u'. Valid units names should be unique to their model."
        )
    );
}

#[test]
fn duplicate_units_names_in_component_report_component_error() {
    let mut component = Component::new("c");
    component.add_units(Units::new("u"));
    component.add_units(Units::new("u"));
    let mut model = Model::new("m");
    model.add_component(component);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Component);
    assert_eq!(
        error.description(),
        "Component 'c' contains multiple units with the name 'u'. Valid units names should be unique to their component."
    );
}

#[test]
fn duplicate_variable_names_report_component_error() {
    let mut component = Component::new("c");
    component.add_variable(Variable::new("x").with_units("second"));
    component.add_variable(Variable::new("x").with_units("second"));
    let mut model = Model::new("m");
    model.add_component(component);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    assert_eq!(
        validator.error(0).map(ValidationError::description),
        Some(
            "Component 'c' contains multiple variables with the name 'x'. Valid variable names should be unique to their component."
        )
    );
}

#[test]
fn triplicate_component_names_report_two_model_errors() {
    let mut model = Model::new("m");
    model.add_component(Component::new("c"));
    model.add_component(Component::new("c"));
    model.add_component(Component::new("c"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 2);
}

// ===== Standard unit names =====

#[test]
fn protected_standard_unit_name_reports_units_error() {
    let mut model = Model::new("m");
    model.add_units(Units::new("second"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Units);
    assert_eq!(
        error.description(),
        "Units is named 'second', which is a protected standard unit name."
    );
    assert_eq!(error.subject(), &Subject::Units("second".into()));
}

#[test]
fn protected_name_applies_inside_components_too() {
    let mut component = Component::new("c");
    component.add_units(Units::new("metre"));
    let mut model = Model::new("m");
    model.add_component(component);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    assert!(
        validator
            .error(0)
            .is_some_and(|e| e.description().contains("protected standard unit name"))
    );
}

#[test]
fn unit_entry_errors_are_reported_as_units_errors() {
    let mut units = Units::new("speed");
    units.push_unit(Unit::new("furlong").with_prefix("house"));
    let mut model = Model::new("m");
    model.add_units(units);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 2);
    assert!(
        validator
            .errors()
            .iter()
            .all(|e| e.kind() == ErrorKind::Units && e.subject() == &Subject::Units("speed".into()))
    );
    assert!(descriptions(&validator)[0].contains("'furlong'"));
    assert!(descriptions(&validator)[1].contains("'house'"));
}

#[test]
fn unit_entries_resolve_against_sibling_units_in_the_model() {
    let mut compound = Units::new("compound_unit");
    compound.push_unit(Unit::new("ampere").with_prefix("micro"));
    let mut multiplied = Units::new("multiplied");
    multiplied.add_unit("compound_unit");

    let mut model = Model::new("m");
    model.add_units(compound);
    model.add_units(multiplied);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 0);
}

#[test]
fn model_uniqueness_errors_precede_unit_entry_errors() {
    // The first definition carries a broken entry; the duplicate of its
    // name is discovered in the collection pass, which runs first.
    let mut broken = Units::new("u");
    broken.add_unit("");
    let mut model = Model::new("m");
    model.add_units(broken);
    model.add_units(Units::new("u"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 2);
    assert_eq!(validator.error(0).map(ValidationError::kind), Some(ErrorKind::Model));
    assert_eq!(
        validator.error(1).map(ValidationError::description),
        Some("Unit in units 'u' does not have a valid units reference.")
    );
}

// ===== Variables =====

#[test]
fn valid_interface_types_pass() {
    let mut component = Component::new("c");
    for (index, interface) in ["public", "private", "none", "public_and_private"]
        .iter()
        .enumerate()
    {
        component.add_variable(
            Variable::new(format!("v{index}"))
                .with_units("second")
                .with_interface_type(*interface),
        );
    }
    let mut model = Model::new("m");
    model.add_component(component);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 0);
}

#[test]
fn invalid_interface_type_reports_variable_error() {
    let mut component = Component::new("c");
    component.add_variable(
        Variable::new("x")
            .with_units("second")
            .with_interface_type("protected"),
    );
    let mut model = Model::new("m");
    model.add_component(component);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    assert_eq!(
        validator.error(0).map(ValidationError::description),
        Some("Variable 'x' has an invalid interface attribute value 'protected'.")
    );
}

#[test]
fn numeric_initial_value_passes() {
    let mut component = Component::new("c");
    component.add_variable(
        Variable::new("x")
            .with_units("second")
            .with_initial_value("1.5e-3"),
    );
    let mut model = Model::new("m");
    model.add_component(component);

    assert_eq!(validate(&model).error_count(), 0);
}

#[test]
fn sibling_reference_initial_value_passes() {
    // The reference may point forward: names are collected before any
    // variable is validated.
    let mut component = Component::new("c");
    component.add_variable(
        Variable::new("y")
            .with_units("second")
            .with_initial_value("x"),
    );
    component.add_variable(Variable::new("x").with_units("second"));
    let mut model = Model::new("m");
    model.add_component(component);

    assert_eq!(validate(&model).error_count(), 0);
}

#[test]
fn unresolvable_initial_value_reports_variable_error() {
    let mut component = Component::new("c");
    component.add_variable(
        Variable::new("x")
            .with_units("second")
            .with_initial_value("abc"),
    );
    let mut model = Model::new("m");
    model.add_component(component);

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Variable);
    assert_eq!(
        error.description(),
        "Variable 'x' has an invalid initial value 'abc'. Initial values must be a real number string or a variable reference."
    );
    assert_eq!(error.subject(), &Subject::Variable("x".into()));
}

// ===== Imports =====

fn imported_component(name: &str, source: &str, reference: &str) -> Component {
    let mut component = Component::new(name);
    component.set_import(Import::new(source));
    component.set_import_reference(reference);
    component
}

fn imported_units(name: &str, source: &str, reference: &str) -> Units {
    let mut units = Units::new(name);
    units.set_import(Import::new(source));
    units.set_import_reference(reference);
    units
}

#[test]
fn imported_component_without_reference_reports_component_error() {
    let mut model = Model::new("m");
    model.add_component(imported_component("c", "other.cellml", ""));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Component);
    assert_eq!(
        error.description(),
        "Imported component 'c' does not have a valid component_ref attribute."
    );
}

#[test]
fn imported_component_without_source_reports_import_error() {
    let mut model = Model::new("m");
    model.add_component(imported_component("c", "", "ref"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Import);
    assert_eq!(
        error.description(),
        "Import of component 'c' does not have a valid locator xlink:href attribute."
    );
    assert_eq!(error.subject(), &Subject::Import("".into()));
}

#[test]
fn imported_component_missing_both_reports_both_errors() {
    let mut model = Model::new("m");
    model.add_component(imported_component("c", "", ""));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 2);
    assert_eq!(
        validator.error(0).map(ValidationError::kind),
        Some(ErrorKind::Component)
    );
    assert_eq!(
        validator.error(1).map(ValidationError::kind),
        Some(ErrorKind::Import)
    );
}

#[test]
fn duplicate_component_import_pair_reports_model_error() {
    let mut model = Model::new("m");
    model.add_component(imported_component("c1", "other.cellml", "src"));
    model.add_component(imported_component("c2", "other.cellml", "src"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Model);
    assert_eq!(
        error.description(),
        "Model 'm' contains multiple imported components from 'other.cellml' with the same component_ref attribute 'src'."
    );
}

#[test]
fn distinct_import_pairs_are_not_duplicates() {
    let mut model = Model::new("m");
    model.add_component(imported_component("c1", "a.cellml", "x"));
    model.add_component(imported_component("c2", "b.cellml", "y"));
    model.add_component(imported_component("c3", "a.cellml", "y"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 0);
}

#[test]
fn import_pair_with_errors_does_not_poison_duplicate_tracking() {
    // The first import is missing its href, so its pair is recorded but
    // never compared; the second identical pair reports no duplicate
    // against it either, because '' was recorded as the first source.
    let mut model = Model::new("m");
    model.add_component(imported_component("c1", "", "src"));
    model.add_component(imported_component("c2", "other.cellml", "src"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    assert_eq!(
        validator.error(0).map(ValidationError::kind),
        Some(ErrorKind::Import)
    );
}

#[test]
fn imported_units_without_reference_reports_units_error() {
    let mut model = Model::new("m");
    model.add_units(imported_units("u", "other.cellml", ""));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    let error = validator.error(0).expect("one error");
    assert_eq!(error.kind(), ErrorKind::Units);
    assert_eq!(
        error.description(),
        "Imported units 'u' does not have a valid units_ref attribute."
    );
}

#[test]
fn duplicate_units_import_pair_reports_model_error() {
    let mut model = Model::new("m");
    model.add_units(imported_units("u1", "other.cellml", "src"));
    model.add_units(imported_units("u2", "other.cellml", "src"));

    let validator = validate(&model);
    assert_eq!(validator.error_count(), 1);
    assert_eq!(
        validator.error(0).map(ValidationError::description),
        Some(
            "Model 'm' contains multiple imported units from 'other.cellml' with the same units_ref attribute 'src'."
        )
    );
}

// ===== Ordering, determinism, purity =====

#[test]
fn errors_come_out_in_discovery_order() {
    let mut first = Component::new("a");
    first.add_variable(Variable::new(""));
    let second = Component::new("");

    let mut model = Model::new("");
    model.add_component(first);
    model.add_component(second);
    model.add_units(Units::new("second"));

    let validator = validate(&model);
    let kinds: Vec<ErrorKind> = validator.errors().iter().map(ValidationError::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::Model,     // model name
            ErrorKind::Variable,  // component a: variable name
            ErrorKind::Variable,  // component a: variable units
            ErrorKind::Component, // component b: name
            ErrorKind::Units,     // model units: protected name
        ]
    );
}

#[test]
fn back_to_back_runs_yield_identical_errors() {
    let mut component = Component::new("c");
    component.add_variable(Variable::new("x").with_initial_value("abc"));
    let mut model = Model::new("");
    model.add_component(component);
    model.add_units(Units::new("second"));

    let mut validator = Validator::new();
    validator.validate_model(&model);
    let first: Vec<ValidationError> = validator.errors().to_vec();

    validator.validate_model(&model);
    assert_eq!(validator.errors(), first.as_slice());
}

#[test]
fn validation_does_not_mutate_the_model() {
    let mut component = Component::new("c");
    component.add_variable(Variable::new("x").with_units("second"));
    component.set_math(
        "<math xmlns=\"http://www.w3.org/1998/Math/MathML\" xmlns:cellml=\"http://www.cellml.org/cellml/2.0#\">\
         <apply><eq/><ci>x</ci><cn cellml:units=\"second\">2</cn></apply></math>",
    );
    let mut model = Model::new("m");
    model.add_component(component);
    model.add_units(Units::new("u"));

    let before = model.clone();
    let _ = validate(&model);
    assert_eq!(model, before);
}
