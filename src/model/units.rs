//! Units definitions and their unit entries.

use smol_str::SmolStr;

use super::Import;
use crate::standard_units::{is_si_prefix, is_standard_unit};

/// One `<unit>` entry inside a units definition.
///
/// `reference` names the units being scaled; `prefix` is either an SI
/// prefix name or an integer exponent-of-ten string, and stays empty when
/// unset. Exponent and multiplier default to `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    reference: SmolStr,
    prefix: SmolStr,
    exponent: f64,
    multiplier: f64,
}

impl Unit {
    /// Creates a unit entry referencing the given units name.
    pub fn new(reference: impl Into<SmolStr>) -> Self {
        Self {
            reference: reference.into(),
            prefix: SmolStr::default(),
            exponent: 1.0,
            multiplier: 1.0,
        }
    }

    /// Sets the prefix, builder style.
    pub fn with_prefix(mut self, prefix: impl Into<SmolStr>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the exponent, builder style.
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    /// Sets the multiplier, builder style.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Returns the referenced units name.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the prefix, or `""` when unset.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the exponent.
    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Returns the multiplier.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

/// A named units definition, owned by a model or a component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Units {
    name: SmolStr,
    import: Option<Import>,
    import_reference: SmolStr,
    units: Vec<Unit>,
}

impl Units {
    /// Creates a units definition with the given name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            import: None,
            import_reference: SmolStr::default(),
            units: Vec::new(),
        }
    }

    /// Returns the units name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the units name.
    pub fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }

    /// Returns `true` when this definition is imported from another document.
    pub fn is_import(&self) -> bool {
        self.import.is_some()
    }

    /// Returns the import locator, if any.
    pub fn import(&self) -> Option<&Import> {
        self.import.as_ref()
    }

    /// Marks this definition as imported from `import`.
    pub fn set_import(&mut self, import: Import) {
        self.import = Some(import);
    }

    /// Returns the `units_ref` name in the source document, or `""`.
    pub fn import_reference(&self) -> &str {
        &self.import_reference
    }

    /// Sets the `units_ref` name.
    pub fn set_import_reference(&mut self, reference: impl Into<SmolStr>) {
        self.import_reference = reference.into();
    }

    /// Appends a unit entry referencing `reference` with default attributes.
    pub fn add_unit(&mut self, reference: impl Into<SmolStr>) {
        self.units.push(Unit::new(reference));
    }

    /// Appends a fully specified unit entry.
    pub fn push_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// Returns the number of unit entries.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Returns the unit entry at `index`.
    pub fn unit(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    /// Returns `true` when this definition has no unit entries.
    pub fn is_base_unit(&self) -> bool {
        self.units.is_empty()
    }

    /// Checks every unit entry of this definition and returns one message
    /// per violation, in entry order.
    ///
    /// `names_in_scope` lists the units names declared in the enclosing
    /// scope, so an entry may reference a sibling definition. References
    /// resolve against that list or the standard unit names; prefixes must
    /// be an SI prefix or an integer string.
    pub fn validate_unit_entries(&self, names_in_scope: &[SmolStr]) -> Vec<String> {
        let mut errors = Vec::new();
        for unit in &self.units {
            if unit.reference().is_empty() {
                errors.push(format!(
                    "Unit in units '{}' does not have a valid units reference.",
                    self.name
                ));
            } else if !is_standard_unit(unit.reference())
                && !names_in_scope.iter().any(|n| n == unit.reference())
            {
                errors.push(format!(
                    "Unit reference '{}' in units '{}' is not a valid reference to a local units or a standard unit.",
                    unit.reference(),
                    self.name
                ));
            }
            if !unit.prefix().is_empty()
                && !is_si_prefix(unit.prefix())
                && unit.prefix().parse::<i64>().is_err()
            {
                errors.push(format!(
                    "Prefix '{}' of a unit referencing '{}' in units '{}' is not a valid integer or an SI prefix.",
                    unit.prefix(),
                    unit.reference(),
                    self.name
                ));
            }
        }
        errors
    }
}
