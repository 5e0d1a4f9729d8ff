//! Components: the named scopes that hold variables, local units, and math.

use smol_str::SmolStr;

use super::{Import, Units, Variable};

/// A component of a model.
///
/// The math body is kept as the raw XML string it was declared with; it is
/// parsed on demand when the component is validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    name: SmolStr,
    units: Vec<Units>,
    variables: Vec<Variable>,
    math: String,
    import: Option<Import>,
    import_reference: SmolStr,
}

impl Component {
    /// Creates a component with the given name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the component name.
    pub fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }

    /// Appends a local units definition.
    pub fn add_units(&mut self, units: Units) {
        self.units.push(units);
    }

    /// Returns the number of local units definitions.
    pub fn units_count(&self) -> usize {
        self.units.len()
    }

    /// Returns the local units definition at `index`.
    pub fn units(&self, index: usize) -> Option<&Units> {
        self.units.get(index)
    }

    /// Iterates over the local units definitions in document order.
    pub fn units_iter(&self) -> impl Iterator<Item = &Units> {
        self.units.iter()
    }

    /// Returns `true` when this component declares units named `name`.
    pub fn has_units(&self, name: &str) -> bool {
        self.units.iter().any(|u| u.name() == name)
    }

    /// Appends a variable.
    pub fn add_variable(&mut self, variable: Variable) {
        self.variables.push(variable);
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the variable at `index`.
    pub fn variable(&self, index: usize) -> Option<&Variable> {
        self.variables.get(index)
    }

    /// Iterates over the variables in document order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    /// Returns the math body, or `""` when the component has none.
    pub fn math(&self) -> &str {
        &self.math
    }

    /// Sets the math body.
    pub fn set_math(&mut self, math: impl Into<String>) {
        self.math = math.into();
    }

    /// Returns `true` when this component is imported from another document.
    pub fn is_import(&self) -> bool {
        self.import.is_some()
    }

    /// Returns the import locator, if any.
    pub fn import(&self) -> Option<&Import> {
        self.import.as_ref()
    }

    /// Marks this component as imported from `import`.
    pub fn set_import(&mut self, import: Import) {
        self.import = Some(import);
    }

    /// Returns the `component_ref` name in the source document, or `""`.
    pub fn import_reference(&self) -> &str {
        &self.import_reference
    }

    /// Sets the `component_ref` name.
    pub fn set_import_reference(&mut self, reference: impl Into<SmolStr>) {
        self.import_reference = reference.into();
    }
}
