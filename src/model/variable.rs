//! Variables declared inside a component.

use smol_str::SmolStr;

/// A variable declaration.
///
/// `units` names the units the variable is expressed in; `interface_type`
/// and `initial_value` are optional attributes and stay empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable {
    name: SmolStr,
    units: SmolStr,
    interface_type: SmolStr,
    initial_value: SmolStr,
}

impl Variable {
    /// Creates a variable with the given name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            units: SmolStr::default(),
            interface_type: SmolStr::default(),
            initial_value: SmolStr::default(),
        }
    }

    /// Sets the units reference, builder style.
    pub fn with_units(mut self, units: impl Into<SmolStr>) -> Self {
        self.units = units.into();
        self
    }

    /// Sets the interface type, builder style.
    pub fn with_interface_type(mut self, interface_type: impl Into<SmolStr>) -> Self {
        self.interface_type = interface_type.into();
        self
    }

    /// Sets the initial value, builder style.
    pub fn with_initial_value(mut self, initial_value: impl Into<SmolStr>) -> Self {
        self.initial_value = initial_value.into();
        self
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the variable name.
    pub fn set_name(&mut self, name: impl Into<SmolStr>) {
        self.name = name.into();
    }

    /// Returns the units reference, or `""` when unset.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Sets the units reference.
    pub fn set_units(&mut self, units: impl Into<SmolStr>) {
        self.units = units.into();
    }

    /// Returns the interface type, or `""` when unset.
    pub fn interface_type(&self) -> &str {
        &self.interface_type
    }

    /// Sets the interface type.
    pub fn set_interface_type(&mut self, interface_type: impl Into<SmolStr>) {
        self.interface_type = interface_type.into();
    }

    /// Returns the initial value, or `""` when unset.
    pub fn initial_value(&self) -> &str {
        &self.initial_value
    }

    /// Sets the initial value.
    pub fn set_initial_value(&mut self, initial_value: impl Into<SmolStr>) {
        self.initial_value = initial_value.into();
    }
}
