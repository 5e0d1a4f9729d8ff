//! Import locators for entities defined in other documents.

use smol_str::SmolStr;

/// A reference to another CellML document, identified by its `xlink:href`
/// locator. The entity-side half of an import (the `component_ref` or
/// `units_ref` name) lives on the importing entity itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Import {
    source: SmolStr,
}

impl Import {
    /// Creates an import with the given source locator.
    pub fn new(source: impl Into<SmolStr>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the source locator (href).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Sets the source locator.
    pub fn set_source(&mut self, source: impl Into<SmolStr>) {
        self.source = source.into();
    }
}
