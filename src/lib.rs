//! CellML 2.0 semantic validator with rich diagnostics.
//!
//! This library checks an in-memory CellML model tree against the
//! language's semantic rules: name and uniqueness constraints, import
//! well-formedness, protected standard unit names, variable attributes,
//! and the coherence of each component's embedded MathML with the
//! variables and units the component declares. Every violation is
//! reported; validation never stops at the first problem and never
//! mutates the model.
//!
//! # Example
//!
//! ```
//! use cellml_validator::{Component, Model, Validator, Variable};
//!
//! let mut component = Component::new("membrane");
//! component.add_variable(Variable::new("V").with_units("volt"));
//! let mut model = Model::new("circulation");
//! model.add_component(component);
//!
//! let mut validator = Validator::new();
//! validator.validate_model(&model);
//! assert_eq!(validator.error_count(), 0);
//!
//! // An unnamed model is the smallest possible violation.
//! validator.validate_model(&Model::new(""));
//! assert_eq!(validator.error_count(), 1);
//! assert_eq!(
//!     validator.error(0).unwrap().description(),
//!     "Model does not have a valid name attribute."
//! );
//! ```

pub mod diag;
pub mod mathml;
pub mod model;
pub mod standard_units;
pub mod validation;
pub mod xml;

// Re-export the entity tree.
pub use model::{Component, Import, Model, Unit, Units, Variable};

// Re-export the validator and its error types for convenience.
pub use diag::{Diag, SourceFile, Span};
pub use validation::{ErrorKind, Subject, ValidationError, Validator};
