//! Structured validation errors.

use smol_str::SmolStr;
use std::fmt;

/// The rule family a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Model-level rule (name, uniqueness across the model).
    Model,
    /// Component-level rule.
    Component,
    /// Units-level rule.
    Units,
    /// Variable-level rule.
    Variable,
    /// Import well-formedness rule.
    Import,
    /// XML parsing of a math body.
    Xml,
    /// MathML semantics or grammar inside a math body.
    MathMl,
}

impl ErrorKind {
    /// Returns the canonical uppercase name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Model => "MODEL",
            Self::Component => "COMPONENT",
            Self::Units => "UNITS",
            Self::Variable => "VARIABLE",
            Self::Import => "IMPORT",
            Self::Xml => "XML",
            Self::MathMl => "MATHML",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The entity a validation error is attributed to.
///
/// Errors are value-typed and independent of the tree they were produced
/// from: each variant carries the subject's identifying name (the import
/// variant carries the source locator), not a reference into the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// The model with the given name.
    Model(SmolStr),
    /// The component with the given name.
    Component(SmolStr),
    /// The units definition with the given name.
    Units(SmolStr),
    /// The variable with the given name.
    Variable(SmolStr),
    /// The import with the given source locator.
    Import(SmolStr),
}

impl Subject {
    /// Returns the identifying name carried by this subject.
    pub fn name(&self) -> &str {
        match self {
            Self::Model(name)
            | Self::Component(name)
            | Self::Units(name)
            | Self::Variable(name)
            | Self::Import(name) => name,
        }
    }
}

/// One validation failure: what went wrong, which rule family it falls
/// under, and the most specific entity it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: ErrorKind,
    description: String,
    subject: Subject,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ErrorKind, description: impl Into<String>, subject: Subject) -> Self {
        Self {
            kind,
            description: description.into(),
            subject,
        }
    }

    /// Returns the rule family.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the subject entity.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}
