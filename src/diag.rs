//! Diagnostic model for the XML front-end.
//!
//! Math bodies arrive as strings, so parse problems are reported against
//! byte offsets into that string. `Diag` captures the message, an optional
//! labeled span, and optional help text; [`to_report`] converts one into a
//! miette [`Report`] with source context for terminal rendering.

use miette::{Diagnostic, LabeledSpan, Report, Severity};
use std::fmt;
use std::ops::Range;

/// A byte range in the source string.
pub type Span = Range<usize>;

/// A diagnostic produced while parsing or checking an XML string.
///
/// All diagnostics from the XML front-end are errors; the validator decides
/// which entity to attribute them to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    /// The main diagnostic message.
    pub message: String,
    /// The source location this diagnostic points at, if known.
    pub span: Option<Span>,
    /// Label text attached to the span.
    pub label: Option<String>,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
}

impl Diag {
    /// Creates a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            label: None,
            help: None,
        }
    }

    /// Attaches a labeled source span.
    pub fn with_span(mut self, span: Span, label: impl Into<String>) -> Self {
        self.span = Some(span);
        self.label = Some(label.into());
        self
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Source text a batch of diagnostics refers to.
#[derive(Debug, Clone)]
pub struct SourceFile {
    content: String,
    name: Option<String>,
}

impl SourceFile {
    /// Creates a source file from the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: None,
        }
    }

    /// Creates a source file with a display name.
    pub fn with_name(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            name: Some(name.into()),
        }
    }

    /// Returns the source content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Clamps a span to the bounds of this source.
    fn clamp(&self, span: &Span) -> Span {
        let len = self.content.len();
        let start = span.start.min(len);
        let end = span.end.min(len).max(start);
        start..end
    }
}

/// Converts a batch of diagnostics to miette reports with source context.
pub fn to_reports(diagnostics: &[Diag], source: &SourceFile) -> Vec<Report> {
    diagnostics
        .iter()
        .map(|diag| to_report(diag, source))
        .collect()
}

/// Converts a single diagnostic to a miette report.
///
/// Spans are clamped to the source bounds, so a diagnostic carrying a stale
/// span never panics during rendering.
pub fn to_report(diag: &Diag, source: &SourceFile) -> Report {
    let labels = diag
        .span
        .as_ref()
        .map(|span| {
            let clamped = source.clamp(span);
            let offsets = (clamped.start, clamped.end - clamped.start);
            vec![LabeledSpan::new_primary_with_span(
                diag.label.clone(),
                offsets,
            )]
        })
        .unwrap_or_default();

    let rendered = RenderedDiag {
        message: diag.message.clone(),
        help: diag.help.clone(),
        labels,
    };

    let report = Report::new(rendered);
    match source.name() {
        Some(name) => {
            report.with_source_code(miette::NamedSource::new(name, source.content().to_string()))
        }
        None => report.with_source_code(source.content().to_string()),
    }
}

/// The concrete type handed to miette.
#[derive(Debug)]
struct RenderedDiag {
    message: String,
    help: Option<String>,
    labels: Vec<LabeledSpan>,
}

impl fmt::Display for RenderedDiag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RenderedDiag {}

impl Diagnostic for RenderedDiag {
    fn severity(&self) -> Option<Severity> {
        Some(Severity::Error)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.labels.is_empty() {
            None
        } else {
            Some(Box::new(self.labels.clone().into_iter()))
        }
    }
}
