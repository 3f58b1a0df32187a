use serde::{Deserialize, Serialize};
use std::fmt;
use weave_parser::ast::{Location, Span};

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from the linter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level
    pub level: DiagnosticLevel,

    /// The rule that generated this diagnostic
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// Byte range in the document where the issue was found
    pub span: Span,

    /// Line and column of `span.start`, filled in by the linter
    pub location: Location,

    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(rule: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticLevel::Error, rule, message, span)
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticLevel::Warning, rule, message, span)
    }

    pub fn info(rule: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticLevel::Info, rule, message, span)
    }

    fn new(level: DiagnosticLevel, rule: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            rule: rule.into(),
            message: message.into(),
            span,
            location: Location::default(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {} [{}]", self.location, self.level, self.message, self.rule)
    }
}
