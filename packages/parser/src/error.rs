use crate::ast::Span;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {pos}: expected {expected}, found {found}")]
    UnexpectedToken {
        pos: usize,
        span: Span,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of file at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Invalid syntax at {pos}: {message}")]
    InvalidSyntax {
        pos: usize,
        span: Span,
        message: String,
    },

    #[error("Closing tag </{found}> at {pos} does not match <{expected}>")]
    MismatchedClosingTag {
        pos: usize,
        span: Span,
        expected: String,
        found: String,
    },

    #[error("Element <{name}> opened at {pos} is never closed")]
    UnclosedElement { pos: usize, span: Span, name: String },

    #[error("Lexer error at {pos}")]
    LexerError { pos: usize, span: Span },
}

impl ParseError {
    pub fn unexpected_token(span: Span, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            pos: span.start,
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn invalid_syntax(span: Span, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            pos: span.start,
            span,
            message: message.into(),
        }
    }

    pub fn mismatched_closing_tag(span: Span, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::MismatchedClosingTag {
            pos: span.start,
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unclosed_element(span: Span, name: impl Into<String>) -> Self {
        Self::UnclosedElement {
            pos: span.start,
            span,
            name: name.into(),
        }
    }

    pub fn lexer_error(span: Span) -> Self {
        Self::LexerError {
            pos: span.start,
            span,
        }
    }

    /// Byte offset the error points at
    pub fn pos(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { pos, .. }
            | ParseError::UnexpectedEof { pos, .. }
            | ParseError::InvalidSyntax { pos, .. }
            | ParseError::MismatchedClosingTag { pos, .. }
            | ParseError::UnclosedElement { pos, .. }
            | ParseError::LexerError { pos, .. } => *pos,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidSyntax { span, .. }
            | ParseError::MismatchedClosingTag { span, .. }
            | ParseError::UnclosedElement { span, .. }
            | ParseError::LexerError { span, .. } => *span,
            ParseError::UnexpectedEof { pos, .. } => Span::new(*pos, *pos),
        }
    }

    /// Re-anchor an error raised while parsing a slice that starts at `base`
    pub fn offset(self, base: usize) -> Self {
        match self {
            ParseError::UnexpectedToken { pos, span, expected, found } => ParseError::UnexpectedToken {
                pos: pos + base,
                span: span.offset(base),
                expected,
                found,
            },
            ParseError::UnexpectedEof { pos, expected } => ParseError::UnexpectedEof {
                pos: pos + base,
                expected,
            },
            ParseError::InvalidSyntax { pos, span, message } => ParseError::InvalidSyntax {
                pos: pos + base,
                span: span.offset(base),
                message,
            },
            ParseError::MismatchedClosingTag { pos, span, expected, found } => {
                ParseError::MismatchedClosingTag {
                    pos: pos + base,
                    span: span.offset(base),
                    expected,
                    found,
                }
            }
            ParseError::UnclosedElement { pos, span, name } => ParseError::UnclosedElement {
                pos: pos + base,
                span: span.offset(base),
                name,
            },
            ParseError::LexerError { pos, span } => ParseError::LexerError {
                pos: pos + base,
                span: span.offset(base),
            },
        }
    }

    #[cfg_attr(not(feature = "pretty-errors"), allow(dead_code))]
    fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. } | ParseError::UnexpectedEof { expected, .. } => {
                format!("expected {}", expected)
            }
            ParseError::InvalidSyntax { message, .. } => message.clone(),
            ParseError::MismatchedClosingTag { expected, .. } => format!("expected </{}>", expected),
            ParseError::UnclosedElement { name, .. } => format!("<{}> opened here", name),
            ParseError::LexerError { .. } => "unrecognised input".to_string(),
        }
    }
}

/// Pretty-print errors with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub mod pretty {
    use super::ParseError;
    use ariadne::{Color, Label, Report, ReportKind, Source};

    pub fn format_error(error: &ParseError, filename: &str, source: &str) -> String {
        let span = error.span();
        let start = span.start.min(source.len());
        let end = span.end.max(start + 1).min(source.len().max(start));

        let report = Report::build(ReportKind::Error, filename, start)
            .with_message(error.to_string())
            .with_label(
                Label::new((filename, start..end))
                    .with_color(Color::Red)
                    .with_message(error.label()),
            )
            .finish();

        let mut output = Vec::new();
        if report
            .write((filename, Source::from(source)), &mut output)
            .is_err()
        {
            return error.to_string();
        }

        String::from_utf8(output).unwrap_or_else(|_| error.to_string())
    }
}
