//! Parser error types

use leanheaders_ast::{Diagnostic, DiagnosticKind, Severity, Span};
use leanheaders_lexer::TokenKind;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of file")]
    UnexpectedEof { span: Span },

    #[error("expected a type, found {found}")]
    NoTypeReference { found: String, span: Span },

    #[error("{what} has no name")]
    MissingName { what: &'static str, span: Span },

    #[error("{message}")]
    Dialect { message: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span } => *span,
            ParseError::NoTypeReference { span, .. } => *span,
            ParseError::MissingName { span, .. } => *span,
            ParseError::Dialect { span, .. } => *span,
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } => "E-PARSE-001",
            ParseError::UnexpectedEof { .. } => "E-PARSE-002",
            ParseError::NoTypeReference { .. } => "E-PARSE-003",
            ParseError::MissingName { .. } => "E-PARSE-004",
            ParseError::Dialect { .. } => "E-PRAGMA-001",
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        if found == TokenKind::Eof {
            return ParseError::UnexpectedEof { span };
        }
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe().to_string(),
            span,
        }
    }

    pub fn dialect(message: impl Into<String>, span: Span) -> Self {
        ParseError::Dialect {
            message: message.into(),
            span,
        }
    }

    /// Record this error as a diagnostic of the given severity
    pub fn to_diagnostic(&self, severity: Severity) -> Diagnostic {
        let kind = match self {
            ParseError::Dialect { .. } => DiagnosticKind::DialectMismatch,
            _ => DiagnosticKind::GrammarMismatch,
        };
        Diagnostic::new(kind, severity, self.to_string(), self.span())
    }
}
