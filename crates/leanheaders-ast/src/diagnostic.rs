//! Diagnostics raised while analyzing a header

use crate::Span;
use serde::{Deserialize, Serialize};

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "ignore", alias = "i", alias = "x")]
    Ignored,
    #[serde(alias = "n")]
    Note,
    #[serde(alias = "warn", alias = "w")]
    Warning,
    #[serde(alias = "e")]
    Error,
}

impl Severity {
    pub fn is_reported(self) -> bool {
        self != Severity::Ignored
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Ignored => "ignored",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Style findings raised on declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintKind {
    RootClass,
    RootProtocol,
    PlainEnum,
    TypedefEnum,
    EnumName,
    TypedefStruct,
    StructName,
    IncludeDirective,
}

impl LintKind {
    pub fn code(self) -> &'static str {
        match self {
            LintKind::RootClass => "root-class",
            LintKind::RootProtocol => "root-protocol",
            LintKind::PlainEnum => "plain-enum",
            LintKind::TypedefEnum => "typedef-enum",
            LintKind::EnumName => "enum-name",
            LintKind::TypedefStruct => "typedef-struct",
            LintKind::StructName => "struct-name",
            LintKind::IncludeDirective => "include-directive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Character sequence no token matches
    LexicalAnomaly,
    /// A declaration began but did not match its grammar
    GrammarMismatch,
    /// Malformed line in the pragma dialect
    DialectMismatch,
    Lint(LintKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            span,
        }
    }

    pub fn lint(kind: LintKind, severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::Lint(kind), severity, message, span)
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self.kind {
            DiagnosticKind::LexicalAnomaly => "E-LEX-001",
            DiagnosticKind::GrammarMismatch => "E-PARSE-001",
            DiagnosticKind::DialectMismatch => "E-PRAGMA-001",
            DiagnosticKind::Lint(lint) => lint.code(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
