//! Error types for dependency resolution

use crate::SymbolKey;
use leanheaders_ast::{Requirement, Span};
use thiserror::Error;

/// Errors from dependency resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// E-RESOLVE-001: no file in the set supplies a required symbol
    #[error("{file}:{line}: nothing supplies {symbol} at {} strength", .requirement.keyword())]
    Unsatisfied {
        file: String,
        symbol: SymbolKey,
        requirement: Requirement,
        line: usize,
        span: Span,
    },
}

impl ResolveError {
    /// Get the source span of this error
    pub fn span(&self) -> Span {
        match self {
            ResolveError::Unsatisfied { span, .. } => *span,
        }
    }

    /// Error code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::Unsatisfied { .. } => "E-RESOLVE-001",
        }
    }
}
