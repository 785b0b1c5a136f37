//! LeanHeaders AST - Core types for parsed headers
//!
//! This crate defines declaration and type reference nodes, pragma
//! directives, diagnostics, and spans for source locations.

mod span;
mod types;
mod decl;
mod directive;
mod diagnostic;

pub use span::*;
pub use types::*;
pub use decl::*;
pub use directive::*;
pub use diagnostic::*;

use serde::{Deserialize, Serialize};

/// Everything the parser recovered from one header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedHeader {
    pub declarations: Vec<Declaration>,
    pub directives: Vec<Directive>,
    pub imports: Vec<ImportLine>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedHeader {
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.declarations.iter().filter_map(|d| match &d.kind {
            DeclarationKind::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn protocols(&self) -> impl Iterator<Item = &ProtocolDecl> {
        self.declarations.iter().filter_map(|d| match &d.kind {
            DeclarationKind::Protocol(proto) => Some(proto),
            _ => None,
        })
    }

    pub fn forwards(&self) -> impl Iterator<Item = &ForwardDecl> {
        self.declarations.iter().filter_map(|d| match &d.kind {
            DeclarationKind::Forward(forward) => Some(forward),
            _ => None,
        })
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.declarations.iter().filter_map(|d| match &d.kind {
            DeclarationKind::Property(prop) => Some(prop),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.declarations.iter().filter_map(|d| match &d.kind {
            DeclarationKind::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
