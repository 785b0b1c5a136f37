//! Symbols, references to them, and facts that supply them

use leanheaders_ast::{Requirement, Span, SymbolKind};
use serde::{Deserialize, Serialize};

/// Index of a file in the analyzed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u32);

/// A symbol name tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolKey {
    pub kind: SymbolKind,
    pub name: String,
}

impl SymbolKey {
    pub fn new(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(SymbolKind::Class, name)
    }

    pub fn protocol(name: impl Into<String>) -> Self {
        Self::new(SymbolKind::Protocol, name)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(SymbolKind::File, name)
    }

    /// Whether a fact about `supplied` can satisfy a need for `self`.
    ///
    /// A `type` need is a bare name used in a member or alias and matches
    /// any non-file symbol of that name.
    pub fn accepts(&self, supplied: &SymbolKey) -> bool {
        self.name == supplied.name
            && (self.kind == supplied.kind
                || (self.kind == SymbolKind::Type && supplied.kind != SymbolKind::File))
    }
}

impl std::fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// Why a name is referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceRole {
    /// Superclass, or class extended by a category/extension
    Inheritance,
    /// Protocol adopted by a class, category, extension or protocol
    Adoption,
    /// Type used by a property, method, alias or block signature
    Composition,
}

impl ReferenceRole {
    /// Inheriting or adopting needs the full declaration; using a type in
    /// a signature needs only to know that it exists.
    pub fn requirement(self) -> Requirement {
        match self {
            ReferenceRole::Inheritance | ReferenceRole::Adoption => Requirement::Import,
            ReferenceRole::Composition => Requirement::Forward,
        }
    }
}

/// One occurrence of a type name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSite {
    pub name: String,
    pub kind: SymbolKind,
    pub role: ReferenceRole,
    pub span: Span,
    pub line: usize,
}

/// A distinct referenced symbol not satisfied inside its own file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub symbol: SymbolKey,
    /// Strongest requirement over all its sites
    pub requirement: Requirement,
    /// First site
    pub span: Span,
    pub line: usize,
}

/// How a file makes a symbol available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupplyOrigin {
    /// Full declaration in the file
    Declaration,
    /// `have` pragma directive
    Directive,
    /// `@class` / `@protocol` forward declaration
    ForwardDeclaration,
    /// The file itself
    File,
}

/// A fact that makes a symbol available at some strength
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub symbol: SymbolKey,
    pub strength: Requirement,
    pub origin: SupplyOrigin,
    pub span: Span,
}

impl Supply {
    pub fn satisfies(&self, symbol: &SymbolKey, requirement: Requirement) -> bool {
        symbol.accepts(&self.symbol) && self.strength >= requirement
    }
}

/// Where a need comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedOrigin {
    Reference,
    Directive,
}

/// A symbol a file requires at some strength
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Need {
    pub symbol: SymbolKey,
    pub requirement: Requirement,
    pub origin: NeedOrigin,
    pub span: Span,
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_need_accepts_classes_and_types() {
        let need = SymbolKey::new(SymbolKind::Type, "Thing");
        assert!(need.accepts(&SymbolKey::class("Thing")));
        assert!(need.accepts(&SymbolKey::new(SymbolKind::Type, "Thing")));
        assert!(!need.accepts(&SymbolKey::file("Thing")));
        assert!(!need.accepts(&SymbolKey::class("Other")));
    }

    #[test]
    fn test_kinded_need_is_strict() {
        let need = SymbolKey::protocol("NSObject");
        assert!(!need.accepts(&SymbolKey::class("NSObject")));
        assert!(need.accepts(&SymbolKey::protocol("NSObject")));
    }

    #[test]
    fn test_forward_supply_does_not_satisfy_import() {
        let supply = Supply {
            symbol: SymbolKey::class("A"),
            strength: Requirement::Forward,
            origin: SupplyOrigin::ForwardDeclaration,
            span: Span::dummy(),
        };
        assert!(supply.satisfies(&SymbolKey::class("A"), Requirement::Forward));
        assert!(!supply.satisfies(&SymbolKey::class("A"), Requirement::Import));
    }
}
