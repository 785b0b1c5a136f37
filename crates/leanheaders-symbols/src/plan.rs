//! Import plans: the minimal set of imports and forward declarations

use crate::{NeedOrigin, ResolveError, SymbolKey};
use leanheaders_ast::{Requirement, Span, SymbolKind};
use serde::{Deserialize, Serialize};

/// A symbol that must be imported, with the file to import
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlannedImport {
    pub symbol: SymbolKey,
    /// File name to `#import`
    pub supplier: String,
}

/// A symbol that only needs `@class` or `@protocol`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlannedForward {
    pub symbol: SymbolKey,
    /// File that declares it, when the set contains one
    pub declared_in: Option<String>,
}

/// A requirement nothing in the set can satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unsatisfied {
    pub symbol: SymbolKey,
    pub requirement: Requirement,
    pub origin: NeedOrigin,
    pub span: Span,
    pub line: usize,
}

/// Resolution result for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPlan {
    pub file: String,
    /// Sorted by symbol
    pub imports: Vec<PlannedImport>,
    /// Sorted by symbol
    pub forwards: Vec<PlannedForward>,
    pub unsatisfied: Vec<Unsatisfied>,
    /// References left to system and framework headers
    pub external: Vec<SymbolKey>,
}

impl ImportPlan {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.unsatisfied.is_empty()
    }

    /// Distinct files to import, in order
    pub fn import_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self.imports.iter().map(|i| i.supplier.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        files
    }

    pub fn import_symbols(&self) -> impl Iterator<Item = &SymbolKey> {
        self.imports.iter().map(|i| &i.symbol)
    }

    pub fn forward_symbols(&self) -> impl Iterator<Item = &SymbolKey> {
        self.forwards.iter().map(|f| &f.symbol)
    }

    /// Whether the plan imports or forward-declares `symbol`
    pub fn provides(&self, symbol: &SymbolKey) -> bool {
        self.import_symbols().chain(self.forward_symbols()).any(|s| s == symbol)
    }

    /// One error per unsatisfied requirement
    pub fn errors(&self) -> Vec<ResolveError> {
        self.unsatisfied
            .iter()
            .map(|u| ResolveError::Unsatisfied {
                file: self.file.clone(),
                symbol: u.symbol.clone(),
                requirement: u.requirement,
                line: u.line,
                span: u.span,
            })
            .collect()
    }

    /// Render the plan as the lines a header would carry
    pub fn render(&self) -> String {
        let mut out = String::new();
        for file in self.import_files() {
            out.push_str(&format!("#import \"{}\"\n", file));
        }
        for forward in &self.forwards {
            let keyword = match forward.symbol.kind {
                SymbolKind::Protocol => "@protocol",
                _ => "@class",
            };
            out.push_str(&format!("{} {};\n", keyword, forward.symbol.name));
        }
        out
    }
}
