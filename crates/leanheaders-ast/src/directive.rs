//! Pragma directives and import lines

use crate::Span;
use serde::{Deserialize, Serialize};

/// Kind of symbol a directive, supply or need talks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Protocol,
    /// C types: structs, enums, typedefs, block aliases
    Type,
    File,
}

impl SymbolKind {
    pub fn keyword(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Protocol => "protocol",
            SymbolKind::Type => "type",
            SymbolKind::File => "file",
        }
    }

    /// Classes and protocols can be announced with `@class`/`@protocol`
    pub fn is_forwardable(self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::Protocol)
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `need` or `have`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Need,
    Have,
}

/// `import` or `forward`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Forward,
    Import,
}

impl Requirement {
    pub fn keyword(self) -> &'static str {
        match self {
            Requirement::Forward => "forward",
            Requirement::Import => "import",
        }
    }
}

/// `#pragma LeanHeaders need import class Name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub strength: Strength,
    pub requirement: Requirement,
    pub kind: SymbolKind,
    pub name: String,
    pub span: Span,
}

impl Directive {
    pub fn is_need(&self) -> bool {
        self.strength == Strength::Need
    }

    pub fn is_have(&self) -> bool {
        self.strength == Strength::Have
    }
}

/// `#import "File.h"`, `#include "File.h"`, `#import <Kit/Kit.h>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLine {
    pub path: String,
    pub is_include: bool,
    /// `<...>` framework/system import
    pub is_angled: bool,
    pub span: Span,
}

impl ImportLine {
    /// Last path component: `Kit/Thing.h` -> `Thing.h`
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}
