//! Type references as written in header declarations

use crate::{Ident, Span};
use serde::{Deserialize, Serialize};

/// A type reference: `NSArray<NSString *> * _Nullable`, `id<Proto>`,
/// `void (^)(int)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub kind: TypeKind,
    /// Generic arguments: `NSArray<NSString *>`
    pub generics: Vec<TypeRef>,
    /// Protocol conformances: `id<NSCopying, NSCoding>`
    pub conformances: Vec<Ident>,
    /// Number of `*`
    pub indirection: u8,
    pub qualifiers: Vec<Qualifier>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// Named type: `NSString`, `int`, `unsigned long`
    Named(Ident),

    /// Block type: `ReturnType (^name)(Params)`
    Block(Box<BlockType>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockType {
    /// Name written inside `(^name)`, if any
    pub name: Option<Ident>,
    pub returns: TypeRef,
    pub params: Vec<BlockParam>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockParam {
    pub name: Option<Ident>,
    pub ty: TypeRef,
}

/// A qualifier attached to one indirection level of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub kind: QualifierKind,
    /// 0 for the base type, n for the n-th `*`
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualifierKind {
    Const,
    Nullable,
    Nonnull,
    NullUnspecified,
}

impl QualifierKind {
    /// Classify a qualifier keyword in any of its spellings
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "const" => QualifierKind::Const,
            "nullable" | "_Nullable" | "__nullable" => QualifierKind::Nullable,
            "nonnull" | "_Nonnull" | "__nonnull" => QualifierKind::Nonnull,
            "null_unspecified" | "unspecified" | "_Null_unspecified" | "__null_unspecified" => {
                QualifierKind::NullUnspecified
            }
            _ => return None,
        })
    }

    pub fn is_nullability(self) -> bool {
        !matches!(self, QualifierKind::Const)
    }
}

/// How a `<...>` list following a type name is to be read.
///
/// The grammar is structural; the declaration context decides whether the
/// list names generic arguments or protocol conformances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleRole {
    Conformance,
    Generic,
    /// Conformances when every entry is a bare identifier, generics otherwise
    Infer,
}

impl TypeRef {
    pub fn named(name: Ident) -> Self {
        let span = name.span;
        Self {
            kind: TypeKind::Named(name),
            generics: Vec::new(),
            conformances: Vec::new(),
            indirection: 0,
            qualifiers: Vec::new(),
            span,
        }
    }

    /// Base identifier, `None` for block types
    pub fn base(&self) -> Option<&Ident> {
        match &self.kind {
            TypeKind::Named(name) => Some(name),
            TypeKind::Block(_) => None,
        }
    }

    pub fn base_name(&self) -> Option<&str> {
        self.base().map(Ident::as_str)
    }

    pub fn is_block(&self) -> bool {
        matches!(self.kind, TypeKind::Block(_))
    }

    pub fn block(&self) -> Option<&BlockType> {
        match &self.kind {
            TypeKind::Block(block) => Some(block),
            TypeKind::Named(_) => None,
        }
    }

    /// True when this is a lone identifier with nothing attached
    pub fn is_bare(&self) -> bool {
        matches!(self.kind, TypeKind::Named(_))
            && self.generics.is_empty()
            && self.conformances.is_empty()
            && self.indirection == 0
            && self.qualifiers.is_empty()
    }

    /// Qualifiers attached at the given indirection level
    pub fn qualifiers_at(&self, level: u8) -> impl Iterator<Item = QualifierKind> + '_ {
        self.qualifiers
            .iter()
            .filter(move |q| q.level == level)
            .map(|q| q.kind)
    }

    pub fn has_qualifier(&self, kind: QualifierKind, level: u8) -> bool {
        self.qualifiers_at(level).any(|k| k == kind)
    }

    /// Visit every base identifier in this reference, depth first: the
    /// base (or block return and parameters), then generic arguments,
    /// then conformances.
    pub fn walk_names<'a>(&'a self, visit: &mut impl FnMut(NameUse<'a>)) {
        match &self.kind {
            TypeKind::Named(name) => visit(NameUse::Base(name)),
            TypeKind::Block(block) => {
                block.returns.walk_names(visit);
                for param in &block.params {
                    param.ty.walk_names(visit);
                }
            }
        }
        for arg in &self.generics {
            arg.walk_names(visit);
        }
        for proto in &self.conformances {
            visit(NameUse::Conformance(proto));
        }
    }
}

/// One name occurrence found by [`TypeRef::walk_names`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameUse<'a> {
    Base(&'a Ident),
    Conformance(&'a Ident),
}

impl<'a> NameUse<'a> {
    pub fn ident(self) -> &'a Ident {
        match self {
            NameUse::Base(ident) | NameUse::Conformance(ident) => ident,
        }
    }
}

impl BlockType {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
