//! Type reference grammar
//!
//! ```text
//! type      := prefix* base angle? infix* ('*' postfix*)* block?
//! prefix    := 'const' | nullability | specifier
//! angle     := '<' type (',' type)* '>'
//! block     := '(' '^' nullability? name? ')' '(' ('void' | param (',' param)*)? ')'
//! param     := type name?
//! ```
//!
//! Qualifiers before or directly after the base attach to level 0; a
//! qualifier after the n-th `*` attaches to level n.

use leanheaders_ast::{AngleRole, BlockParam, BlockType, Ident, Qualifier, QualifierKind, TypeKind, TypeRef};
use leanheaders_lexer::TokenKind;

use crate::{ParseError, Parser};

/// Words that may precede a type without changing which type it names
const IGNORED_SPECIFIERS: &[&str] = &[
    "__kindof",
    "__weak",
    "__strong",
    "__unsafe_unretained",
    "__autoreleasing",
    "__block",
    "NS_NOESCAPE",
    "volatile",
    "oneway",
    "in",
    "out",
    "inout",
    "bycopy",
    "byref",
];

/// Primitive words that combine with a preceding modifier: `unsigned long long`
const PRIMITIVE_WORDS: &[&str] = &["long", "short", "int", "char", "double"];

const PRIMITIVE_MODIFIERS: &[&str] = &["unsigned", "signed", "long", "short"];

impl<'a> Parser<'a> {
    /// Parse exactly one type reference at the current position.
    ///
    /// On failure the position is left where it was, so callers can try
    /// another alternative.
    pub(crate) fn parse_type_ref(&mut self, role: AngleRole) -> Result<TypeRef, ParseError> {
        let start = self.pos;
        let result = self.parse_type_inner(role);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn parse_type_inner(&mut self, role: AngleRole) -> Result<TypeRef, ParseError> {
        let start = self.span();
        let mut qualifiers = Vec::new();
        self.parse_type_prefix(&mut qualifiers);

        let base = self.parse_base_name()?;
        let mut ty = TypeRef::named(base);
        ty.qualifiers = qualifiers;

        if self.at(TokenKind::Lt) {
            self.parse_angle_list(&mut ty, role)?;
        }
        self.parse_pointer_suffix(&mut ty);
        ty.span = start.merge(self.prev_span());

        if self.at_block_declarator() {
            return self.parse_block(ty);
        }
        Ok(ty)
    }

    fn parse_type_prefix(&mut self, qualifiers: &mut Vec<Qualifier>) {
        loop {
            match self.peek() {
                TokenKind::Const => {
                    self.advance();
                    qualifiers.push(Qualifier {
                        kind: QualifierKind::Const,
                        level: 0,
                    });
                }
                // Elaborated names: `struct CGPoint`
                TokenKind::Struct | TokenKind::Enum => {
                    self.advance();
                }
                TokenKind::Ident => {
                    let word = self.peek_text();
                    if let Some(kind) = QualifierKind::from_keyword(word) {
                        self.advance();
                        qualifiers.push(Qualifier { kind, level: 0 });
                    } else if IGNORED_SPECIFIERS.contains(&word) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn parse_base_name(&mut self) -> Result<Ident, ParseError> {
        if !self.at(TokenKind::Ident) {
            return Err(ParseError::NoTypeReference {
                found: self.peek().describe().to_string(),
                span: self.span(),
            });
        }
        let first = self.advance();
        let mut words = vec![self.text(&first)];
        let mut span = first.span;
        if PRIMITIVE_MODIFIERS.contains(&words[0]) {
            while self.at(TokenKind::Ident) && PRIMITIVE_WORDS.contains(&self.peek_text()) {
                let next = self.advance();
                words.push(self.text(&next));
                span = span.merge(next.span);
            }
        }
        Ok(Ident::new(words.join(" "), span))
    }

    /// `<...>` after a base name; `role` decides generics or conformances
    pub(crate) fn parse_angle_list(&mut self, ty: &mut TypeRef, role: AngleRole) -> Result<(), ParseError> {
        self.consume(TokenKind::Lt)?;
        let mut entries = Vec::new();
        while !self.at(TokenKind::Gt) {
            entries.push(self.parse_type_ref(AngleRole::Infer)?);
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.consume(TokenKind::Gt)?;

        let as_conformances = match role {
            AngleRole::Conformance => true,
            AngleRole::Generic => false,
            AngleRole::Infer => entries.iter().all(TypeRef::is_bare),
        };
        if as_conformances {
            for entry in entries {
                if let Some(name) = entry.base() {
                    if !ty.conformances.iter().any(|c| c.name == name.name) {
                        ty.conformances.push(name.clone());
                    }
                }
            }
        } else {
            ty.generics = entries;
        }
        Ok(())
    }

    /// Infix qualifiers, then `*` levels each with their own qualifiers
    fn parse_pointer_suffix(&mut self, ty: &mut TypeRef) {
        loop {
            match self.peek() {
                TokenKind::Star => {
                    self.advance();
                    ty.indirection = ty.indirection.saturating_add(1);
                }
                TokenKind::Const => {
                    self.advance();
                    ty.qualifiers.push(Qualifier {
                        kind: QualifierKind::Const,
                        level: ty.indirection,
                    });
                }
                // Only the underscored spellings follow a type; a bare
                // `nullable` here would be a declarator name.
                TokenKind::Ident if self.peek_text().starts_with('_') => {
                    match QualifierKind::from_keyword(self.peek_text()) {
                        Some(kind) => {
                            self.advance();
                            ty.qualifiers.push(Qualifier {
                                kind,
                                level: ty.indirection,
                            });
                        }
                        None => break,
                    }
                }
                _ => break,
            }
        }
    }

    /// `(^` or `(NS_NOESCAPE ^` after a return type
    fn at_block_declarator(&self) -> bool {
        if !self.at(TokenKind::LParen) {
            return false;
        }
        match self.peek_ahead(1) {
            TokenKind::Caret => true,
            TokenKind::Ident => {
                self.tokens
                    .get(self.pos + 1)
                    .map(|t| self.text(t) == "NS_NOESCAPE")
                    .unwrap_or(false)
                    && self.peek_ahead(2) == TokenKind::Caret
            }
            _ => false,
        }
    }

    fn parse_block(&mut self, returns: TypeRef) -> Result<TypeRef, ParseError> {
        let start = returns.span;
        self.consume(TokenKind::LParen)?;
        if self.at_word("NS_NOESCAPE") {
            self.advance();
        }
        self.consume(TokenKind::Caret)?;

        let mut qualifiers = Vec::new();
        loop {
            let kind = match self.peek() {
                TokenKind::Const => Some(QualifierKind::Const),
                TokenKind::Ident => QualifierKind::from_keyword(self.peek_text()),
                _ => None,
            };
            let Some(kind) = kind else { break };
            self.advance();
            qualifiers.push(Qualifier { kind, level: 0 });
        }

        let name = if self.at(TokenKind::Ident) {
            Some(self.expect_ident("block")?)
        } else {
            None
        };
        self.consume(TokenKind::RParen)?;

        let params = self.parse_block_params()?;

        Ok(TypeRef {
            kind: TypeKind::Block(Box::new(BlockType {
                name,
                returns,
                params,
            })),
            generics: Vec::new(),
            conformances: Vec::new(),
            indirection: 0,
            qualifiers,
            span: start.merge(self.prev_span()),
        })
    }

    /// `(void)`, `()`, or `(Type name, Type, ...)`
    fn parse_block_params(&mut self) -> Result<Vec<BlockParam>, ParseError> {
        self.consume(TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.at_word("void") && self.peek_ahead(1) == TokenKind::RParen {
            self.advance();
        }
        while !self.at(TokenKind::RParen) {
            let ty = self.parse_type_ref(AngleRole::Infer)?;
            let name = if self.at(TokenKind::Ident) {
                Some(self.expect_ident("parameter")?)
            } else {
                None
            };
            params.push(BlockParam { name, ty });
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.consume(TokenKind::RParen)?;
        Ok(params)
    }
}
