//! Recursive descent parser implementation

use leanheaders_ast::*;
use leanheaders_lexer::{balanced_end, Nesting, Token, TokenKind};
use tracing::{debug, trace, warn};

use crate::{directive, lint, ParseError, ParseOptions};

pub struct Parser<'a> {
    pub(crate) source: &'a str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    options: ParseOptions,
    /// Name of the open `@interface`/`@protocol`
    container: Option<String>,
    /// `NS_ROOT_CLASS` seen, waiting for its `@interface`
    root_marked: bool,
    header: ParsedHeader,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, mut tokens: Vec<Token>, options: ParseOptions) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = source.len();
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
                depth: Nesting::default(),
            });
        }
        Self {
            source,
            tokens,
            pos: 0,
            options,
            container: None,
            root_marked: false,
            header: ParsedHeader::default(),
        }
    }

    // === Utilities ===

    pub(crate) fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    pub(crate) fn peek(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn peek_text(&self) -> &'a str {
        self.text(self.current())
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = *self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek())
    }

    /// At an identifier spelled `word`
    pub(crate) fn at_word(&self, word: &str) -> bool {
        self.at(TokenKind::Ident) && self.peek_text() == word
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                kind.describe(),
                self.peek(),
                self.current().span,
            ))
        }
    }

    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<Ident, ParseError> {
        if self.at(TokenKind::Ident) {
            let token = self.advance();
            Ok(self.ident(&token))
        } else {
            Err(ParseError::unexpected(
                format!("{} name", what),
                self.peek(),
                self.current().span,
            ))
        }
    }

    pub(crate) fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    pub(crate) fn ident(&self, token: &Token) -> Ident {
        Ident::new(self.text(token), token.span)
    }

    pub(crate) fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token
    pub(crate) fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    /// Jump past the delimiter group opening at the current token
    pub(crate) fn skip_balanced(&mut self) {
        match balanced_end(&self.tokens, self.pos) {
            Some(end) => self.pos = end + 1,
            None => self.pos = self.tokens.len() - 1,
        }
    }

    // === Header ===

    pub fn parse_header(mut self) -> ParsedHeader {
        while !self.at(TokenKind::Eof) {
            let start = self.pos;
            self.parse_statement();
            if self.pos == start {
                self.advance();
            }
        }
        self.header
    }

    fn parse_statement(&mut self) {
        match self.peek() {
            TokenKind::Pragma => self.parse_pragma_line(),
            TokenKind::Include => self.parse_import_line(),
            TokenKind::AtEnd => {
                self.advance();
                self.container = None;
            }
            TokenKind::AtOptional | TokenKind::AtRequired | TokenKind::RBrace | TokenKind::Semicolon => {
                self.advance();
            }
            TokenKind::AtInterface
            | TokenKind::AtProtocol
            | TokenKind::AtClass
            | TokenKind::AtProperty
            | TokenKind::Typedef
            | TokenKind::NsEnum
            | TokenKind::NsOptions
            | TokenKind::NsErrorEnum
            | TokenKind::Plus
            | TokenKind::Minus => self.parse_declaration_statement(),
            TokenKind::Struct | TokenKind::Enum if self.at_definition() => {
                self.parse_declaration_statement()
            }
            TokenKind::LBrace => self.skip_balanced(),
            TokenKind::Unknown => self.report_unknown(),
            TokenKind::Attribute => self.parse_leading_attribute(),
            TokenKind::Ident if self.at_word("NS_ROOT_CLASS") => {
                self.root_marked = true;
                self.advance();
            }
            TokenKind::Ident
                if self.at_word("extern")
                    && self.peek_ahead(1) == TokenKind::String
                    && self.peek_ahead(2) == TokenKind::LBrace =>
            {
                // extern "C" { ... } wraps declarations; keep parsing inside
                self.pos += 3;
            }
            _ => self.skip_statement(),
        }
    }

    /// Skip an opaque statement: up to `;`, through a `{...}` body, or up
    /// to the next token that begins a declaration.
    fn skip_statement(&mut self) {
        let start = self.pos;
        trace!(token = self.peek().describe(), offset = self.span().start, "skipping statement");
        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::LBrace => {
                    self.skip_balanced();
                    if self.at(TokenKind::Semicolon) {
                        self.advance();
                    }
                    break;
                }
                kind if kind.starts_declaration() && self.pos > start => break,
                TokenKind::NsEnum | TokenKind::NsOptions | TokenKind::NsErrorEnum if self.pos > start => break,
                // A bare `struct Tag {` or `enum Tag {` may follow a macro line with no `;`
                TokenKind::Struct | TokenKind::Enum if self.pos > start && self.at_definition() => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip to the `;` ending the current declaration, keeping any
    /// following declaration intact.
    fn skip_to_terminator(&mut self) {
        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                kind if kind.starts_declaration() => break,
                kind if kind.is_open_delimiter() => self.skip_balanced(),
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip `__attribute__((...))` and availability/annotation macros
    /// such as `NS_AVAILABLE(10_10)` or `NS_DESIGNATED_INITIALIZER`.
    pub(crate) fn skip_trailing_attributes(&mut self) {
        loop {
            let is_annotation = match self.peek() {
                TokenKind::Attribute => true,
                TokenKind::Ident => is_macro_word(self.peek_text()),
                _ => false,
            };
            if !is_annotation {
                break;
            }
            self.advance();
            if self.at(TokenKind::LParen) {
                self.skip_balanced();
            }
        }
    }

    fn report_unknown(&mut self) {
        let token = self.advance();
        let text = self.text(&token);
        trace!(text, "unrecognized characters");
        self.header.diagnostics.push(Diagnostic::new(
            DiagnosticKind::LexicalAnomaly,
            Severity::Note,
            format!("unrecognized characters '{}'", text),
            token.span,
        ));
    }

    fn parse_leading_attribute(&mut self) {
        let start = self.advance().span;
        if self.at(TokenKind::LParen) {
            self.skip_balanced();
        }
        let text = &self.source[start.start..self.prev_span().end];
        if text.contains("objc_root_class") {
            self.root_marked = true;
        }
    }

    fn report(&mut self, error: &ParseError) {
        let severity = self.options.lints.parsing;
        if severity.is_reported() {
            self.header.diagnostics.push(error.to_diagnostic(severity));
        }
    }

    // === Directives ===

    fn parse_pragma_line(&mut self) {
        let token = self.advance();
        let line = self.text(&token);
        match directive::parse_pragma(line, token.span, self.options.unique_pragma) {
            Ok(directives) => {
                for directive in directives {
                    debug!(
                        strength = ?directive.strength,
                        requirement = directive.requirement.keyword(),
                        kind = directive.kind.keyword(),
                        name = %directive.name,
                        "parsed directive"
                    );
                    self.header.directives.push(directive);
                }
            }
            Err(error) => {
                warn!(%error, line, "ignoring malformed pragma");
                self.report(&error);
            }
        }
    }

    fn parse_import_line(&mut self) {
        let token = self.advance();
        let Some(import) = directive::parse_import_line(self.text(&token), token.span) else {
            trace!(line = self.text(&token), "import line without a literal path");
            return;
        };
        if let Some(diagnostic) = lint::lint_import(&import, &self.options.lints) {
            self.header.diagnostics.push(diagnostic);
        }
        self.header.imports.push(import);
    }

    // === Declarations ===

    fn parse_declaration_statement(&mut self) {
        let start = self.pos;
        match self.parse_declaration() {
            Ok(declaration) => {
                debug!(
                    family = declaration.family(),
                    name = declaration.name().unwrap_or_default(),
                    "parsed declaration"
                );
                self.header
                    .diagnostics
                    .extend(lint::lint_declaration(&declaration, &self.options.lints));
                self.header.declarations.push(declaration);
            }
            Err(error) => {
                debug!(%error, "declaration did not match its grammar");
                self.report(&error);
                self.pos = start;
                self.advance();
                self.skip_statement();
            }
        }
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let start = self.span();

        let kind = match self.peek() {
            TokenKind::AtInterface => DeclarationKind::Class(self.parse_interface()?),
            TokenKind::AtProtocol if self.at_forward_protocol() => {
                DeclarationKind::Forward(self.parse_forward()?)
            }
            TokenKind::AtProtocol => DeclarationKind::Protocol(self.parse_protocol()?),
            TokenKind::AtClass => DeclarationKind::Forward(self.parse_forward()?),
            TokenKind::AtProperty => DeclarationKind::Property(self.parse_property()?),
            TokenKind::Plus | TokenKind::Minus => DeclarationKind::Method(self.parse_method()?),
            TokenKind::Typedef => self.parse_typedef()?,
            TokenKind::Struct => DeclarationKind::Struct(self.parse_struct(false)?),
            TokenKind::Enum => DeclarationKind::Enum(self.parse_enum(false)?),
            TokenKind::NsEnum | TokenKind::NsOptions | TokenKind::NsErrorEnum => {
                DeclarationKind::Enum(self.parse_enum_macro(false)?)
            }
            found => return Err(ParseError::unexpected("declaration", found, start)),
        };

        Ok(Declaration {
            kind,
            span: start.merge(self.prev_span()),
        })
    }

    /// `struct [Tag] {` or `enum [Tag] [: Raw] {` at the current token
    fn at_definition(&self) -> bool {
        let mut n = 1;
        if self.peek_ahead(n) == TokenKind::Ident {
            n += 1;
        }
        if self.at(TokenKind::Enum) && self.peek_ahead(n) == TokenKind::Colon {
            n += 1;
            while self.peek_ahead(n) == TokenKind::Ident {
                n += 1;
            }
        }
        self.peek_ahead(n) == TokenKind::LBrace
    }

    /// `@protocol Name;` or `@protocol A, B;`
    fn at_forward_protocol(&self) -> bool {
        self.peek_ahead(1) == TokenKind::Ident
            && matches!(self.peek_ahead(2), TokenKind::Comma | TokenKind::Semicolon)
    }

    /// Whether the `<...>` at the current token is followed by one of `kinds`
    fn angle_list_precedes(&self, kinds: &[TokenKind]) -> bool {
        balanced_end(&self.tokens, self.pos)
            .and_then(|end| self.tokens.get(end + 1))
            .map(|token| kinds.contains(&token.kind))
            .unwrap_or(false)
    }

    /// Whether the `<...>` after a superclass name holds generic arguments
    /// rather than the adopted protocol list.
    ///
    /// `Base<T> <P>` and `NSArray<NSString *>` are generic; `NSObject <P>`
    /// is a protocol list unless `P` is one of the class's own parameters.
    fn at_superclass_generics(&self, type_params: &[Ident]) -> bool {
        let Some(end) = balanced_end(&self.tokens, self.pos) else {
            return false;
        };
        if self.tokens.get(end + 1).map(|t| t.kind) == Some(TokenKind::Lt) {
            return true;
        }
        let inner = &self.tokens[self.pos + 1..end];
        let names_only = inner.iter().enumerate().all(|(i, token)| {
            let expected = if i % 2 == 0 { TokenKind::Ident } else { TokenKind::Comma };
            token.kind == expected
        });
        if !names_only {
            return true;
        }
        inner
            .iter()
            .filter(|token| token.kind == TokenKind::Ident)
            .any(|token| type_params.iter().any(|param| param.name == self.text(token)))
    }

    fn parse_interface(&mut self) -> Result<ClassDecl, ParseError> {
        self.consume(TokenKind::AtInterface)?;
        let name = self.expect_ident("class")?;
        let root_marked = std::mem::take(&mut self.root_marked);

        let type_params = if self.at(TokenKind::Lt)
            && self.angle_list_precedes(&[TokenKind::Colon, TokenKind::LParen])
        {
            self.parse_type_params()?
        } else {
            Vec::new()
        };

        let mut category = None;
        let mut is_extension = false;
        if self.at(TokenKind::LParen) {
            self.advance();
            if self.at(TokenKind::RParen) {
                is_extension = true;
            } else {
                category = Some(self.expect_ident("category")?);
            }
            self.consume(TokenKind::RParen)?;
        }

        let mut superclass = None;
        if self.at(TokenKind::Colon) {
            self.advance();
            let mut ty = TypeRef::named(self.expect_ident("superclass")?);
            if self.at(TokenKind::Lt) && self.at_superclass_generics(&type_params) {
                self.parse_angle_list(&mut ty, AngleRole::Generic)?;
                ty.span = ty.span.merge(self.prev_span());
            }
            superclass = Some(ty);
        }

        let protocols = if self.at(TokenKind::Lt) {
            self.parse_protocol_list()?
        } else {
            Vec::new()
        };

        // Instance variables
        if self.at(TokenKind::LBrace) {
            self.skip_balanced();
        }

        self.container = Some(name.name.clone());
        Ok(ClassDecl {
            name,
            type_params,
            superclass,
            protocols,
            category,
            is_extension,
            root_marked,
        })
    }

    /// `<ObjectType, __covariant KeyType : id<NSCopying>>`
    fn parse_type_params(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.consume(TokenKind::Lt)?;
        let mut params = Vec::new();
        loop {
            if self.at_word("__covariant") || self.at_word("__contravariant") {
                self.advance();
            }
            params.push(self.expect_ident("type parameter")?);
            if self.at(TokenKind::Colon) {
                self.advance();
                self.parse_type_ref(AngleRole::Infer)?;
            }
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.consume(TokenKind::Gt)?;
        Ok(params)
    }

    /// `<A, B>` after a class, category or protocol name
    fn parse_protocol_list(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.consume(TokenKind::Lt)?;
        let mut protocols: Vec<Ident> = Vec::new();
        while !self.at(TokenKind::Gt) {
            let protocol = self.expect_ident("protocol")?;
            if !protocols.iter().any(|p| p.name == protocol.name) {
                protocols.push(protocol);
            }
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.consume(TokenKind::Gt)?;
        Ok(protocols)
    }

    fn parse_protocol(&mut self) -> Result<ProtocolDecl, ParseError> {
        self.consume(TokenKind::AtProtocol)?;
        let name = self.expect_ident("protocol")?;
        let protocols = if self.at(TokenKind::Lt) {
            self.parse_protocol_list()?
        } else {
            Vec::new()
        };
        self.container = Some(name.name.clone());
        Ok(ProtocolDecl { name, protocols })
    }

    fn parse_forward(&mut self) -> Result<ForwardDecl, ParseError> {
        let kind = match self.advance().kind {
            TokenKind::AtClass => ForwardKind::Class,
            _ => ForwardKind::Protocol,
        };
        let mut names = Vec::new();
        loop {
            names.push(self.expect_ident("forward declared")?);
            // @class Box<ObjectType>;
            if self.at(TokenKind::Lt) {
                self.skip_balanced();
            }
            if !self.at(TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.consume(TokenKind::Semicolon)?;
        Ok(ForwardDecl { kind, names })
    }

    fn parse_property(&mut self) -> Result<PropertyDecl, ParseError> {
        let start = self.consume(TokenKind::AtProperty)?.span;

        let mut attributes = Vec::new();
        if self.at(TokenKind::LParen) {
            self.advance();
            while !self.at(TokenKind::RParen) {
                attributes.push(self.parse_property_attribute()?);
                if !self.at(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            self.consume(TokenKind::RParen)?;
        }

        while self.at_word("IBOutlet")
            || self.at_word("IBInspectable")
            || self.at_word("IBOutletCollection")
        {
            let marker = self.advance();
            attributes.push(PropertyAttribute::InterfaceBuilder(self.text(&marker).to_string()));
            if self.at(TokenKind::LParen) {
                self.skip_balanced();
            }
        }

        let ty = self.parse_type_ref(AngleRole::Infer)?;
        let name = match ty.block() {
            Some(block) => block.name.clone().ok_or(ParseError::MissingName {
                what: "block property",
                span: start.merge(ty.span),
            })?,
            None => self.expect_ident("property")?,
        };

        self.skip_trailing_attributes();
        self.consume(TokenKind::Semicolon)?;

        Ok(PropertyDecl {
            owner: self.container.clone(),
            attributes,
            ty,
            name,
        })
    }

    /// `nonatomic`, `getter=isEnabled`, `setter=setEnabled:`
    fn parse_property_attribute(&mut self) -> Result<PropertyAttribute, ParseError> {
        let word = self.expect_ident("property attribute")?;
        if !self.at(TokenKind::Eq) {
            return Ok(PropertyAttribute::from_word(&word.name));
        }
        self.advance();
        let mut accessor = self.expect_ident("accessor")?.name;
        if self.at(TokenKind::Colon) {
            self.advance();
            accessor.push(':');
        }
        Ok(match word.name.as_str() {
            "getter" => PropertyAttribute::Getter(accessor),
            "setter" => PropertyAttribute::Setter(accessor),
            other => PropertyAttribute::Other(format!("{}={}", other, accessor)),
        })
    }

    fn parse_method(&mut self) -> Result<MethodDecl, ParseError> {
        let is_class_method = self.advance().kind == TokenKind::Plus;
        let returns = self.parse_method_type()?;

        let mut selector = Vec::new();
        let mut variadic = false;
        if self.at(TokenKind::Ident) && self.peek_ahead(1) != TokenKind::Colon {
            let label = self.expect_ident("selector")?;
            selector.push(SelectorPart {
                label: Some(label),
                param: None,
            });
        } else {
            loop {
                let label = if self.at(TokenKind::Ident) {
                    Some(self.expect_ident("selector")?)
                } else {
                    None
                };
                self.consume(TokenKind::Colon)?;
                let ty = self.parse_method_type()?;
                let name = self.expect_ident("parameter")?;
                selector.push(SelectorPart {
                    label,
                    param: Some(MethodParam { ty, name }),
                });
                let continues = self.at(TokenKind::Colon)
                    || (self.at(TokenKind::Ident) && self.peek_ahead(1) == TokenKind::Colon);
                if !continues {
                    break;
                }
            }
            if self.at(TokenKind::Comma) && self.peek_ahead(1) == TokenKind::Ellipsis {
                self.advance();
                self.advance();
                variadic = true;
            }
        }

        self.skip_trailing_attributes();
        if self.at(TokenKind::LBrace) {
            self.skip_balanced();
        } else {
            self.consume(TokenKind::Semicolon)?;
        }

        Ok(MethodDecl {
            owner: self.container.clone(),
            is_class_method,
            returns,
            selector,
            variadic,
        })
    }

    /// Optional `(Type)` of a method return or parameter
    fn parse_method_type(&mut self) -> Result<Option<TypeRef>, ParseError> {
        if !self.at(TokenKind::LParen) {
            return Ok(None);
        }
        self.advance();
        let ty = self.parse_type_ref(AngleRole::Infer)?;
        self.consume(TokenKind::RParen)?;
        Ok(Some(ty))
    }

    fn parse_typedef(&mut self) -> Result<DeclarationKind, ParseError> {
        self.consume(TokenKind::Typedef)?;
        match self.peek() {
            TokenKind::Struct if self.at_definition() => {
                Ok(DeclarationKind::Struct(self.parse_struct(true)?))
            }
            TokenKind::Enum if self.at_definition() => Ok(DeclarationKind::Enum(self.parse_enum(true)?)),
            TokenKind::NsEnum | TokenKind::NsOptions | TokenKind::NsErrorEnum => {
                Ok(DeclarationKind::Enum(self.parse_enum_macro(true)?))
            }
            _ => self.parse_alias(),
        }
    }

    /// `typedef Existing NewName;` or `typedef Ret (^Name)(Params);`
    fn parse_alias(&mut self) -> Result<DeclarationKind, ParseError> {
        let ty = self.parse_type_ref(AngleRole::Infer)?;
        let kind = match ty.block() {
            Some(block) => {
                let name = block.name.clone().ok_or(ParseError::MissingName {
                    what: "block alias",
                    span: ty.span,
                })?;
                DeclarationKind::BlockAlias(BlockAliasDecl {
                    name,
                    signature: ty,
                })
            }
            None => {
                let name = self.expect_ident("alias")?;
                DeclarationKind::Alias(AliasDecl { name, target: ty })
            }
        };
        self.skip_trailing_attributes();
        self.consume(TokenKind::Semicolon)?;
        Ok(kind)
    }

    fn parse_struct(&mut self, is_typedef: bool) -> Result<StructDecl, ParseError> {
        self.consume(TokenKind::Struct)?;
        let tag = if self.at(TokenKind::Ident) {
            Some(self.expect_ident("struct")?)
        } else {
            None
        };
        if !self.at(TokenKind::LBrace) {
            return Err(ParseError::unexpected("'{'", self.peek(), self.span()));
        }
        // Fields are opaque
        self.skip_balanced();
        let alias = self.parse_typedef_alias(is_typedef)?;
        self.skip_to_terminator();
        Ok(StructDecl {
            tag,
            alias,
            is_typedef,
        })
    }

    fn parse_enum(&mut self, is_typedef: bool) -> Result<EnumDecl, ParseError> {
        self.consume(TokenKind::Enum)?;
        let tag = if self.at(TokenKind::Ident) {
            Some(self.expect_ident("enum")?)
        } else {
            None
        };
        let raw_type = if self.at(TokenKind::Colon) {
            self.advance();
            Some(self.parse_type_ref(AngleRole::Generic)?)
        } else {
            None
        };
        if !self.at(TokenKind::LBrace) {
            return Err(ParseError::unexpected("'{'", self.peek(), self.span()));
        }
        // Cases are opaque
        self.skip_balanced();
        let alias = self.parse_typedef_alias(is_typedef)?;
        self.skip_to_terminator();
        Ok(EnumDecl {
            style: EnumStyle::Plain,
            tag,
            macro_name: None,
            alias,
            raw_type,
            domain: None,
            is_typedef,
        })
    }

    /// `NS_ENUM(Raw, Name) {...}`, `NS_OPTIONS(Raw, Name) {...}`,
    /// `NS_ERROR_ENUM(Domain, Name) {...}`
    fn parse_enum_macro(&mut self, is_typedef: bool) -> Result<EnumDecl, ParseError> {
        let style = match self.advance().kind {
            TokenKind::NsEnum => EnumStyle::NsEnum,
            TokenKind::NsOptions => EnumStyle::NsOptions,
            _ => EnumStyle::NsErrorEnum,
        };
        self.consume(TokenKind::LParen)?;
        let (raw_type, domain) = if style == EnumStyle::NsErrorEnum {
            (None, Some(self.expect_ident("error domain")?))
        } else {
            (Some(self.parse_type_ref(AngleRole::Generic)?), None)
        };
        let macro_name = if self.at(TokenKind::Comma) {
            self.advance();
            Some(self.expect_ident("enum")?)
        } else {
            None
        };
        self.consume(TokenKind::RParen)?;
        if self.at(TokenKind::LBrace) {
            self.skip_balanced();
        }
        let alias = self.parse_typedef_alias(is_typedef)?;
        self.skip_to_terminator();
        Ok(EnumDecl {
            style,
            tag: None,
            macro_name,
            alias,
            raw_type,
            domain,
            is_typedef,
        })
    }

    /// Name after the closing brace of a typedef'd struct or enum
    fn parse_typedef_alias(&mut self, is_typedef: bool) -> Result<Option<Ident>, ParseError> {
        self.skip_trailing_attributes();
        if is_typedef && self.at(TokenKind::Ident) {
            Ok(Some(self.expect_ident("typedef")?))
        } else {
            Ok(None)
        }
    }
}

/// Annotation macros: `NS_SWIFT_NAME`, `API_AVAILABLE`, `__deprecated`
pub(crate) fn is_macro_word(word: &str) -> bool {
    if word.starts_with("__") {
        return true;
    }
    word.contains('_')
        && word
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
