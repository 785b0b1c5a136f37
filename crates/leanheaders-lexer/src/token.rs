//! Token definitions for Objective-C headers

use logos::{Lexer, Logos, Skip};

/// Skip to the first `*/`, or to the end of input when unterminated
fn block_comment(lex: &mut Lexer<TokenKind>) -> Skip {
    let remainder = lex.remainder();
    let end = remainder.find("*/").map_or(remainder.len(), |i| i + 2);
    lex.bump(end);
    Skip
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]                 // Skip whitespace
#[logos(skip r"//[^\n]*")]                     // Skip line comments
pub enum TokenKind {
    // === Compiler directives ===
    #[token("@interface")]
    AtInterface,
    #[token("@protocol")]
    AtProtocol,
    #[token("@class")]
    AtClass,
    #[token("@end")]
    AtEnd,
    #[token("@property")]
    AtProperty,
    #[token("@optional")]
    AtOptional,
    #[token("@required")]
    AtRequired,
    /// Any other `@word`
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    AtKeyword,

    // === C keywords ===
    #[token("typedef")]
    Typedef,
    #[token("struct")]
    Struct,
    #[token("enum")]
    Enum,
    #[token("const")]
    Const,
    #[token("__attribute__")]
    Attribute,

    // === Enum macros ===
    #[token("NS_ENUM")]
    NsEnum,
    #[token("NS_OPTIONS")]
    NsOptions,
    #[token("NS_ERROR_ENUM")]
    NsErrorEnum,

    // === Literals ===
    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    Number,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
    #[regex(r#"@"([^"\\\n]|\\.)*""#)]
    ObjcString,
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,

    // === Identifiers ===
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    // === Preprocessor ===
    /// Raw `#...` line, classified by `tokenize`
    #[regex(r"#([^\n\\]|\\[^\n]|\\\r?\n)*")]
    Preprocessor,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    // === Punctuation ===
    #[token("<<")]
    Shl,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("*")]
    Star,
    #[token("^")]
    Caret,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("?")]
    Question,
    #[token("/")]
    Slash,
    /// `/* ... */`, never produced
    #[token("/*", block_comment)]
    BlockComment,
    #[token("%")]
    Percent,

    // === Special ===
    /// `#pragma LeanHeaders ...` line
    Pragma,
    /// `#import` / `#include` line
    Include,
    /// Character sequence no other token matches
    Unknown,
    Eof,
}

impl TokenKind {
    /// Tokens that can begin a declaration at statement level
    pub fn starts_declaration(&self) -> bool {
        matches!(
            self,
            TokenKind::AtInterface
                | TokenKind::AtProtocol
                | TokenKind::AtClass
                | TokenKind::AtEnd
                | TokenKind::AtProperty
                | TokenKind::AtOptional
                | TokenKind::AtRequired
                | TokenKind::Typedef
                | TokenKind::Pragma
                | TokenKind::Include
        )
    }

    pub fn is_open_delimiter(&self) -> bool {
        self.closing().is_some()
    }

    /// Matching close delimiter of an opening delimiter
    pub fn closing(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            TokenKind::Lt => Some(TokenKind::Gt),
            _ => None,
        }
    }

    /// Get a human-readable description of this token kind
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::AtInterface => "'@interface'",
            TokenKind::AtProtocol => "'@protocol'",
            TokenKind::AtClass => "'@class'",
            TokenKind::AtEnd => "'@end'",
            TokenKind::AtProperty => "'@property'",
            TokenKind::AtOptional => "'@optional'",
            TokenKind::AtRequired => "'@required'",
            TokenKind::AtKeyword => "'@' keyword",
            TokenKind::Typedef => "'typedef'",
            TokenKind::Struct => "'struct'",
            TokenKind::Enum => "'enum'",
            TokenKind::Const => "'const'",
            TokenKind::Attribute => "'__attribute__'",
            TokenKind::NsEnum => "'NS_ENUM'",
            TokenKind::NsOptions => "'NS_OPTIONS'",
            TokenKind::NsErrorEnum => "'NS_ERROR_ENUM'",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::ObjcString => "string object",
            TokenKind::Char => "character",
            TokenKind::Ident => "identifier",
            TokenKind::Preprocessor => "preprocessor line",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Shl => "'<<'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Star => "'*'",
            TokenKind::Caret => "'^'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Eq => "'='",
            TokenKind::Dot => "'.'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Tilde => "'~'",
            TokenKind::Bang => "'!'",
            TokenKind::Question => "'?'",
            TokenKind::Slash => "'/'",
            TokenKind::BlockComment => "comment",
            TokenKind::Percent => "'%'",
            TokenKind::Pragma => "pragma directive",
            TokenKind::Include => "import line",
            TokenKind::Unknown => "unknown character",
            TokenKind::Eof => "end of file",
        }
    }
}
