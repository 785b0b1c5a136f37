//! LeanHeaders Parser - Recursive descent parser for Objective-C headers
//!
//! Parses header text into declarations, pragma directives and import
//! lines. Key parsing challenges:
//! - `<...>` after a type is either a generic argument list or a protocol
//!   conformance list; the declaration context decides
//! - qualifiers bind to the indirection level they follow
//! - `@end` is optional; an `@interface` header is complete on its own
//! - anything that is not a recognized declaration is skipped, never fatal

mod directive;
mod error;
mod lint;
mod options;
mod parser;
mod types;

pub use directive::{parse_import_line, parse_pragma};
pub use error::*;
pub use lint::{lint_declaration, lint_import};
pub use options::*;
pub use parser::*;

use leanheaders_ast::{AngleRole, ParsedHeader, TypeRef};
use leanheaders_lexer::tokenize;

/// Parse a header with default options
pub fn parse(source: &str) -> ParsedHeader {
    parse_with(source, &ParseOptions::default())
}

/// Parse a header
pub fn parse_with(source: &str, options: &ParseOptions) -> ParsedHeader {
    let tokens = tokenize(source);
    let parser = Parser::new(source, tokens, options.clone());
    parser.parse_header()
}

/// Parse a single type reference, such as `NSArray<NSString *> *`
pub fn parse_type(source: &str) -> Result<TypeRef, ParseError> {
    let tokens = tokenize(source);
    let mut parser = Parser::new(source, tokens, ParseOptions::default());
    parser.parse_type_ref(AngleRole::Infer)
}
