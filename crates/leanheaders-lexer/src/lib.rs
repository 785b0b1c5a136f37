//! LeanHeaders Lexer - Tokenization using logos
//!
//! Turns header text into a flat token stream:
//! - comments are dropped
//! - preprocessor lines are dropped, except `#import`/`#include` lines and
//!   `#pragma` lines in the LeanHeaders namespace
//! - unmatched characters become `Unknown` tokens; tokenizing never fails
//!
//! Every token records the `<>`, `()` and `{}` nesting depth in front of it.
//! Angle brackets are only counted outside `{}` bodies.

mod token;

pub use token::*;

use leanheaders_ast::Span;
use logos::Logos;

/// Pragma namespace accepted in short-pragma mode
pub const SHORT_NAMESPACE: &str = "LeanHeaders";

/// Pragma namespace that is always accepted
pub const UNIQUE_NAMESPACE: &str = "ca.brach.LeanHeaders";

/// Tokenize a source string into a vector of tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut depth = Nesting::default();

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        let kind = match result {
            Ok(TokenKind::Preprocessor) => match classify_preprocessor(lexer.slice()) {
                Some(kind) => kind,
                None => continue,
            },
            Ok(kind) => kind,
            Err(_) => TokenKind::Unknown,
        };
        tokens.push(Token { kind, span, depth });
        depth.step(kind);
    }

    // Add EOF token
    let end = source.len();
    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(end, end),
        depth,
    });

    tokens
}

/// Decide what a raw preprocessor line becomes, `None` to drop it
fn classify_preprocessor(line: &str) -> Option<TokenKind> {
    let body = line.trim_start_matches('#').trim_start();
    let mut words = body.split_whitespace();
    match words.next()? {
        "import" | "include" => Some(TokenKind::Include),
        "pragma" => {
            let namespace = words.next()?;
            (namespace == SHORT_NAMESPACE || namespace == UNIQUE_NAMESPACE).then_some(TokenKind::Pragma)
        }
        _ => None,
    }
}

/// Nesting depth of the three delimiter kinds the grammar cares about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nesting {
    pub angle: u32,
    pub paren: u32,
    pub brace: u32,
}

impl Nesting {
    fn step(&mut self, kind: TokenKind) {
        match kind {
            // Inside a body `<` and `>` are comparisons
            TokenKind::Lt if self.brace == 0 => self.angle += 1,
            TokenKind::Gt if self.brace == 0 => self.angle = self.angle.saturating_sub(1),
            TokenKind::LParen => self.paren += 1,
            TokenKind::RParen => self.paren = self.paren.saturating_sub(1),
            TokenKind::LBrace => self.brace += 1,
            TokenKind::RBrace => self.brace = self.brace.saturating_sub(1),
            _ => {}
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.angle == 0 && self.paren == 0 && self.brace == 0
    }
}

/// A token with its span
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Nesting depth before this token
    pub depth: Nesting,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}

/// Index of the delimiter closing the one at `open`.
///
/// Only delimiters of the same kind are counted, so `<` inside
/// parentheses or `(` inside angle brackets never disturb the match.
/// Returns `None` when `open` is not an opening delimiter or the stream
/// ends first.
pub fn balanced_end(tokens: &[Token], open: usize) -> Option<usize> {
    let open_kind = tokens.get(open)?.kind;
    let close_kind = open_kind.closing()?;
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        if token.kind == open_kind {
            depth += 1;
        } else if token.kind == close_kind {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        } else if token.kind == TokenKind::Eof {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = kinds("@interface Foo : NSObject <Bar>");
        assert_eq!(
            tokens,
            vec![
                TokenKind::AtInterface,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Lt,
                TokenKind::Ident,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        let tokens = kinds("// line\n@class /* inline */ A; /* multi\n * line **/");
        assert_eq!(
            tokens,
            vec![TokenKind::AtClass, TokenKind::Ident, TokenKind::Semicolon, TokenKind::Eof]
        );
    }

    #[test]
    fn test_doc_comment_before_method() {
        let tokens = kinds("/** Runs the job. */\n- (void)run;");
        assert_eq!(tokens[0], TokenKind::Minus);
        assert!(!tokens.contains(&TokenKind::Unknown));
        assert!(!tokens.contains(&TokenKind::Slash));
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(kinds("@class A; /* open"), vec![TokenKind::AtClass, TokenKind::Ident, TokenKind::Semicolon, TokenKind::Eof]);
    }

    #[test]
    fn test_preprocessor_filtering() {
        let source = "#pragma mark - Section\n#define FOO(x) \\\n  (x + 1)\n#import \"A.h\"\n#pragma LeanHeaders need import class A\n#pragma ca.brach.LeanHeaders have forward class B\n#if DEBUG\n#endif\n";
        let tokens = kinds(source);
        assert_eq!(
            tokens,
            vec![TokenKind::Include, TokenKind::Pragma, TokenKind::Pragma, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unknown_characters_do_not_stop_lexing() {
        let tokens = kinds("@class A; ` @class B;");
        assert!(tokens.contains(&TokenKind::Unknown));
        assert_eq!(tokens.iter().filter(|k| **k == TokenKind::AtClass).count(), 2);
    }

    #[test]
    fn test_nested_generics_close_individually() {
        let tokens = kinds("NSArray<NSArray<id>>");
        assert_eq!(tokens.iter().filter(|k| **k == TokenKind::Gt).count(), 2);
    }

    #[test]
    fn test_depth_tracking() {
        let tokens = tokenize("A<B<(C)>> {D}");
        let c = &tokens[5];
        assert_eq!(c.kind, TokenKind::Ident);
        assert_eq!(c.depth, Nesting { angle: 2, paren: 1, brace: 0 });
        let d = &tokens[10];
        assert_eq!(d.depth, Nesting { angle: 0, paren: 0, brace: 1 });
    }

    #[test]
    fn test_shift_does_not_open_angle() {
        let tokens = tokenize("{ A = 1 << 2 } X");
        let last = &tokens[tokens.len() - 2];
        assert!(last.depth.is_top_level());
    }

    #[test]
    fn test_comparisons_in_bodies_do_not_nest() {
        let tokens = tokenize("{ return x > 0 && y < 1; } X");
        assert!(tokens.iter().all(|t| t.depth.angle == 0));
        let last = &tokens[tokens.len() - 2];
        assert!(last.depth.is_top_level());
    }

    #[test]
    fn test_balanced_end_ignores_other_delimiters() {
        let tokens = tokenize("( < ( ) ) >");
        assert_eq!(balanced_end(&tokens, 0), Some(4));
        assert_eq!(balanced_end(&tokens, 1), Some(5));
        assert_eq!(balanced_end(&tokens, 2), Some(3));
    }

    #[test]
    fn test_balanced_end_unterminated() {
        let tokens = tokenize("{ { }");
        assert_eq!(balanced_end(&tokens, 0), None);
        assert_eq!(balanced_end(&tokens, 1), Some(2));
    }
}
