//! Pragma dialect and import line parsing
//!
//! ```text
//! #pragma LeanHeaders <need|have> <import|forward> <class|protocol> Name, Name
//! #pragma LeanHeaders <need|have> <import|forward> file File+Category.h
//! ```

use leanheaders_ast::{Directive, ImportLine, Requirement, Span, Strength, SymbolKind};
use leanheaders_lexer::UNIQUE_NAMESPACE;

use crate::ParseError;

/// Parse one pragma line into directives, one per listed name.
///
/// Lines in the short namespace are ignored (not an error) when
/// `unique_only` is set.
pub fn parse_pragma(line: &str, span: Span, unique_only: bool) -> Result<Vec<Directive>, ParseError> {
    let line = strip_trailing_comment(line);
    let body = line.trim_start_matches('#').trim_start();
    let rest = body
        .strip_prefix("pragma")
        .ok_or_else(|| ParseError::dialect("not a pragma line", span))?;

    let mut words = rest.split_whitespace();
    let namespace = words.next().unwrap_or_default();
    if unique_only && namespace != UNIQUE_NAMESPACE {
        return Ok(Vec::new());
    }

    let strength = match words.next() {
        Some("need") => Strength::Need,
        Some("have") => Strength::Have,
        Some(other) => return Err(unknown_keyword(other, "'need' or 'have'", span)),
        None => return Err(ParseError::dialect("pragma has no directive", span)),
    };
    let requirement = match words.next() {
        Some("import") => Requirement::Import,
        Some("forward") => Requirement::Forward,
        Some(other) => return Err(unknown_keyword(other, "'import' or 'forward'", span)),
        None => return Err(ParseError::dialect("directive has no strength", span)),
    };
    let kind = match words.next() {
        Some("class") => SymbolKind::Class,
        Some("protocol") => SymbolKind::Protocol,
        Some("file") => SymbolKind::File,
        Some(other) => return Err(unknown_keyword(other, "'class', 'protocol' or 'file'", span)),
        None => return Err(ParseError::dialect("directive has no symbol kind", span)),
    };
    if kind == SymbolKind::File && requirement == Requirement::Forward {
        return Err(ParseError::dialect("files cannot be forward declared", span));
    }

    let names: Vec<&str> = words
        .flat_map(|word| word.split(','))
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return Err(ParseError::MissingName {
            what: "directive",
            span,
        });
    }

    names
        .into_iter()
        .map(|name| {
            if !is_valid_name(name, kind) {
                return Err(ParseError::dialect(
                    format!("'{}' is not a valid {} name", name, kind),
                    span,
                ));
            }
            Ok(Directive {
                strength,
                requirement,
                kind,
                name: name.to_string(),
                span,
            })
        })
        .collect()
}

fn strip_trailing_comment(line: &str) -> &str {
    let end = [line.find("//"), line.find("/*")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..end]
}

fn unknown_keyword(found: &str, expected: &str, span: Span) -> ParseError {
    ParseError::dialect(format!("expected {}, found '{}'", expected, found), span)
}

fn is_valid_name(name: &str, kind: SymbolKind) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    match kind {
        SymbolKind::File => name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '+' | '.' | '-' | '/')),
        _ => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
    }
}

/// Parse an `#import`/`#include` line; `None` for forms without a literal
/// path (`#include MACRO`).
pub fn parse_import_line(line: &str, span: Span) -> Option<ImportLine> {
    let body = line.trim_start_matches('#').trim_start();
    let (is_include, rest) = if let Some(rest) = body.strip_prefix("include") {
        (true, rest)
    } else {
        (false, body.strip_prefix("import")?)
    };
    let rest = rest.trim_start();
    let (close, is_angled) = match rest.chars().next()? {
        '"' => ('"', false),
        '<' => ('>', true),
        _ => return None,
    };
    let inner = &rest[1..];
    let end = inner.find(close)?;
    Some(ImportLine {
        path: inner[..end].to_string(),
        is_include,
        is_angled,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(line: &str) -> Vec<Directive> {
        parse_pragma(line, Span::dummy(), false).expect("valid pragma")
    }

    #[test]
    fn test_need_import_class() {
        let parsed = directives("#pragma LeanHeaders need import class RequiredBaseClass");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].strength, Strength::Need);
        assert_eq!(parsed[0].requirement, Requirement::Import);
        assert_eq!(parsed[0].kind, SymbolKind::Class);
        assert_eq!(parsed[0].name, "RequiredBaseClass");
    }

    #[test]
    fn test_file_names_keep_punctuation() {
        let parsed = directives("#pragma LeanHeaders have import file Kit/NSString+Extras.h");
        assert_eq!(parsed[0].kind, SymbolKind::File);
        assert_eq!(parsed[0].name, "Kit/NSString+Extras.h");
    }

    #[test]
    fn test_name_list() {
        let parsed = directives("#pragma LeanHeaders have forward protocol A, B ,C");
        let names: Vec<_> = parsed.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_trailing_comment_is_not_a_name() {
        let parsed = directives("#pragma LeanHeaders need forward class A // for the delegate");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "A");
    }

    #[test]
    fn test_forward_file_is_rejected() {
        let result = parse_pragma("#pragma LeanHeaders need forward file A.h", Span::dummy(), false);
        assert!(matches!(result, Err(ParseError::Dialect { .. })));
    }

    #[test]
    fn test_unknown_keyword_is_rejected() {
        let result = parse_pragma("#pragma LeanHeaders want import class A", Span::dummy(), false);
        assert!(matches!(result, Err(ParseError::Dialect { .. })));
    }

    #[test]
    fn test_missing_name() {
        let result = parse_pragma("#pragma LeanHeaders need import class", Span::dummy(), false);
        assert!(matches!(result, Err(ParseError::MissingName { .. })));
    }

    #[test]
    fn test_unique_namespace_mode() {
        let short = parse_pragma("#pragma LeanHeaders need import class A", Span::dummy(), true);
        assert!(short.expect("ignored").is_empty());
        let unique = parse_pragma("#pragma ca.brach.LeanHeaders need import class A", Span::dummy(), true);
        assert_eq!(unique.expect("valid").len(), 1);
    }

    #[test]
    fn test_import_lines() {
        let quoted = parse_import_line("#import \"Thing.h\"", Span::dummy()).expect("quoted");
        assert_eq!(quoted.path, "Thing.h");
        assert!(!quoted.is_angled && !quoted.is_include);

        let framework = parse_import_line("#import <Kit/Kit.h>", Span::dummy()).expect("angled");
        assert!(framework.is_angled);
        assert_eq!(framework.file_name(), "Kit.h");

        let include = parse_import_line("# include \"c.h\" // trailing", Span::dummy()).expect("include");
        assert!(include.is_include);
        assert_eq!(include.path, "c.h");

        assert!(parse_import_line("#include HEADER_MACRO", Span::dummy()).is_none());
    }
}
