//! Style findings on individual declarations and import lines

use leanheaders_ast::{
    ClassDecl, Declaration, DeclarationKind, Diagnostic, EnumDecl, EnumStyle, ImportLine, LintKind,
    ProtocolDecl, Span, StructDecl,
};

use crate::LintSeverities;

/// Lints for one declaration; lints configured as `ignored` are dropped
pub fn lint_declaration(declaration: &Declaration, severities: &LintSeverities) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    let span = declaration.span;
    match &declaration.kind {
        DeclarationKind::Class(class) => lint_class(class, span, &mut findings),
        DeclarationKind::Protocol(proto) => lint_protocol(proto, span, &mut findings),
        DeclarationKind::Enum(decl) => lint_enum(decl, span, &mut findings),
        DeclarationKind::Struct(decl) => lint_struct(decl, span, &mut findings),
        _ => {}
    }
    findings
        .into_iter()
        .filter_map(|(kind, message, span)| {
            let severity = severities.severity(kind);
            severity
                .is_reported()
                .then(|| Diagnostic::lint(kind, severity, message, span))
        })
        .collect()
}

/// `#include "x.h"` where `#import` guards against double inclusion
pub fn lint_import(import: &ImportLine, severities: &LintSeverities) -> Option<Diagnostic> {
    let severity = severities.severity(LintKind::IncludeDirective);
    (import.is_include && !import.is_angled && severity.is_reported()).then(|| {
        Diagnostic::lint(
            LintKind::IncludeDirective,
            severity,
            format!("use #import instead of #include for \"{}\"", import.path),
            import.span,
        )
    })
}

type Finding = (LintKind, String, Span);

fn lint_class(class: &ClassDecl, span: Span, findings: &mut Vec<Finding>) {
    if class.is_category_like() || class.superclass.is_some() || class.root_marked {
        return;
    }
    findings.push((
        LintKind::RootClass,
        format!(
            "class '{}' has no superclass; inherit from NSObject or mark it NS_ROOT_CLASS",
            class.name
        ),
        span,
    ));
}

fn lint_protocol(proto: &ProtocolDecl, span: Span, findings: &mut Vec<Finding>) {
    if proto.protocols.is_empty() {
        findings.push((
            LintKind::RootProtocol,
            format!("protocol '{}' does not adopt any protocol; adopt <NSObject>", proto.name),
            span,
        ));
    }
}

fn lint_enum(decl: &EnumDecl, span: Span, findings: &mut Vec<Finding>) {
    let display = decl
        .name()
        .map(|name| format!("'{}'", name))
        .unwrap_or_else(|| "anonymous enum".to_string());

    if decl.style == EnumStyle::Plain {
        findings.push((
            LintKind::PlainEnum,
            format!("enum {} should be declared with NS_ENUM or NS_OPTIONS", display),
            span,
        ));
    }
    if !decl.is_typedef {
        findings.push((
            LintKind::TypedefEnum,
            format!("enum {} is not typedef'd", display),
            span,
        ));
    }

    match decl.style {
        EnumStyle::Plain => match (&decl.tag, &decl.alias) {
            (None, None) => findings.push((
                LintKind::EnumName,
                "enum has neither a tag nor a typedef name".to_string(),
                span,
            )),
            (Some(tag), Some(alias)) if tag.name != alias.name => findings.push((
                LintKind::EnumName,
                format!("enum tag '{}' deviates from its typedef name '{}'", tag, alias),
                alias.span,
            )),
            _ => {}
        },
        _ => match (&decl.macro_name, &decl.alias) {
            (None, _) => findings.push((
                LintKind::EnumName,
                "enum macro does not name the enum".to_string(),
                span,
            )),
            (Some(name), Some(alias)) if name.name == alias.name => findings.push((
                LintKind::EnumName,
                format!("typedef name '{}' repeats the name given to the macro", alias),
                alias.span,
            )),
            (Some(name), Some(alias)) => findings.push((
                LintKind::EnumName,
                format!("typedef name '{}' conflicts with the macro name '{}'", alias, name),
                alias.span,
            )),
            _ => {}
        },
    }
}

fn lint_struct(decl: &StructDecl, span: Span, findings: &mut Vec<Finding>) {
    if !decl.is_typedef {
        findings.push((
            LintKind::TypedefStruct,
            format!(
                "struct '{}' is not typedef'd",
                decl.tag.as_ref().map(|t| t.name.as_str()).unwrap_or("?")
            ),
            span,
        ));
    }
    match (&decl.tag, &decl.alias) {
        (None, None) => findings.push((
            LintKind::StructName,
            "struct has neither a tag nor a typedef name".to_string(),
            span,
        )),
        (Some(tag), None) if decl.is_typedef => findings.push((
            LintKind::StructName,
            format!("typedef of struct '{}' declares no alias", tag),
            span,
        )),
        (Some(tag), Some(alias)) if tag.name != alias.name => findings.push((
            LintKind::StructName,
            format!("struct tag '{}' conflicts with its typedef name '{}'", tag, alias),
            alias.span,
        )),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_with, ParseOptions};
    use leanheaders_ast::{DiagnosticKind, Severity};

    fn lint_kinds(source: &str) -> Vec<LintKind> {
        let options = ParseOptions {
            unique_pragma: false,
            lints: LintSeverities::all(Severity::Warning),
        };
        parse_with(source, &options)
            .diagnostics
            .into_iter()
            .filter_map(|d| match d.kind {
                DiagnosticKind::Lint(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_root_class() {
        assert_eq!(lint_kinds("@interface Loner\n@end"), vec![LintKind::RootClass]);
        assert!(lint_kinds("NS_ROOT_CLASS\n@interface Root\n@end").is_empty());
        assert!(lint_kinds("@interface Child : NSObject\n@end").is_empty());
        assert!(lint_kinds("@interface Loner (Extras)\n@end").is_empty());
    }

    #[test]
    fn test_root_protocol() {
        assert_eq!(lint_kinds("@protocol Bare\n@end"), vec![LintKind::RootProtocol]);
        assert!(lint_kinds("@protocol Good <NSObject>\n@end").is_empty());
    }

    #[test]
    fn test_plain_enum_without_typedef() {
        let kinds = lint_kinds("enum Plain { PlainA };");
        assert_eq!(kinds, vec![LintKind::PlainEnum, LintKind::TypedefEnum]);
    }

    #[test]
    fn test_macro_enum_is_clean() {
        assert!(lint_kinds("typedef NS_ENUM(NSInteger, Mode) { ModeA };").is_empty());
    }

    #[test]
    fn test_conflicting_struct_names() {
        let kinds = lint_kinds("typedef struct Tag { int x; } Other;");
        assert_eq!(kinds, vec![LintKind::StructName]);
    }

    #[test]
    fn test_include_directive() {
        assert_eq!(lint_kinds("#include \"local.h\""), vec![LintKind::IncludeDirective]);
        assert!(lint_kinds("#include <stdio.h>").is_empty());
    }

    #[test]
    fn test_ignored_lints_are_dropped() {
        let header = parse_with("@interface Loner\n@end", &ParseOptions::default());
        assert!(header.diagnostics.iter().any(|d| d.kind == DiagnosticKind::Lint(LintKind::RootClass)));

        let quiet = ParseOptions {
            unique_pragma: false,
            lints: LintSeverities::all(Severity::Ignored),
        };
        assert!(parse_with("@interface Loner\n@end", &quiet).diagnostics.is_empty());
    }
}
