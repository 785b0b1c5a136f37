//! Import audit: compare a file's existing imports and forward
//! declarations with its plan

use crate::{AuditSeverities, FileAnalysis, ImportPlan, SupplyOrigin, SymbolKey};
use leanheaders_ast::{DeclarationKind, ForwardKind, Severity, Span, SymbolKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// The plan imports a file the header does not
    MissingImport,
    /// The plan forward-declares a symbol the header does not
    MissingForward,
    /// A quoted import nothing in the header needs
    RedundantImport,
    /// A quoted import whose symbols only need forward declarations
    ImportInsteadOfForward,
    /// A forward declaration of an unused or locally declared symbol
    RedundantForward,
}

impl FindingKind {
    pub fn code(self) -> &'static str {
        match self {
            FindingKind::MissingImport => "missing-import",
            FindingKind::MissingForward => "missing-forward",
            FindingKind::RedundantImport => "redundant-import",
            FindingKind::ImportInsteadOfForward => "import-instead-of-forward",
            FindingKind::RedundantForward => "redundant-forward",
        }
    }

    fn severity(self, severities: &AuditSeverities) -> Severity {
        match self {
            FindingKind::MissingImport => severities.missing_import,
            FindingKind::MissingForward => severities.missing_forward,
            FindingKind::RedundantImport | FindingKind::ImportInsteadOfForward => {
                severities.redundant_import
            }
            FindingKind::RedundantForward => severities.redundant_forward,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    /// Location of the offending line; dummy for missing entries
    pub span: Span,
}

/// Audit one file against its plan. Angled imports are left alone.
pub fn audit(analysis: &FileAnalysis, plan: &ImportPlan, severities: &AuditSeverities) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut report = |kind: FindingKind, message: String, span: Span| {
        let severity = kind.severity(severities);
        if severity.is_reported() {
            findings.push(Finding {
                kind,
                severity,
                message,
                span,
            });
        }
    };

    let planned_files = plan.import_files();
    let existing: Vec<_> = analysis.imports.iter().filter(|i| !i.is_angled).collect();

    for file in &planned_files {
        if !existing.iter().any(|i| i.file_name() == *file) {
            report(
                FindingKind::MissingImport,
                format!("missing #import \"{}\"", file),
                Span::dummy(),
            );
        }
    }

    for import in &existing {
        let name = import.file_name();
        if planned_files.contains(&name) || name == analysis.file_name() {
            continue;
        }
        let forwarded: Vec<&str> = plan
            .forwards
            .iter()
            .filter(|f| f.declared_in.as_deref() == Some(name))
            .map(|f| f.symbol.name.as_str())
            .collect();
        if forwarded.is_empty() {
            report(
                FindingKind::RedundantImport,
                format!("#import \"{}\" is not needed", import.path),
                import.span,
            );
        } else {
            report(
                FindingKind::ImportInsteadOfForward,
                format!(
                    "#import \"{}\" can be replaced by forward declarations of {}",
                    import.path,
                    forwarded.join(", ")
                ),
                import.span,
            );
        }
    }

    for forward in &plan.forwards {
        let via_import = forward
            .declared_in
            .as_deref()
            .map(|file| existing.iter().any(|i| i.file_name() == file))
            .unwrap_or(false);
        if !via_import {
            report(
                FindingKind::MissingForward,
                format!("missing forward declaration of {}", forward.symbol),
                Span::dummy(),
            );
        }
    }

    for declaration in &analysis.declarations {
        let DeclarationKind::Forward(forward) = &declaration.kind else {
            continue;
        };
        let kind = match forward.kind {
            ForwardKind::Class => SymbolKind::Class,
            ForwardKind::Protocol => SymbolKind::Protocol,
        };
        for name in &forward.names {
            let symbol = SymbolKey::new(kind, name.name.clone());
            if is_declared_locally(analysis, &symbol) {
                report(
                    FindingKind::RedundantForward,
                    format!("{} is declared in this file", symbol),
                    name.span,
                );
            } else if !is_used(analysis, &symbol) {
                report(
                    FindingKind::RedundantForward,
                    format!("forward declaration of {} is not used", symbol),
                    name.span,
                );
            }
        }
    }

    findings
}

fn is_declared_locally(analysis: &FileAnalysis, symbol: &SymbolKey) -> bool {
    analysis
        .supplies
        .iter()
        .any(|s| s.symbol == *symbol && s.origin == SupplyOrigin::Declaration)
}

fn is_used(analysis: &FileAnalysis, symbol: &SymbolKey) -> bool {
    analysis
        .reference_sites
        .iter()
        .any(|site| SymbolKey::new(site.kind, site.name.clone()).accepts(symbol))
        || analysis
            .directives
            .iter()
            .any(|d| d.is_need() && SymbolKey::new(d.kind, d.name.clone()).accepts(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{analyze, resolve, ResolveOptions};
    use leanheaders_parser::ParseOptions;

    fn audit_first(files: &[(&str, &str)]) -> Vec<FindingKind> {
        let analyses: Vec<_> = files
            .iter()
            .map(|(name, source)| analyze(*name, source, &ParseOptions::default()))
            .collect();
        let plans = resolve(&analyses, &ResolveOptions::default());
        audit(&analyses[0], &plans[0], &AuditSeverities::default())
            .into_iter()
            .map(|f| f.kind)
            .collect()
    }

    const MODEL: (&str, &str) = ("Model.h", "@interface Model : NSObject\n@end");
    const BASE: (&str, &str) = ("Base.h", "@interface Base : NSObject\n@end");

    #[test]
    fn test_minimal_header_is_clean() {
        let kinds = audit_first(&[
            (
                "User.h",
                "#import \"Base.h\"\n#import <Foundation/Foundation.h>\n@class Model;\n\
                 @interface User : Base\n@property Model *model;\n@end",
            ),
            MODEL,
            BASE,
        ]);
        assert!(kinds.is_empty(), "{:?}", kinds);
    }

    #[test]
    fn test_missing_entries() {
        let kinds = audit_first(&[
            ("User.h", "@interface User : Base\n@property Model *model;\n@end"),
            MODEL,
            BASE,
        ]);
        assert_eq!(kinds, vec![FindingKind::MissingImport, FindingKind::MissingForward]);
    }

    #[test]
    fn test_import_where_forward_suffices() {
        let kinds = audit_first(&[
            ("User.h", "#import \"Model.h\"\n@property Model *model;"),
            MODEL,
        ]);
        assert_eq!(kinds, vec![FindingKind::ImportInsteadOfForward]);
    }

    #[test]
    fn test_redundant_entries() {
        let kinds = audit_first(&[
            ("User.h", "#import \"Base.h\"\n@class Unused;\n@interface User : NSObject\n@end"),
            BASE,
        ]);
        assert_eq!(kinds, vec![FindingKind::RedundantImport, FindingKind::RedundantForward]);
    }

    #[test]
    fn test_severities_filter_findings() {
        let analyses = vec![analyze("A.h", "#import \"Gone.h\"", &ParseOptions::default())];
        let plans = resolve(&analyses, &ResolveOptions::default());
        let quiet = AuditSeverities {
            redundant_import: Severity::Ignored,
            ..AuditSeverities::default()
        };
        assert!(audit(&analyses[0], &plans[0], &quiet).is_empty());
    }
}
