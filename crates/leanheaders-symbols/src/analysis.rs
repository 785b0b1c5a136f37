//! Per-file analysis
//!
//! Parses one header and derives what it declares, what it announces,
//! what it references, and which of those references it must get from
//! somewhere else.

use crate::extractor::ReferenceExtractor;
use crate::{Need, NeedOrigin, Reference, ReferenceSite, Supply, SupplyOrigin, SymbolKey};
use indexmap::IndexMap;
use leanheaders_ast::{
    Declaration, DeclarationKind, Diagnostic, Directive, ForwardKind, ImportLine, LineIndex,
    Requirement, Span, SymbolKind,
};
use leanheaders_parser::{parse_with, ParseOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Names the language itself provides; they never need an import
const BUILTIN_TYPES: &[&str] = &[
    "void", "id", "instancetype", "Class", "SEL", "IMP", "BOOL", "bool", "char", "short", "int",
    "long", "float", "double", "signed", "unsigned", "_Bool",
];

/// Summary counters of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Type-introducing declarations plus `have import class|protocol`
    pub declared: usize,
    /// Forward-declared names plus `have forward` and `have import file`
    pub announced: usize,
    /// Reference sites plus `need class|protocol`
    pub referenced: usize,
}

impl Counts {
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.declared, self.announced, self.referenced)
    }
}

/// Everything known about one file
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    /// Identifier the file was analyzed under, usually its path
    pub file: String,
    pub declarations: Vec<Declaration>,
    pub directives: Vec<Directive>,
    pub imports: Vec<ImportLine>,
    pub diagnostics: Vec<Diagnostic>,
    pub reference_sites: Vec<ReferenceSite>,
    /// Distinct references the file does not satisfy itself
    pub references: Vec<Reference>,
    /// Symbols this file makes available
    pub supplies: Vec<Supply>,
    pub counts: Counts,
    #[serde(skip)]
    lines: LineIndex,
}

impl FileAnalysis {
    /// Last path component: the name `#import` lines use
    pub fn file_name(&self) -> &str {
        file_name(&self.file)
    }

    /// 1-based line of a byte offset in this file
    pub fn line_of(&self, span: Span) -> usize {
        self.lines.line(span.start)
    }

    /// Whether the file itself makes `symbol` available at `requirement`
    pub fn satisfies_locally(&self, symbol: &SymbolKey, requirement: Requirement) -> bool {
        self.supplies.iter().any(|s| s.satisfies(symbol, requirement))
    }

    /// References and `need` directives, merged per symbol to their
    /// strongest requirement. A directive wins over a plain reference,
    /// including a type reference to the same name.
    pub fn needs(&self) -> Vec<Need> {
        let mut needs: IndexMap<SymbolKey, Need> = IndexMap::new();
        for reference in &self.references {
            needs.insert(
                reference.symbol.clone(),
                Need {
                    symbol: reference.symbol.clone(),
                    requirement: reference.requirement,
                    origin: NeedOrigin::Reference,
                    span: reference.span,
                    line: reference.line,
                },
            );
        }
        for directive in self.directives.iter().filter(|d| d.is_need()) {
            let symbol = SymbolKey::new(directive.kind, directive.name.clone());
            // A class or protocol directive names the kind a plain type
            // reference left open
            let previous = needs.shift_remove(&symbol).or_else(|| match directive.kind {
                SymbolKind::File => None,
                _ => needs.shift_remove(&SymbolKey::new(SymbolKind::Type, directive.name.clone())),
            });
            let requirement = previous
                .map_or(directive.requirement, |need| need.requirement.max(directive.requirement));
            needs.insert(
                symbol.clone(),
                Need {
                    symbol,
                    requirement,
                    origin: NeedOrigin::Directive,
                    span: directive.span,
                    line: self.line_of(directive.span),
                },
            );
        }
        needs.into_values().collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Last component of a path
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Analyze one header
pub fn analyze(file: impl Into<String>, source: &str, options: &ParseOptions) -> FileAnalysis {
    let file = file.into();
    let header = parse_with(source, options);
    let lines = LineIndex::new(source);

    let reference_sites = ReferenceExtractor::new(&lines).extract(&header.declarations);
    let supplies = collect_supplies(&header.declarations, &header.directives);
    let counts = count(&header.declarations, &header.directives, &reference_sites);
    let references = collect_references(&reference_sites, &supplies);

    debug!(
        file = %file,
        declared = counts.declared,
        announced = counts.announced,
        referenced = counts.referenced,
        references = references.len(),
        diagnostics = header.diagnostics.len(),
        "analyzed header"
    );

    FileAnalysis {
        file,
        declarations: header.declarations,
        directives: header.directives,
        imports: header.imports,
        diagnostics: header.diagnostics,
        reference_sites,
        references,
        supplies,
        counts,
        lines,
    }
}

fn count(declarations: &[Declaration], directives: &[Directive], sites: &[ReferenceSite]) -> Counts {
    let mut counts = Counts {
        referenced: sites.len(),
        ..Counts::default()
    };
    for declaration in declarations {
        match &declaration.kind {
            DeclarationKind::Class(class) if !class.is_category_like() => counts.declared += 1,
            DeclarationKind::Protocol(_) => counts.declared += 1,
            DeclarationKind::Struct(decl) => counts.declared += decl.declared_names().len(),
            DeclarationKind::Enum(decl) if decl.name().is_some() => counts.declared += 1,
            DeclarationKind::BlockAlias(_) | DeclarationKind::Alias(_) => counts.declared += 1,
            DeclarationKind::Forward(forward) => counts.announced += forward.names.len(),
            _ => {}
        }
    }
    for directive in directives {
        match (directive.is_have(), directive.requirement, directive.kind) {
            (true, Requirement::Import, SymbolKind::File) => counts.announced += 1,
            (true, Requirement::Import, _) => counts.declared += 1,
            (true, Requirement::Forward, _) => counts.announced += 1,
            (false, _, SymbolKind::Class | SymbolKind::Protocol) => counts.referenced += 1,
            (false, _, _) => {}
        }
    }
    counts
}

fn collect_supplies(declarations: &[Declaration], directives: &[Directive]) -> Vec<Supply> {
    let mut supplies = Vec::new();
    let mut declare = |kind: SymbolKind, name: &str, span: Span| {
        supplies.push(Supply {
            symbol: SymbolKey::new(kind, name),
            strength: Requirement::Import,
            origin: SupplyOrigin::Declaration,
            span,
        })
    };
    for declaration in declarations {
        let span = declaration.span;
        match &declaration.kind {
            DeclarationKind::Class(class) if !class.is_category_like() => {
                declare(SymbolKind::Class, &class.name.name, span)
            }
            DeclarationKind::Protocol(proto) => declare(SymbolKind::Protocol, &proto.name.name, span),
            DeclarationKind::Struct(decl) => {
                for name in decl.declared_names() {
                    declare(SymbolKind::Type, &name.name, span);
                }
            }
            DeclarationKind::Enum(decl) => {
                let mut names: Vec<&str> = Vec::new();
                for name in [&decl.macro_name, &decl.alias, &decl.tag].into_iter().flatten() {
                    if !names.contains(&name.as_str()) {
                        names.push(name.as_str());
                    }
                }
                for name in names {
                    declare(SymbolKind::Type, name, span);
                }
            }
            DeclarationKind::BlockAlias(alias) => declare(SymbolKind::Type, &alias.name.name, span),
            DeclarationKind::Alias(alias) => declare(SymbolKind::Type, &alias.name.name, span),
            _ => {}
        }
    }

    for declaration in declarations {
        if let DeclarationKind::Forward(forward) = &declaration.kind {
            let kind = match forward.kind {
                ForwardKind::Class => SymbolKind::Class,
                ForwardKind::Protocol => SymbolKind::Protocol,
            };
            for name in &forward.names {
                supplies.push(Supply {
                    symbol: SymbolKey::new(kind, name.name.clone()),
                    strength: Requirement::Forward,
                    origin: SupplyOrigin::ForwardDeclaration,
                    span: name.span,
                });
            }
        }
    }

    for directive in directives.iter().filter(|d| d.is_have()) {
        supplies.push(Supply {
            symbol: SymbolKey::new(directive.kind, directive.name.clone()),
            strength: directive.requirement,
            origin: SupplyOrigin::Directive,
            span: directive.span,
        });
    }
    supplies
}

/// One entry per distinct symbol at its strongest requirement, minus
/// builtins and whatever the file supplies itself
fn collect_references(sites: &[ReferenceSite], supplies: &[Supply]) -> Vec<Reference> {
    let mut references: IndexMap<SymbolKey, Reference> = IndexMap::new();
    for site in sites {
        if is_builtin(&site.name) {
            continue;
        }
        let symbol = SymbolKey::new(site.kind, site.name.clone());
        let requirement = site.role.requirement();
        references
            .entry(symbol.clone())
            .and_modify(|r| r.requirement = r.requirement.max(requirement))
            .or_insert(Reference {
                symbol,
                requirement,
                span: site.span,
                line: site.line,
            });
    }
    // A plain use of a name is covered by an inheritance or adoption of it
    let covering: Vec<SymbolKey> = references
        .values()
        .filter(|r| r.requirement == Requirement::Import && r.symbol.kind != SymbolKind::Type)
        .map(|r| r.symbol.clone())
        .collect();
    references.retain(|symbol, reference| {
        symbol.kind != SymbolKind::Type
            || reference.requirement == Requirement::Import
            || !covering.iter().any(|c| symbol.accepts(c))
    });

    references
        .into_values()
        .filter(|reference| {
            let local = supplies
                .iter()
                .any(|s| s.satisfies(&reference.symbol, reference.requirement));
            if local {
                trace!(symbol = %reference.symbol, "satisfied locally");
            }
            !local
        })
        .collect()
}

fn is_builtin(name: &str) -> bool {
    name.split(' ').all(|word| BUILTIN_TYPES.contains(&word))
}
