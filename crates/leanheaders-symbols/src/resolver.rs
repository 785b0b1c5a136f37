//! Dependency resolution
//!
//! Matches each file's needs against the supply facts of every other
//! file and decides, per symbol, between an import, a forward
//! declaration, an external reference, or an unsatisfied requirement.

use crate::{
    file_name, FileAnalysis, FileId, ImportPlan, Need, NeedOrigin, PlannedForward, PlannedImport,
    ResolveOptions, SupplyEntry, SupplyOrigin, SymbolGraph, SymbolKey, Unsatisfied,
};
use leanheaders_ast::{Requirement, SymbolKind};
use tracing::{debug, trace, warn};

/// Resolves needs against a symbol graph
pub struct Resolver<'g> {
    graph: &'g SymbolGraph,
    options: &'g ResolveOptions,
}

impl<'g> Resolver<'g> {
    pub fn new(graph: &'g SymbolGraph, options: &'g ResolveOptions) -> Self {
        Self { graph, options }
    }

    /// Build the import plan of one file.
    ///
    /// `id` must be the file's position in the set the graph was built from.
    pub fn resolve(&self, id: FileId, analysis: &FileAnalysis) -> ImportPlan {
        let mut plan = ImportPlan::new(analysis.file.clone());

        for need in analysis.needs() {
            if analysis.satisfies_locally(&need.symbol, need.requirement)
                || (need.symbol.kind == SymbolKind::File && need.symbol.name == analysis.file_name())
            {
                trace!(file = %analysis.file, symbol = %need.symbol, "satisfied locally");
                continue;
            }

            let candidates: Vec<&SupplyEntry> = self
                .graph
                .suppliers(&need.symbol)
                .filter(|entry| entry.file != id)
                .collect();

            match need.requirement {
                Requirement::Import => match find_importable(&candidates) {
                    Some(entry) => plan.imports.push(self.planned_import(entry)),
                    None => self.no_supplier(&mut plan, need),
                },
                Requirement::Forward => {
                    if let Some(entry) = candidates
                        .iter()
                        .find(|entry| entry.supply.symbol.kind.is_forwardable())
                    {
                        let symbol = entry.supply.symbol.clone();
                        let declared_in = candidates
                            .iter()
                            .find(|c| c.supply.symbol == symbol && c.supply.origin == SupplyOrigin::Declaration)
                            .and_then(|c| self.graph.file(c.file))
                            .map(|file| file_name(file).to_string());
                        plan.forwards.push(PlannedForward { symbol, declared_in });
                    } else if let Some(entry) = find_importable(&candidates) {
                        // C types cannot be forward-declared
                        plan.imports.push(self.planned_import(entry));
                    } else {
                        self.no_supplier(&mut plan, need);
                    }
                }
            }
        }

        finish(&mut plan);
        debug!(
            file = %plan.file,
            imports = plan.imports.len(),
            forwards = plan.forwards.len(),
            external = plan.external.len(),
            unsatisfied = plan.unsatisfied.len(),
            "resolved file"
        );
        plan
    }

    fn planned_import(&self, entry: &SupplyEntry) -> PlannedImport {
        let symbol = entry.supply.symbol.clone();
        let supplier = if symbol.kind == SymbolKind::File {
            symbol.name.clone()
        } else {
            self.graph
                .file(entry.file)
                .map(|file| file_name(file).to_string())
                .unwrap_or_default()
        };
        PlannedImport { symbol, supplier }
    }

    fn no_supplier(&self, plan: &mut ImportPlan, need: Need) {
        if need.origin == NeedOrigin::Directive || self.options.strict_references {
            warn!(
                file = %plan.file,
                line = need.line,
                symbol = %need.symbol,
                requirement = need.requirement.keyword(),
                "unsatisfied requirement"
            );
            plan.unsatisfied.push(Unsatisfied {
                symbol: need.symbol,
                requirement: need.requirement,
                origin: need.origin,
                span: need.span,
                line: need.line,
            });
        } else {
            plan.external.push(need.symbol);
        }
    }
}

fn find_importable<'e, 'g>(candidates: &'e [&'g SupplyEntry]) -> Option<&'g SupplyEntry> {
    candidates
        .iter()
        .copied()
        .find(|entry| entry.supply.strength == Requirement::Import)
}

/// Sort, deduplicate, and drop forwards an import already covers
fn finish(plan: &mut ImportPlan) {
    plan.imports.sort();
    plan.imports.dedup_by(|a, b| a.symbol == b.symbol);

    let imported: Vec<SymbolKey> = plan.imports.iter().map(|i| i.symbol.clone()).collect();
    plan.forwards.sort();
    plan.forwards.dedup_by(|a, b| a.symbol == b.symbol);
    plan.forwards.retain(|f| !imported.contains(&f.symbol));

    plan.external.sort();
    plan.external.dedup();
}
