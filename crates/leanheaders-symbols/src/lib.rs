//! leanheaders-symbols: header analysis and dependency resolution
//!
//! This crate turns parsed headers into import plans:
//! - Extract reference sites and supply facts per file
//! - Build a symbol graph of which file supplies which symbol
//! - Resolve every file's needs to imports, forward declarations,
//!   external references, or unsatisfied requirements
//! - Audit existing imports against the plan
//!
//! # Example
//!
//! ```ignore
//! use leanheaders_symbols::{build_import_plans, Config};
//!
//! let sources = vec![
//!     ("Sub.h".to_string(), "@interface Sub : Base\n@end".to_string()),
//!     ("Base.h".to_string(), "@interface Base : NSObject\n@end".to_string()),
//! ];
//! let result = build_import_plans(&sources, &Config::default());
//! assert_eq!(result.plans[0].import_files(), vec!["Base.h"]);
//! ```

mod analysis;
mod audit;
mod config;
mod error;
mod extractor;
mod graph;
mod plan;
mod resolver;
mod symbol;

pub use analysis::{analyze, file_name, Counts, FileAnalysis};
pub use audit::{audit, Finding, FindingKind};
pub use config::{AuditSeverities, Config, ResolveOptions};
pub use error::ResolveError;
pub use extractor::ReferenceExtractor;
pub use graph::{SupplyEntry, SymbolGraph};
pub use plan::{ImportPlan, PlannedForward, PlannedImport, Unsatisfied};
pub use resolver::Resolver;
pub use symbol::{
    FileId, Need, NeedOrigin, Reference, ReferenceRole, ReferenceSite, Supply, SupplyOrigin, SymbolKey,
};

use leanheaders_parser::ParseOptions;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

/// Analyze a set of headers in parallel.
///
/// Results are ordered by file identifier, so the outcome does not depend
/// on the order the sources are given in.
pub fn analyze_all<N, S>(sources: &[(N, S)], options: &ParseOptions) -> Vec<FileAnalysis>
where
    N: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    let mut analyses: Vec<FileAnalysis> = sources
        .par_iter()
        .map(|(file, source)| analyze(file.as_ref(), source.as_ref(), options))
        .collect();
    analyses.sort_by(|a, b| a.file.cmp(&b.file));
    analyses
}

/// Resolve every analyzed file; plans come back in the same order
pub fn resolve(analyses: &[FileAnalysis], options: &ResolveOptions) -> Vec<ImportPlan> {
    let graph = SymbolGraph::build(analyses);
    let resolver = Resolver::new(&graph, options);
    let plans: Vec<ImportPlan> = analyses
        .par_iter()
        .enumerate()
        .map(|(i, analysis)| resolver.resolve(FileId(i as u32), analysis))
        .collect();

    let unsatisfied: usize = plans.iter().map(|p| p.unsatisfied.len()).sum();
    info!(
        files = analyses.len(),
        symbols = graph.len(),
        unsatisfied,
        "resolved header set"
    );
    plans
}

/// Everything produced for a header set
#[derive(Debug, Serialize)]
pub struct PlanResult {
    pub analyses: Vec<FileAnalysis>,
    /// One per analysis, same order
    pub plans: Vec<ImportPlan>,
    /// Audit findings per analysis, same order
    pub findings: Vec<Vec<Finding>>,
}

impl PlanResult {
    /// All unsatisfied requirements across the set
    pub fn errors(&self) -> Vec<ResolveError> {
        self.plans.iter().flat_map(ImportPlan::errors).collect()
    }

    pub fn is_satisfied(&self) -> bool {
        self.plans.iter().all(ImportPlan::is_satisfied)
    }

    pub fn plan(&self, file: &str) -> Option<&ImportPlan> {
        self.plans.iter().find(|p| p.file == file)
    }

    pub fn analysis(&self, file: &str) -> Option<&FileAnalysis> {
        self.analyses.iter().find(|a| a.file == file)
    }
}

/// Analyze, resolve and audit a header set
///
/// This is the main entry point.
pub fn build_import_plans<N, S>(sources: &[(N, S)], config: &Config) -> PlanResult
where
    N: AsRef<str> + Sync,
    S: AsRef<str> + Sync,
{
    let analyses = analyze_all(sources, &config.parse);
    let plans = resolve(&analyses, &config.resolve);
    let findings = analyses
        .iter()
        .zip(&plans)
        .map(|(analysis, plan)| audit(analysis, plan, &config.audit))
        .collect();
    PlanResult {
        analyses,
        plans,
        findings,
    }
}
