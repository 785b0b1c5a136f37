//! LeanHeaders - Objective-C header import minimizer
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use leanheaders_ast as ast;
pub use leanheaders_lexer as lexer;
pub use leanheaders_parser as parser;
pub use leanheaders_symbols as symbols;

pub use leanheaders_symbols::{build_import_plans, Config, ImportPlan, PlanResult};
