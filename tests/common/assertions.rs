use leanheaders::ast::DiagnosticKind;
use leanheaders::symbols::{FileAnalysis, ImportPlan, PlanResult};

/// Assert the header parsed without grammar or lexical trouble
pub fn assert_parses_cleanly(analysis: &FileAnalysis) {
    let problems: Vec<_> = analysis
        .diagnostics
        .iter()
        .filter(|d| !matches!(d.kind, DiagnosticKind::Lint(_)))
        .collect();
    assert!(
        problems.is_empty(),
        "Expected {} to parse cleanly: {:?}",
        analysis.file,
        problems
    );
}

/// Assert the result contains a plan for `file`
pub fn assert_has_plan<'a>(result: &'a PlanResult, file: &str) -> &'a ImportPlan {
    result
        .plan(file)
        .unwrap_or_else(|| panic!("Expected a plan for {}", file))
}

/// Assert no symbol is both imported and forward-declared
pub fn assert_minimal(plan: &ImportPlan) {
    for symbol in plan.forward_symbols() {
        assert!(
            !plan.import_symbols().any(|s| s == symbol),
            "{} both imports and forward-declares {}",
            plan.file,
            symbol
        );
    }
}
