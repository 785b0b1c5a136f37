//! Per-file analysis of the fixture headers: every section parses and
//! yields the expected (declared, announced, referenced) counts.

mod common;

use common::assertions::assert_parses_cleanly;
use common::fixtures::{load_fixture, section};
use leanheaders::ast::{DeclarationKind, Requirement, Strength, SymbolKind};
use leanheaders::parser::ParseOptions;
use leanheaders::symbols::{analyze, FileAnalysis};
use rstest::rstest;

fn analyze_section(file: &str, title: &str) -> FileAnalysis {
    analyze(file, &section(file, title), &ParseOptions::default())
}

#[rstest]
#[case("Declarations.h", "Classes", (9, 0, 15))]
#[case("Declarations.h", "Categories and Extensions", (0, 0, 8))]
#[case("Declarations.h", "Protocols", (5, 0, 5))]
#[case("Declarations.h", "Members", (0, 0, 27))]
#[case("Declarations.h", "Forward Declarations", (0, 6, 0))]
#[case("Definitions.h", "Structures", (3, 0, 0))]
#[case("Definitions.h", "Enumerations", (8, 0, 0))]
#[case("Definitions.h", "Closure Signatures", (4, 0, 19))]
#[case("Definitions.h", "Arbitrary Definitions", (2, 0, 3))]
#[case("Directives.h", "Needs", (0, 0, 4))]
#[case("Directives.h", "Haves", (2, 4, 0))]
fn section_counts(#[case] file: &str, #[case] title: &str, #[case] expected: (usize, usize, usize)) {
    let analysis = analyze_section(file, title);
    assert_parses_cleanly(&analysis);
    assert_eq!(analysis.counts.as_tuple(), expected, "{} / {}", file, title);
}

#[rstest]
#[case("Declarations.h", (14, 6, 55))]
#[case("Definitions.h", (17, 0, 22))]
#[case("Directives.h", (2, 4, 4))]
fn whole_file_counts(#[case] file: &str, #[case] expected: (usize, usize, usize)) {
    let analysis = analyze(file, &load_fixture(file), &ParseOptions::default());
    assert_parses_cleanly(&analysis);
    assert_eq!(analysis.counts.as_tuple(), expected, "{}", file);
}

#[test]
fn categories_do_not_declare_classes() {
    let analysis = analyze_section("Declarations.h", "Categories and Extensions");
    let mut categories = 0;
    let mut extensions = 0;
    for declaration in &analysis.declarations {
        if let DeclarationKind::Class(class) = &declaration.kind {
            assert!(class.is_category_like());
            if class.is_extension {
                extensions += 1;
            } else {
                categories += 1;
            }
        }
    }
    assert_eq!((categories, extensions), (3, 2));
}

#[test]
fn member_owners_follow_open_interfaces() {
    let analysis = analyze("Declarations.h", &load_fixture("Declarations.h"), &ParseOptions::default());
    let owners: Vec<_> = analysis
        .declarations
        .iter()
        .filter_map(|d| match &d.kind {
            DeclarationKind::Property(p) if p.name.name == "hasBell" || p.name.name == "hasLamp" => {
                p.owner.clone()
            }
            _ => None,
        })
        .collect();
    assert_eq!(owners, vec!["Bicycle".to_string(), "Bicycle".to_string()]);
}

#[test]
fn error_domain_constant_is_skipped() {
    let analysis = analyze_section("Definitions.h", "Enumerations");
    let error_enum = analysis
        .declarations
        .iter()
        .find_map(|d| match &d.kind {
            DeclarationKind::Enum(e) if e.domain.is_some() => Some(e),
            _ => None,
        })
        .expect("error enum");
    assert_eq!(error_enum.domain.as_ref().map(|d| d.name.as_str()), Some("GarageErrorDomain"));
    assert_eq!(error_enum.name().map(|n| n.name.as_str()), Some("GarageError"));
}

#[test]
fn directives_are_recorded() {
    let analysis = analyze("Directives.h", &load_fixture("Directives.h"), &ParseOptions::default());
    assert_eq!(analysis.directives.len(), 12);

    let needs: Vec<_> = analysis
        .directives
        .iter()
        .filter(|d| d.strength == Strength::Need)
        .map(|d| (d.requirement, d.kind, d.name.as_str()))
        .collect();
    assert_eq!(
        needs,
        vec![
            (Requirement::Import, SymbolKind::Class, "Chassis"),
            (Requirement::Import, SymbolKind::Protocol, "Drivable"),
            (Requirement::Import, SymbolKind::File, "VehicleConstants.h"),
            (Requirement::Import, SymbolKind::File, "Vehicle+Registration.h"),
            (Requirement::Forward, SymbolKind::Class, "Dashboard"),
            (Requirement::Forward, SymbolKind::Protocol, "Refuelling"),
        ]
    );
}

#[test]
fn unique_pragma_ignores_short_namespace() {
    let options = ParseOptions {
        unique_pragma: true,
        ..ParseOptions::default()
    };
    let source = "#pragma LeanHeaders need import class Short\n\
                  #pragma ca.brach.LeanHeaders need import class Unique";
    let analysis = analyze("Unique.h", source, &options);
    let names: Vec<_> = analysis.directives.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Unique"]);
}
