mod common;

use common::*;
use indoc::indoc;
use movemap::refactoring::{refactoring_of_method, refactorings_to_class};
use movemap::{parse_text_form, run_algorithms, to_text_form, AlgorithmKind, AnalysisReport, CancellationToken, OutputFormat, RunOptions};
use movemap::progress::SilentProgressSink;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

fn golden(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/golden")
        .join(name);
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_plain_report_matches_golden_file() {
    let results = run_algorithms(
        Arc::new(envy_project()),
        &AlgorithmKind::ALL,
        &RunOptions::default(),
        Arc::new(SilentProgressSink),
        CancellationToken::new(),
    );
    let report = AnalysisReport::new(results, 0.0, true);
    assert_eq!(report.render(OutputFormat::Plain).unwrap(), golden("envy.txt"));
}

#[test]
fn test_golden_file_parses_into_lookups() {
    let parsed = parse_text_form(&golden("envy.txt")).unwrap();
    assert_eq!(parsed.len(), 4);
    assert!(parsed.iter().all(|r| r.member_signature() == ENVIOUS_METHOD));
    assert_eq!(refactorings_to_class(&parsed, CLASS_B).len(), 4);
    // Four identical lines name the same method
    assert!(refactoring_of_method(&parsed, ENVIOUS_METHOD).is_err());
}

#[test]
fn test_text_form_round_trips_generic_parameters() {
    let text = indoc! {"
        # proposals
        shop.Cart.merge(java.util.Map<java.lang.String,java.lang.Integer>,int) -> shop.Inventory
        shop.Cart.total() -> shop.Pricing

        shop.Cart.owner -> shop.Customer
    "};
    let parsed = parse_text_form(text).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(
        parsed[0].params.as_deref(),
        Some(
            &[
                "java.util.Map<java.lang.String,java.lang.Integer>".to_string(),
                "int".to_string()
            ][..]
        )
    );
    assert_eq!(parsed[2].params, None);

    let single = refactoring_of_method(&parsed, "shop.Cart.total()").unwrap().unwrap();
    assert_eq!(single.target_class, "shop.Pricing");

    let rendered: Vec<String> = parsed.iter().map(ToString::to_string).collect();
    let reparsed: Vec<_> = rendered
        .iter()
        .map(|line| line.parse::<movemap::TextFormRefactoring>().unwrap())
        .collect();
    assert_eq!(parsed, reparsed);
}

#[test]
fn test_to_text_form_sorts_by_source() {
    let refactorings = vec![
        movemap::Refactoring::new("p.B.z()", "p.C", 0.9, false),
        movemap::Refactoring::new("p.A.f", "p.C", 0.1, true),
    ];
    assert_eq!(
        to_text_form(&refactorings).unwrap(),
        "p.A.f -> p.C\np.B.z() -> p.C\n"
    );
}
