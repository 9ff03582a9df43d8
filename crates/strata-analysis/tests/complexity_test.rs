//! Complexity analyzer tests.

use strata_analysis::{ComplexityAnalyzer, EnhancedParser};
use strata_core::config::ComplexityConfig;
use strata_core::AstNode;

fn nodes(files: &[(&str, &str)]) -> Vec<AstNode> {
    let parser = EnhancedParser::new();
    files
        .iter()
        .flat_map(|(path, source)| parser.parse_source(path, source).unwrap().nodes)
        .collect()
}

const BRANCHY: &str = r#"
function route(req: any) {
    if (req.a) {}
    if (req.b) {}
    if (req.c || req.d) {}
    switch (req.kind) {
        case 1: break;
        case 2: break;
        default: break;
    }
    return req.e ?? null;
}
function simple(a: number, b: number) { return a + b; }
"#;

#[test]
fn test_file_and_summary_metrics() {
    let report = ComplexityAnalyzer::default().analyze(&nodes(&[
        ("src/router.ts", BRANCHY),
        ("src/model.ts", "interface Model { id: string }\nclass Store {}\n"),
    ]));

    assert_eq!(report.files.len(), 2);
    let router = &report.files[0];
    assert_eq!(router.file, "src/router.ts");
    assert_eq!(router.function_count, 2);
    // route: 1 + 3 ifs + || + 2 cases + ?? = 8; simple: 1.
    assert_eq!(router.max_complexity, 8);
    assert_eq!(router.total_complexity, 9);
    assert_eq!(router.average_complexity, 4.5);
    assert_eq!(router.average_parameters, 1.5);

    let model = &report.files[1];
    assert_eq!(model.function_count, 0);
    assert_eq!(model.class_count, 1);
    assert_eq!(model.interface_count, 1);
    assert_eq!(model.average_complexity, 0.0);

    assert_eq!(report.summary.total_files, 2);
    assert_eq!(report.summary.total_functions, 2);
    assert_eq!(report.summary.max_complexity, 8);
    assert_eq!(report.summary.threshold, 10);
    assert!(report.complex_functions.is_empty());
}

/// Only callables above the threshold are listed, most complex first.
#[test]
fn test_threshold_reporting() {
    let analyzer = ComplexityAnalyzer::new(&ComplexityConfig { threshold: Some(1) });
    let report = analyzer.analyze(&nodes(&[
        ("src/router.ts", BRANCHY),
        ("src/other.ts", "function check(x: boolean) { return x ? 1 : 2; }\n"),
    ]));
    let listed: Vec<(&str, u32)> = report
        .complex_functions
        .iter()
        .map(|f| (f.name.as_str(), f.complexity))
        .collect();
    assert_eq!(listed, [("route", 8), ("check", 2)]);
    assert_eq!(report.summary.complex_function_count, 2);
    assert_eq!(report.complex_functions[0].line, 2);
}

#[test]
fn test_nesting_depth() {
    let report = ComplexityAnalyzer::default().analyze(&nodes(&[(
        "src/nested.ts",
        "class A { method(p: number) { const inner = 1; } }\n",
    )]));
    // source file → class → method → parameter / variable
    assert_eq!(report.files[0].max_nesting_depth, 3);
}

#[test]
fn test_empty_input() {
    let report = ComplexityAnalyzer::default().analyze(&[]);
    assert!(report.files.is_empty());
    assert_eq!(report.summary.average_complexity, 0.0);
    assert_eq!(report.summary.max_complexity, 0);
}
