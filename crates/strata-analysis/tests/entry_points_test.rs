//! Entry-point discovery tests.

use strata_analysis::entry_points::{package_entries, EntryPointSource};
use strata_analysis::{EnhancedParser, EntryPointAnalyzer};
use strata_core::config::EntryPointConfig;
use strata_core::errors::AnalysisError;
use strata_core::types::package::PackageInfo;

fn files(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_package_fields_in_order() {
    let package = PackageInfo::from_json_str(
        r#"{
            "main": "dist/index.js",
            "module": "dist/index.mjs",
            "types": "dist/index.d.ts",
            "browser": {"./server.js": false},
            "bin": {"tool": "bin/tool.js"},
            "exports": {".": {"import": "./dist/index.mjs", "require": "./dist/index.cjs"}}
        }"#,
    )
    .unwrap();
    let entries = package_entries(&package);
    let fields: Vec<&str> = entries.iter().map(|(f, _)| f.as_str()).collect();
    assert_eq!(
        fields,
        ["main", "module", "types", "bin.tool", "exports...import", "exports...require"]
    );
}

#[test]
fn test_string_bin_and_browser() {
    let package =
        PackageInfo::from_json_str(r#"{"browser": "dist/browser.js", "bin": "cli.js"}"#).unwrap();
    let entries = package_entries(&package);
    assert_eq!(
        entries,
        [
            ("browser".to_string(), "dist/browser.js".to_string()),
            ("bin".to_string(), "cli.js".to_string()),
        ]
    );
}

/// Package fields win over patterns; paths are normalized and deduplicated.
#[test]
fn test_sources_combine_without_duplicates() {
    let package = PackageInfo::from_json_str(r#"{"main": "./src/index.ts"}"#).unwrap();
    let project_files = files(&[
        "/repo/src/index.ts",
        "/repo/src/app.tsx",
        "/repo/src/lib/util.ts",
        "/repo/bin/run.js",
    ]);
    let analysis = EntryPointAnalyzer::default()
        .analyze("/repo", Some(&package), &project_files, &[])
        .unwrap();

    let found: Vec<(&str, EntryPointSource)> = analysis
        .entry_points
        .iter()
        .map(|e| (e.path.as_str(), e.source))
        .collect();
    assert_eq!(
        found,
        [
            ("src/index.ts", EntryPointSource::PackageField),
            ("src/app.tsx", EntryPointSource::Pattern),
            ("bin/run.js", EntryPointSource::Pattern),
        ]
    );
    assert_eq!(analysis.entry_points[0].field.as_deref(), Some("main"));
    assert!(!analysis.contains("src/lib/util.ts"));
}

#[test]
fn test_shebang_files_detected() {
    let parser = EnhancedParser::new();
    let script = parser
        .parse_source("/repo/scripts/deploy.ts", "#!/usr/bin/env node\nconsole.log('deploy');\n")
        .unwrap();
    let plain = parser.parse_source("/repo/scripts/lib.ts", "export const x = 1;\n").unwrap();
    let nodes: Vec<_> = script.nodes.into_iter().chain(plain.nodes).collect();

    let analysis = EntryPointAnalyzer::default()
        .analyze("/repo", None, &[], &nodes)
        .unwrap();
    assert_eq!(analysis.entry_points.len(), 1);
    assert_eq!(analysis.entry_points[0].path, "scripts/deploy.ts");
    assert_eq!(analysis.entry_points[0].source, EntryPointSource::Shebang);

    let config = EntryPointConfig {
        detect_shebang: Some(false),
        ..Default::default()
    };
    let disabled = EntryPointAnalyzer::new(config)
        .analyze("/repo", None, &[], &nodes)
        .unwrap();
    assert!(disabled.entry_points.is_empty());
}

#[test]
fn test_custom_patterns_replace_defaults() {
    let config = EntryPointConfig {
        patterns: vec!["workers/*.{ts,js}".to_string()],
        use_package_metadata: Some(false),
        ..Default::default()
    };
    let package = PackageInfo::from_json_str(r#"{"main": "index.js"}"#).unwrap();
    let project_files = files(&["workers/a.ts", "workers/b.js", "workers/nested/c.ts", "index.ts"]);
    let analysis = EntryPointAnalyzer::new(config)
        .analyze("", Some(&package), &project_files, &[])
        .unwrap();
    let paths: Vec<&str> = analysis.entry_points.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, ["workers/a.ts", "workers/b.js"]);
}

#[test]
fn test_invalid_pattern_rejected() {
    let config = EntryPointConfig {
        patterns: vec!["src/[".to_string()],
        ..Default::default()
    };
    let err = EntryPointAnalyzer::new(config)
        .analyze("/repo", None, &[], &[])
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidPattern { .. }));
}
