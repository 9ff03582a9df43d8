//! Property-based tests for the dependency invariants.

use proptest::prelude::*;
use strata_analysis::dependencies::cycles::{build_graph, canonical_key, detect_cycles};
use strata_analysis::dependencies::usage::unused_packages;
use strata_analysis::dependencies::versions::analyze_versions;
use strata_analysis::dependencies::ExternalDependency;
use strata_analysis::paths::{expand_braces, normalize};
use strata_core::types::package::{DeclaredDependency, DependencyKind};
use strata_core::types::relation::ImportMetadata;
use strata_core::{FxHashSet, Relation, RelationMetadata, RelationType};

fn edge(from: u8, to: u8) -> Relation {
    Relation::new(
        RelationType::Imports,
        format!("m{from}.ts"),
        format!("m{to}.ts"),
        RelationMetadata::Import(ImportMetadata::default()),
    )
}

fn version() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\^[0-9]\\.[0-9]\\.[0-9]",
        "~[0-9]\\.[0-9]",
        "[0-9]\\.[0-9]\\.[0-9]",
        ">=[0-9] <[0-9]",
        "[0-9]\\.x \\|\\| [0-9]\\.x",
    ]
}

proptest! {
    /// Reported cycles are distinct under rotation and every listed edge exists.
    #[test]
    fn cycles_are_distinct_and_real(edges in prop::collection::vec((0u8..8, 0u8..8), 0..40)) {
        let relations: Vec<Relation> = edges.iter().map(|&(a, b)| edge(a, b)).collect();
        let refs: Vec<&Relation> = relations.iter().collect();
        let report = detect_cycles(&build_graph(&refs), 1000);

        let existing: FxHashSet<(String, String)> = relations
            .iter()
            .map(|r| (r.from.clone(), r.to.clone()))
            .collect();
        let mut keys = FxHashSet::default();
        for cycle in &report.cycles {
            prop_assert!(!cycle.is_empty());
            prop_assert!(keys.insert(canonical_key(cycle)));
            for i in 0..cycle.len() {
                let next = &cycle[(i + 1) % cycle.len()];
                prop_assert!(existing.contains(&(cycle[i].clone(), next.clone())));
            }
        }
        prop_assert!(!report.truncated);
    }

    /// Every declared version lands in exactly one bucket.
    #[test]
    fn version_buckets_sum_to_total(versions in prop::collection::vec(version(), 0..30)) {
        let declared: Vec<DeclaredDependency> = versions
            .iter()
            .enumerate()
            .map(|(i, v)| {
                DeclaredDependency::new(format!("pkg{i}"), v.clone(), DependencyKind::Production)
            })
            .collect();
        let analysis = analyze_versions(&declared);
        prop_assert_eq!(analysis.total, declared.len());
        prop_assert_eq!(
            analysis.caret_ranges
                + analysis.tilde_ranges
                + analysis.exact_versions
                + analysis.complex_ranges,
            analysis.total
        );
    }

    /// Unused packages are exactly the declared names with no observed usage.
    #[test]
    fn unused_is_set_difference(
        declared in prop::collection::vec("[a-e]", 0..10),
        used in prop::collection::vec("[a-e]", 0..10),
    ) {
        let declared_deps: Vec<DeclaredDependency> = declared
            .iter()
            .map(|n| DeclaredDependency::new(n.clone(), "1.0.0", DependencyKind::Production))
            .collect();
        let external: Vec<ExternalDependency> = used
            .iter()
            .map(|n| ExternalDependency { name: n.clone(), usage_count: 1, ..Default::default() })
            .collect();
        let unused = unused_packages(&external, &declared_deps);

        let used_set: FxHashSet<&String> = used.iter().collect();
        let expected: FxHashSet<&String> =
            declared.iter().filter(|n| !used_set.contains(n)).collect();
        let actual: FxHashSet<&String> = unused.iter().collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(unused.len(), unused.iter().collect::<FxHashSet<_>>().len());
    }

    /// Normalization is idempotent.
    #[test]
    fn normalize_is_idempotent(path in "(/)?([a-c]{1,2}|\\.|\\.\\.)(/([a-c]{1,2}|\\.|\\.\\.)){0,6}") {
        let once = normalize(&path);
        prop_assert_eq!(normalize(&once), once);
    }

    /// Brace expansion yields one pattern per alternative and none keep braces.
    #[test]
    fn brace_expansion_counts(alts in prop::collection::vec("[a-z]{1,3}", 1..5)) {
        let pattern = format!("src/*.{{{}}}", alts.join(","));
        let expanded = expand_braces(&pattern);
        prop_assert_eq!(expanded.len(), alts.len());
        prop_assert!(expanded.iter().all(|p| !p.contains('{') && !p.contains('}')), "expanded pattern still contains braces: {:?}", expanded);
    }
}
