//! Declared version range classification.

use strata_core::types::package::DeclaredDependency;

use super::types::{VersionAnalysis, VersionKind};

/// Exactly one bucket per version string.
pub fn classify_version(version: &str) -> VersionKind {
    if version.starts_with('^') {
        VersionKind::Caret
    } else if version.starts_with('~') {
        VersionKind::Tilde
    } else if !version.contains(' ')
        && !version.contains("||")
        && !version.contains('>')
        && !version.contains('<')
    {
        VersionKind::Exact
    } else {
        VersionKind::Complex
    }
}

pub fn analyze_versions(declared: &[DeclaredDependency]) -> VersionAnalysis {
    let mut analysis = VersionAnalysis {
        total: declared.len(),
        ..Default::default()
    };
    for dep in declared {
        match classify_version(&dep.version) {
            VersionKind::Caret => analysis.caret_ranges += 1,
            VersionKind::Tilde => analysis.tilde_ranges += 1,
            VersionKind::Exact => analysis.exact_versions += 1,
            VersionKind::Complex => analysis.complex_ranges += 1,
        }
    }
    analysis
}
