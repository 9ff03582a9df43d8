//! Package usage statistics.

use strata_core::constants::USAGE_TOP_N;
use strata_core::types::package::DeclaredDependency;
use strata_core::FxHashSet;

use super::types::{ExternalDependency, UsageEntry, UsageStatistics};

fn entry(dep: &ExternalDependency) -> UsageEntry {
    UsageEntry {
        name: dep.name.clone(),
        usage_count: dep.usage_count,
        file_count: dep.files.len(),
    }
}

/// Most and least used packages come from two independently sorted copies;
/// ties keep first-seen order.
pub fn usage_statistics(
    external: &[ExternalDependency],
    declared: &[DeclaredDependency],
) -> UsageStatistics {
    let mut most: Vec<&ExternalDependency> = external.iter().collect();
    most.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));

    let mut least: Vec<&ExternalDependency> = external.iter().collect();
    least.sort_by(|a, b| a.usage_count.cmp(&b.usage_count));

    UsageStatistics {
        most_used: most.into_iter().take(USAGE_TOP_N).map(entry).collect(),
        least_used: least.into_iter().take(USAGE_TOP_N).map(entry).collect(),
        unused: unused_packages(external, declared),
    }
}

/// Declared names minus observed external names, once each, in declaration order.
pub fn unused_packages(
    external: &[ExternalDependency],
    declared: &[DeclaredDependency],
) -> Vec<String> {
    let observed: FxHashSet<&str> = external.iter().map(|d| d.name.as_str()).collect();
    let mut emitted: FxHashSet<&str> = FxHashSet::default();
    declared
        .iter()
        .map(|d| d.name.as_str())
        .filter(|&name| !observed.contains(name) && emitted.insert(name))
        .map(str::to_string)
        .collect()
}
