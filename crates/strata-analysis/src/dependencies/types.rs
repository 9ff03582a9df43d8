//! Dependency analysis output types.

use serde::{Deserialize, Serialize};
use strata_core::types::package::DependencyKind;

/// All relations sharing one resolved (from file, to file) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct InternalDependency {
    pub from: String,
    pub to: String,
    /// Module specifier as written by the first contributing import.
    pub module_path: Option<String>,
    /// Best-effort absolute path of the target module.
    pub resolved_path: String,
    pub imported_names: Vec<String>,
    pub usage_count: usize,
    pub is_barrel_export: bool,
    pub is_type_only: bool,
    pub is_namespace: bool,
    pub is_dynamic: bool,
    pub condition: Option<String>,
}

/// All relations targeting one `external:` package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDependency {
    pub name: String,
    pub usage_count: usize,
    pub files: Vec<String>,
    pub imported_names: Vec<String>,
    pub is_scoped: bool,
    pub type_only_imports: usize,
    pub runtime_imports: usize,
    pub is_namespace: bool,
    pub is_dynamic: bool,
    pub conditions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionKind {
    Caret,
    Tilde,
    Exact,
    Complex,
}

/// A declared package annotated with what the code actually uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDependency {
    pub name: String,
    pub version: String,
    pub kind: DependencyKind,
    pub version_kind: VersionKind,
    pub usage_count: usize,
    pub file_count: usize,
    pub is_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VersionAnalysis {
    pub total: usize,
    pub caret_ranges: usize,
    pub tilde_ranges: usize,
    pub exact_versions: usize,
    pub complex_ranges: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub name: String,
    pub usage_count: usize,
    pub file_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatistics {
    pub most_used: Vec<UsageEntry>,
    pub least_used: Vec<UsageEntry>,
    /// Declared but never imported, in declaration order.
    pub unused: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DependencyMetrics {
    pub total_internal: usize,
    pub total_external: usize,
    pub total_declared: usize,
    pub circular_count: usize,
    pub max_depth: usize,
    pub average_depth: f64,
    pub files_with_dependencies: usize,
    pub average_dependencies_per_file: f64,
    /// A cycle search or depth traversal hit its cap; results are partial.
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DependencyAnalysisResult {
    pub internal_dependencies: Vec<InternalDependency>,
    pub external_dependencies: Vec<ExternalDependency>,
    pub package_dependencies: Vec<PackageDependency>,
    pub circular_dependencies: Vec<Vec<String>>,
    pub metrics: DependencyMetrics,
    /// `None` when version analysis is disabled.
    pub version_analysis: Option<VersionAnalysis>,
    /// `None` when usage statistics are disabled.
    pub usage_statistics: Option<UsageStatistics>,
}
