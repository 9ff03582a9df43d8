//! DependencyAnalyzer: one project in, one [`DependencyAnalysisResult`] out.

use strata_core::config::DependencyConfig;
use strata_core::errors::AnalysisResult;
use strata_core::types::package::DeclaredDependency;
use strata_core::types::project::ProjectInfo;
use strata_core::FxHashMap;

use super::aggregate::{aggregate_external, aggregate_internal};
use super::cycles::{build_graph, detect_cycles};
use super::filter::{well_formed, NodeFileIndex, RelationFilter};
use super::metrics::{average_depth, per_file, DependencyGraph};
use super::types::{
    DependencyAnalysisResult, DependencyMetrics, ExternalDependency, PackageDependency,
};
use super::usage::usage_statistics;
use super::versions::{analyze_versions, classify_version};

/// Stateless; every call works only on its arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyAnalyzer;

impl DependencyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        project: &ProjectInfo,
        options: &DependencyConfig,
    ) -> AnalysisResult<DependencyAnalysisResult> {
        project.validate()?;
        let root = project.root_path.as_str();
        let filter = RelationFilter::new(root, options)?;
        let index = NodeFileIndex::new(&project.ast);

        let relations = filter.apply(well_formed(&project.relations), &index);
        let internal =
            aggregate_internal(&relations, &index, root, options.effective_skip_same_file());
        let external = aggregate_external(&relations, &index);

        let mut truncated = false;
        let circular = if options.effective_detect_circular() {
            let graph = build_graph(&relations);
            let report = detect_cycles(&graph, options.effective_max_depth());
            truncated |= report.truncated;
            report.cycles
        } else {
            Vec::new()
        };

        let (max_depth, capped) = DependencyGraph::new(&internal).max_depth();
        if capped {
            tracing::warn!("depth traversal stopped at iteration cap");
        }
        truncated |= capped;

        let declared = project.declared_dependencies();
        let (files_with_dependencies, average_dependencies_per_file) =
            per_file(&internal, &external);

        let metrics = DependencyMetrics {
            total_internal: internal.len(),
            total_external: external.len(),
            total_declared: declared.len(),
            circular_count: circular.len(),
            max_depth,
            average_depth: average_depth(&internal),
            files_with_dependencies,
            average_dependencies_per_file,
            truncated,
        };

        let version_analysis = options
            .effective_analyze_versions()
            .then(|| analyze_versions(&declared));
        let usage = options
            .effective_usage_statistics()
            .then(|| usage_statistics(&external, &declared));

        tracing::debug!(
            root,
            relations = relations.len(),
            internal = metrics.total_internal,
            external = metrics.total_external,
            cycles = metrics.circular_count,
            max_depth = metrics.max_depth,
            "dependency analysis complete"
        );

        Ok(DependencyAnalysisResult {
            package_dependencies: package_dependencies(&declared, &external),
            internal_dependencies: internal,
            external_dependencies: external,
            circular_dependencies: circular,
            metrics,
            version_analysis,
            usage_statistics: usage,
        })
    }
}

/// Declared packages annotated with observed usage.
pub fn package_dependencies(
    declared: &[DeclaredDependency],
    external: &[ExternalDependency],
) -> Vec<PackageDependency> {
    let observed: FxHashMap<&str, &ExternalDependency> =
        external.iter().map(|d| (d.name.as_str(), d)).collect();
    declared
        .iter()
        .map(|dep| {
            let used = observed.get(dep.name.as_str());
            PackageDependency {
                name: dep.name.clone(),
                version: dep.version.clone(),
                kind: dep.kind,
                version_kind: classify_version(&dep.version),
                usage_count: used.map_or(0, |d| d.usage_count),
                file_count: used.map_or(0, |d| d.files.len()),
                is_used: used.is_some(),
            }
        })
        .collect()
}
