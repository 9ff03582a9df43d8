//! Project dependency analysis: internal/external aggregation, cycle
//! detection, depth metrics, version classification, usage statistics.

pub mod aggregate;
pub mod analyzer;
pub mod cycles;
pub mod filter;
pub mod metrics;
pub mod types;
pub mod usage;
pub mod versions;

pub use analyzer::DependencyAnalyzer;
pub use types::{
    DependencyAnalysisResult, DependencyMetrics, ExternalDependency, InternalDependency,
    PackageDependency, UsageEntry, UsageStatistics, VersionAnalysis, VersionKind,
};
