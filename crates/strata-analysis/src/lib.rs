//! # strata-analysis
//!
//! Analysis engine for TypeScript/JavaScript sources.
//!
//! - [`parsers`]: enhanced single-file parser (nodes, type info, relations)
//! - [`project`]: multi-file aggregation and import relations
//! - [`dependencies`]: dependency graph, cycles, depth, versions, usage
//! - [`entry_points`], [`complexity`], [`structure`]: derived analyses

pub mod complexity;
pub mod dependencies;
pub mod entry_points;
pub mod parsers;
pub mod paths;
pub mod project;
pub mod structure;

pub use complexity::{ComplexityAnalyzer, ComplexityReport};
pub use dependencies::{DependencyAnalysisResult, DependencyAnalyzer};
pub use entry_points::{EntryPointAnalysis, EntryPointAnalyzer};
pub use parsers::EnhancedParser;
pub use project::{ProjectAggregator, ProjectParse};
pub use structure::{StructureAnalysis, StructureAnalyzer};
