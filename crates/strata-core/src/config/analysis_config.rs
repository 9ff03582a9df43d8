//! Analyzer configuration: dependency graph, entry points, complexity, structure.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COMPLEXITY_THRESHOLD, MAX_RECURSION_DEPTH};

/// Options bundle for the dependency analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DependencyConfig {
    /// If non-empty, a relation must touch a path matching one of these globs.
    pub include_patterns: Vec<String>,
    /// Relations touching a path matching any of these globs are dropped.
    pub exclude_patterns: Vec<String>,
    /// Cycle-search depth. Default and ceiling: 1000.
    pub max_depth: Option<usize>,
    /// Default: true.
    pub detect_circular: Option<bool>,
    /// Default: true.
    pub analyze_versions: Option<bool>,
    /// Default: true.
    pub usage_statistics: Option<bool>,
    /// Leave out relations whose endpoints resolve to the same file
    /// (parent-child, in-file heritage). Default: false.
    pub skip_same_file: Option<bool>,
}

impl DependencyConfig {
    /// Requested depth clamped to the hard recursion guard.
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(MAX_RECURSION_DEPTH).min(MAX_RECURSION_DEPTH)
    }

    pub fn effective_detect_circular(&self) -> bool {
        self.detect_circular.unwrap_or(true)
    }

    pub fn effective_analyze_versions(&self) -> bool {
        self.analyze_versions.unwrap_or(true)
    }

    pub fn effective_usage_statistics(&self) -> bool {
        self.usage_statistics.unwrap_or(true)
    }

    pub fn effective_skip_same_file(&self) -> bool {
        self.skip_same_file.unwrap_or(false)
    }
}

/// Default entry-point globs, relative to the project root.
pub const DEFAULT_ENTRY_PATTERNS: &[&str] = &[
    "index.{ts,tsx,js,jsx}",
    "main.{ts,tsx,js,jsx}",
    "src/index.{ts,tsx,js,jsx}",
    "src/main.{ts,tsx,js,jsx}",
    "src/app.{ts,tsx,js,jsx}",
    "src/server.{ts,tsx,js,jsx}",
    "src/cli.{ts,tsx,js,jsx}",
    "bin/*.{ts,js}",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EntryPointConfig {
    /// File globs marking conventional entry points. Empty → defaults.
    /// `{a,b}` alternation is expanded before matching.
    pub patterns: Vec<String>,
    /// Read `main`/`module`/`bin`/`exports`/... fields. Default: true.
    pub use_package_metadata: Option<bool>,
    /// Treat files starting with `#!` as entry points. Default: true.
    pub detect_shebang: Option<bool>,
}

impl EntryPointConfig {
    pub fn effective_patterns(&self) -> Vec<String> {
        if self.patterns.is_empty() {
            DEFAULT_ENTRY_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            self.patterns.clone()
        }
    }

    pub fn effective_use_package_metadata(&self) -> bool {
        self.use_package_metadata.unwrap_or(true)
    }

    pub fn effective_detect_shebang(&self) -> bool {
        self.detect_shebang.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ComplexityConfig {
    /// Functions above this cyclomatic complexity are reported. Default: 10.
    pub threshold: Option<u32>,
}

impl ComplexityConfig {
    pub fn effective_threshold(&self) -> u32 {
        self.threshold.unwrap_or(DEFAULT_COMPLEXITY_THRESHOLD)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StructureConfig {
    /// Deepest directory level considered for layer assignment. Default: 3.
    pub max_depth: Option<usize>,
}

impl StructureConfig {
    pub fn effective_max_depth(&self) -> usize {
        self.max_depth.unwrap_or(3)
    }
}
