//! Directory statistics and architecture classification from file paths.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use strata_core::config::StructureConfig;

use crate::paths;

/// Best score needed before a pattern is reported instead of `Flat`.
const PATTERN_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArchitecturePattern {
    Mvc,
    Layered,
    CleanHexagonal,
    FeatureBased,
    Monorepo,
    Flat,
}

impl ArchitecturePattern {
    /// Directory names whose presence indicates the pattern.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            Self::Mvc => &["models", "views", "controllers"],
            Self::Layered => &["presentation", "business", "data", "services", "repositories"],
            Self::CleanHexagonal => {
                &["domain", "application", "infrastructure", "adapters", "ports"]
            }
            Self::FeatureBased => &["features", "modules"],
            Self::Monorepo => &["packages", "apps", "libs"],
            Self::Flat => &[],
        }
    }

    fn candidates() -> [Self; 5] {
        [
            Self::Mvc,
            Self::Layered,
            Self::CleanHexagonal,
            Self::FeatureBased,
            Self::Monorepo,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub total_directories: usize,
    pub max_depth: usize,
    /// Files directly in the root.
    pub root_files: usize,
    pub files_per_top_level: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternScore {
    pub pattern: ArchitecturePattern,
    /// Fraction of marker directories present.
    pub score: f64,
    pub matched: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerAssignment {
    pub directory: String,
    pub layer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    pub directories: DirectoryStats,
    pub pattern: ArchitecturePattern,
    pub confidence: f64,
    pub scores: Vec<PatternScore>,
    pub layers: Vec<LayerAssignment>,
}

/// Layer label for a conventional directory name.
pub fn layer_for(name: &str) -> Option<&'static str> {
    let layer = match name {
        "models" | "model" | "entities" | "domain" => "domain",
        "views" | "view" | "components" | "pages" | "ui" | "presentation" => "presentation",
        "controllers" | "controller" | "routes" | "handlers" | "api" => "controller",
        "services" | "service" | "business" | "application" | "usecases" | "use-cases" => {
            "application"
        }
        "repositories" | "repository" | "data" | "db" | "database" | "infrastructure"
        | "adapters" => "infrastructure",
        "utils" | "util" | "lib" | "helpers" | "common" | "shared" => "shared",
        "tests" | "test" | "__tests__" | "spec" => "test",
        _ => return None,
    };
    Some(layer)
}

pub struct StructureAnalyzer {
    max_depth: usize,
}

impl StructureAnalyzer {
    pub fn new(config: &StructureConfig) -> Self {
        Self {
            max_depth: config.effective_max_depth(),
        }
    }

    pub fn analyze(&self, root: &str, files: &[String]) -> StructureAnalysis {
        let mut directories: BTreeSet<String> = BTreeSet::new();
        let mut stats = DirectoryStats::default();

        for file in files {
            let relative = paths::relative_to(root, file);
            let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
            let Some((_, dirs)) = segments.split_last() else {
                continue;
            };
            match dirs.first() {
                Some(top) => *stats.files_per_top_level.entry(top.to_string()).or_default() += 1,
                None => stats.root_files += 1,
            }
            stats.max_depth = stats.max_depth.max(dirs.len());
            for depth in 1..=dirs.len() {
                directories.insert(dirs[..depth].join("/"));
            }
        }
        stats.total_directories = directories.len();

        // Names of every directory within the depth limit, lowercased.
        let names: BTreeSet<String> = directories
            .iter()
            .filter(|d| d.split('/').count() <= self.max_depth)
            .filter_map(|d| d.rsplit('/').next())
            .map(str::to_lowercase)
            .collect();

        let scores: Vec<PatternScore> = ArchitecturePattern::candidates()
            .into_iter()
            .map(|pattern| score(pattern, &names, &directories))
            .collect();

        let best = scores
            .iter()
            .fold(None::<&PatternScore>, |best, s| match best {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            });
        let (pattern, confidence) = match best {
            Some(b) if b.score >= PATTERN_THRESHOLD => (b.pattern, b.score),
            Some(b) => (ArchitecturePattern::Flat, 1.0 - b.score),
            None => (ArchitecturePattern::Flat, 1.0),
        };

        let layers = directories
            .iter()
            .filter(|d| d.split('/').count() <= self.max_depth)
            .filter_map(|d| {
                d.rsplit('/')
                    .find_map(|segment| layer_for(&segment.to_lowercase()))
                    .map(|layer| LayerAssignment {
                        directory: d.clone(),
                        layer: layer.to_string(),
                    })
            })
            .collect();

        tracing::debug!(
            root,
            ?pattern,
            confidence,
            directories = stats.total_directories,
            "structure analyzed"
        );
        StructureAnalysis {
            directories: stats,
            pattern,
            confidence,
            scores,
            layers,
        }
    }
}

impl Default for StructureAnalyzer {
    fn default() -> Self {
        Self::new(&StructureConfig::default())
    }
}

fn score(
    pattern: ArchitecturePattern,
    names: &BTreeSet<String>,
    directories: &BTreeSet<String>,
) -> PatternScore {
    let markers = pattern.markers();
    let matched: Vec<String> = markers
        .iter()
        .filter(|m| names.contains(**m))
        .map(|m| m.to_string())
        .collect();

    let score = match pattern {
        // One feature root with at least two features is enough.
        ArchitecturePattern::FeatureBased => {
            let has_features = matched.iter().any(|root| {
                directories
                    .iter()
                    .filter(|d| {
                        let mut parts = d.rsplit('/');
                        let _leaf = parts.next();
                        parts.next().is_some_and(|parent| parent.eq_ignore_ascii_case(root))
                    })
                    .count()
                    >= 2
            });
            if has_features { 1.0 } else { 0.0 }
        }
        _ if markers.is_empty() => 0.0,
        _ => matched.len() as f64 / markers.len() as f64,
    };
    PatternScore {
        pattern,
        score,
        matched,
    }
}
