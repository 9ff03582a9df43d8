//! Entry-point discovery from package metadata, file-name conventions, and
//! shebang markers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strata_core::config::EntryPointConfig;
use strata_core::errors::AnalysisResult;
use strata_core::types::ast::{AstNode, NodeType};
use strata_core::types::package::PackageInfo;
use strata_core::FxHashSet;

use crate::paths::{self, compile_patterns, expand_braces, matches_any};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryPointSource {
    PackageField,
    Pattern,
    Shebang,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    /// Normalized, relative to the project root.
    pub path: String,
    pub source: EntryPointSource,
    /// Package field that declared it, e.g. `main`, `bin.cli`, `exports..import`.
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntryPointAnalysis {
    pub entry_points: Vec<EntryPoint>,
}

impl EntryPointAnalysis {
    pub fn contains(&self, path: &str) -> bool {
        self.entry_points.iter().any(|e| e.path == path)
    }
}

pub struct EntryPointAnalyzer {
    config: EntryPointConfig,
}

impl EntryPointAnalyzer {
    pub fn new(config: EntryPointConfig) -> Self {
        Self { config }
    }

    /// Package fields first, then patterns, then shebang files; the first
    /// source to name a path wins.
    pub fn analyze(
        &self,
        root: &str,
        package: Option<&PackageInfo>,
        files: &[String],
        nodes: &[AstNode],
    ) -> AnalysisResult<EntryPointAnalysis> {
        let mut found = Collector::default();

        if self.config.effective_use_package_metadata() {
            if let Some(package) = package {
                for (field, path) in package_entries(package) {
                    found.add(&path, EntryPointSource::PackageField, Some(field));
                }
            }
        }

        let expanded: Vec<String> = self
            .config
            .effective_patterns()
            .iter()
            .flat_map(|p| expand_braces(p))
            .collect();
        let patterns = compile_patterns(&expanded)?;
        for pattern in &patterns {
            for file in files {
                let relative = paths::relative_to(root, file);
                if matches_any(std::slice::from_ref(pattern), &relative) {
                    found.add(&relative, EntryPointSource::Pattern, None);
                }
            }
        }

        if self.config.effective_detect_shebang() {
            for node in nodes
                .iter()
                .filter(|n| n.node_type == NodeType::SourceFile && n.properties.has_shebang)
            {
                let path = paths::relative_to(root, &node.file_path);
                found.add(&path, EntryPointSource::Shebang, None);
            }
        }

        tracing::debug!(root, entry_points = found.entries.len(), "entry points discovered");
        Ok(EntryPointAnalysis {
            entry_points: found.entries,
        })
    }
}

impl Default for EntryPointAnalyzer {
    fn default() -> Self {
        Self::new(EntryPointConfig::default())
    }
}

#[derive(Default)]
struct Collector {
    seen: FxHashSet<String>,
    entries: Vec<EntryPoint>,
}

impl Collector {
    fn add(&mut self, path: &str, source: EntryPointSource, field: Option<String>) {
        let path = paths::normalize(path);
        if path.is_empty() || !self.seen.insert(path.clone()) {
            return;
        }
        self.entries.push(EntryPoint { path, source, field });
    }
}

/// `(field, path)` pairs declared by package metadata, in field order.
pub fn package_entries(package: &PackageInfo) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    let simple = [
        ("main", &package.main),
        ("module", &package.module),
        ("types", &package.types),
        ("typings", &package.typings),
    ];
    for (field, value) in simple {
        if let Some(path) = value {
            entries.push((field.to_string(), path.clone()));
        }
    }
    // An object-valued `browser` is a replacement map, not an entry.
    if let Some(Value::String(path)) = &package.browser {
        entries.push(("browser".to_string(), path.clone()));
    }
    match &package.bin {
        Some(Value::String(path)) => entries.push(("bin".to_string(), path.clone())),
        Some(Value::Object(commands)) => {
            for (command, path) in commands {
                if let Value::String(path) = path {
                    entries.push((format!("bin.{command}"), path.clone()));
                }
            }
        }
        _ => {}
    }
    if let Some(exports) = &package.exports {
        collect_exports("exports", exports, &mut entries);
    }
    entries
}

fn collect_exports(field: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::String(path) => out.push((field.to_string(), path.clone())),
        Value::Object(map) => {
            for (key, nested) in map {
                collect_exports(&format!("{field}.{key}"), nested, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_exports(field, item, out);
            }
        }
        _ => {}
    }
}
