//! Complexity metrics from parsed nodes.

use serde::{Deserialize, Serialize};
use strata_core::config::ComplexityConfig;
use strata_core::types::ast::{AstNode, NodeType};
use strata_core::FxHashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FileComplexity {
    pub file: String,
    pub function_count: usize,
    pub class_count: usize,
    pub interface_count: usize,
    pub total_complexity: u32,
    pub average_complexity: f64,
    pub max_complexity: u32,
    /// Deepest nesting of recognized nodes below the source file.
    pub max_nesting_depth: usize,
    pub average_parameters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionComplexity {
    pub id: String,
    pub name: String,
    pub file: String,
    pub line: u32,
    pub complexity: u32,
    pub parameter_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComplexitySummary {
    pub total_files: usize,
    pub total_functions: usize,
    pub average_complexity: f64,
    pub max_complexity: u32,
    pub complex_function_count: usize,
    pub threshold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    pub files: Vec<FileComplexity>,
    pub summary: ComplexitySummary,
    /// Callables above the threshold, most complex first.
    pub complex_functions: Vec<FunctionComplexity>,
}

pub struct ComplexityAnalyzer {
    threshold: u32,
}

impl ComplexityAnalyzer {
    pub fn new(config: &ComplexityConfig) -> Self {
        Self {
            threshold: config.effective_threshold(),
        }
    }

    pub fn analyze(&self, nodes: &[AstNode]) -> ComplexityReport {
        let mut files: Vec<FileComplexity> = Vec::new();
        let mut file_index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut depth: FxHashMap<&str, usize> = FxHashMap::default();
        let mut parameters: Vec<u64> = Vec::new();
        let mut complex = Vec::new();
        let mut all_complexity: u64 = 0;
        let mut function_total = 0usize;

        for node in nodes {
            let i = *file_index.entry(node.file_path.as_str()).or_insert_with(|| {
                files.push(FileComplexity {
                    file: node.file_path.clone(),
                    ..Default::default()
                });
                parameters.push(0);
                files.len() - 1
            });
            let file = &mut files[i];

            // Nodes arrive parent-first, so the parent's depth is known.
            let d = node
                .parent
                .as_deref()
                .and_then(|p| depth.get(p))
                .map_or(0, |pd| pd + 1);
            depth.insert(node.id.as_str(), d);
            file.max_nesting_depth = file.max_nesting_depth.max(d);

            match node.node_type {
                NodeType::Class => file.class_count += 1,
                NodeType::Interface => file.interface_count += 1,
                _ => {}
            }
            let Some(complexity) = node.properties.cyclomatic_complexity else {
                continue;
            };
            let params = node.properties.parameter_count.unwrap_or(0);
            file.function_count += 1;
            file.total_complexity += complexity;
            file.max_complexity = file.max_complexity.max(complexity);
            parameters[i] += u64::from(params);
            all_complexity += u64::from(complexity);
            function_total += 1;

            if complexity > self.threshold {
                complex.push(FunctionComplexity {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    file: node.file_path.clone(),
                    line: node.metadata.line,
                    complexity,
                    parameter_count: params,
                });
            }
        }

        for (file, params) in files.iter_mut().zip(&parameters) {
            if file.function_count > 0 {
                let n = file.function_count as f64;
                file.average_complexity = f64::from(file.total_complexity) / n;
                file.average_parameters = *params as f64 / n;
            }
        }
        complex.sort_by(|a, b| b.complexity.cmp(&a.complexity));

        let summary = ComplexitySummary {
            total_files: files.len(),
            total_functions: function_total,
            average_complexity: if function_total == 0 {
                0.0
            } else {
                all_complexity as f64 / function_total as f64
            },
            max_complexity: files.iter().map(|f| f.max_complexity).max().unwrap_or(0),
            complex_function_count: complex.len(),
            threshold: self.threshold,
        };
        tracing::debug!(
            files = summary.total_files,
            functions = summary.total_functions,
            complex = summary.complex_function_count,
            "complexity analyzed"
        );

        ComplexityReport {
            files,
            summary,
            complex_functions: complex,
        }
    }
}

impl Default for ComplexityAnalyzer {
    fn default() -> Self {
        Self::new(&ComplexityConfig::default())
    }
}
