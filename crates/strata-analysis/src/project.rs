//! Multi-file aggregation: per-file parser results into one [`ProjectInfo`],
//! plus import relations between source files and packages.

use rayon::prelude::*;
use strata_core::errors::{AnalysisResult, ParseError};
use strata_core::types::ast::{AstNode, NodeType, ParserResult};
use strata_core::types::file::FileInfo;
use strata_core::types::package::PackageInfo;
use strata_core::types::project::ProjectInfo;
use strata_core::types::relation::{
    external_endpoint, ImportMetadata, Relation, RelationMetadata, RelationType,
};
use strata_core::FxHashMap;

use crate::parsers::EnhancedParser;
use crate::paths::{self, compile_patterns, matches_any};

/// Extensions tried, in order, for an extensionless relative import.
const RESOLUTION_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// A file that could not be parsed. The rest of the project is unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    pub path: String,
    pub error: ParseError,
}

#[derive(Debug, Clone)]
pub struct ProjectParse {
    pub project: ProjectInfo,
    pub failures: Vec<ParseFailure>,
}

/// In-memory source handed over by the file layer.
#[derive(Debug, Clone)]
pub struct SourceInput {
    pub file: FileInfo,
    pub content: String,
}

impl SourceInput {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            file: FileInfo::from_content(path, &content),
            content,
        }
    }
}

pub struct ProjectAggregator {
    parser: EnhancedParser,
}

impl ProjectAggregator {
    pub fn new(parser: EnhancedParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &EnhancedParser {
        &self.parser
    }

    /// Parse every selected file in parallel and aggregate the results.
    ///
    /// Files are selected by the parser's include/exclude globs, matched
    /// against the path relative to `root_path`.
    pub fn parse_project(
        &self,
        root_path: &str,
        sources: &[SourceInput],
    ) -> AnalysisResult<ProjectParse> {
        let config = self.parser.config();
        let include = compile_patterns(&config.include)?;
        let exclude = compile_patterns(&config.exclude)?;

        let selected: Vec<&SourceInput> = sources
            .iter()
            .filter(|s| {
                let relative = paths::relative_to(root_path, &s.file.path);
                (include.is_empty() || matches_any(&include, &relative))
                    && !matches_any(&exclude, &relative)
            })
            .collect();

        let outcomes: Vec<Result<ParserResult, ParseFailure>> = selected
            .par_iter()
            .map(|s| {
                self.parser.parse(&s.file, &s.content).map_err(|error| ParseFailure {
                    path: s.file.path.clone(),
                    error,
                })
            })
            .collect();

        let mut results = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(failure) => {
                    tracing::warn!(file = %failure.path, error = %failure.error, "file skipped");
                    failures.push(failure);
                }
            }
        }

        tracing::debug!(
            selected = selected.len(),
            skipped = sources.len() - selected.len(),
            failed = failures.len(),
            "project parsed"
        );
        Ok(ProjectParse {
            project: aggregate(root_path, results),
            failures,
        })
    }
}

impl Default for ProjectAggregator {
    fn default() -> Self {
        Self::new(EnhancedParser::new())
    }
}

/// Concatenate per-file results and add cross-file import relations.
pub fn aggregate(root_path: &str, results: Vec<ParserResult>) -> ProjectInfo {
    let mut project = ProjectInfo::new(root_path);
    for result in results {
        project.files.push(result.metadata.file);
        project.ast.extend(result.nodes);
        project.relations.extend(result.relations);
    }
    let imports = derive_import_relations(&project.ast);
    project.relations.extend(imports);
    project
}

/// Attach package metadata (e.g. a parsed `package.json`).
pub fn with_package(mut project: ProjectInfo, package: PackageInfo) -> ProjectInfo {
    project.name = package.name.clone();
    project.package = Some(package);
    project
}

/// One relation per import, dynamic import, or re-export node.
///
/// `from` is the importing file's source-file node; `to` is an
/// `external:<package>` endpoint, the target file's source-file node, or the
/// normalized path when the target is not part of the node set.
pub fn derive_import_relations(nodes: &[AstNode]) -> Vec<Relation> {
    let roots: FxHashMap<&str, &str> = nodes
        .iter()
        .filter(|n| n.node_type == NodeType::SourceFile)
        .map(|n| (n.file_path.as_str(), n.id.as_str()))
        .collect();

    let mut relations = Vec::new();
    for node in nodes {
        let Some(clause) = node.properties.import.as_ref() else {
            continue;
        };
        let specifier = clause.module_specifier.as_str();
        if specifier.is_empty() || specifier.contains("${") {
            continue;
        }
        let Some(from) = roots.get(node.file_path.as_str()) else {
            continue;
        };

        let to = match paths::package_name(specifier) {
            Some(package) => external_endpoint(&package),
            None => resolve_module(&node.file_path, specifier, &roots),
        };
        let relation_type = if clause.is_re_export {
            RelationType::Exports
        } else {
            RelationType::Imports
        };
        let metadata = RelationMetadata::Import(ImportMetadata {
            module_path: Some(specifier.to_string()),
            imported_names: clause.imported_names.clone(),
            is_type_only: clause.is_type_only,
            is_namespace: clause.is_namespace,
            is_dynamic: clause.is_dynamic,
            is_barrel_export: clause.is_re_export,
            condition: clause.condition.clone(),
        });
        relations.push(Relation::new(relation_type, *from, to, metadata));
    }
    relations
}

/// Heuristic resolution of a relative specifier against known files.
fn resolve_module(importer: &str, specifier: &str, roots: &FxHashMap<&str, &str>) -> String {
    let target = paths::join(paths::parent_dir(importer), specifier);

    let mut candidates = vec![target.clone()];
    // ESM-style `./x.js` written against `x.ts` sources.
    if let Some(stem) = target.strip_suffix(".js") {
        candidates.extend([format!("{stem}.ts"), format!("{stem}.tsx")]);
    }
    candidates.extend(RESOLUTION_EXTENSIONS.iter().map(|ext| format!("{target}{ext}")));
    candidates.extend(RESOLUTION_EXTENSIONS.iter().map(|ext| format!("{target}/index{ext}")));

    candidates
        .iter()
        .find_map(|candidate| roots.get(candidate.as_str()))
        .map(|id| id.to_string())
        .unwrap_or(target)
}
