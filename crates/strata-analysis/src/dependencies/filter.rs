//! Relation hygiene and include/exclude filtering.

use glob::Pattern;
use strata_core::config::DependencyConfig;
use strata_core::errors::AnalysisResult;
use strata_core::types::ast::AstNode;
use strata_core::types::relation::Relation;
use strata_core::FxHashMap;

use crate::paths::{self, compile_patterns, matches_any};

/// Node id → file path. Endpoints that are not node ids resolve to themselves.
pub struct NodeFileIndex<'a> {
    files: FxHashMap<&'a str, &'a str>,
}

impl<'a> NodeFileIndex<'a> {
    pub fn new(nodes: &'a [AstNode]) -> Self {
        Self {
            files: nodes
                .iter()
                .map(|n| (n.id.as_str(), n.file_path.as_str()))
                .collect(),
        }
    }

    pub fn resolve<'e>(&self, endpoint: &'e str) -> &'e str
    where
        'a: 'e,
    {
        self.files.get(endpoint).copied().unwrap_or(endpoint)
    }
}

/// Drop relations with an empty endpoint.
pub fn well_formed(relations: &[Relation]) -> Vec<&Relation> {
    relations
        .iter()
        .filter(|r| {
            let ok = r.is_well_formed();
            if !ok {
                tracing::trace!(id = %r.id, "dropping malformed relation");
            }
            ok
        })
        .collect()
}

pub struct RelationFilter {
    root: String,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl RelationFilter {
    pub fn new(root: &str, config: &DependencyConfig) -> AnalysisResult<Self> {
        Ok(Self {
            root: root.to_string(),
            include: compile_patterns(&config.include_patterns)?,
            exclude: compile_patterns(&config.exclude_patterns)?,
        })
    }

    pub fn is_noop(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    fn path_matches(&self, patterns: &[Pattern], path: &str) -> bool {
        matches_any(patterns, path) || matches_any(patterns, &paths::relative_to(&self.root, path))
    }

    /// External relations always pass; others need an include match on
    /// either endpoint (when includes exist) and no exclude match on either.
    pub fn passes(&self, relation: &Relation, index: &NodeFileIndex<'_>) -> bool {
        if relation.is_external() || self.is_noop() {
            return true;
        }
        let endpoints = [index.resolve(&relation.from), index.resolve(&relation.to)];
        let included = self.include.is_empty()
            || endpoints.iter().any(|p| self.path_matches(&self.include, p));
        let excluded = endpoints.iter().any(|p| self.path_matches(&self.exclude, p));
        included && !excluded
    }

    pub fn apply<'r>(
        &self,
        relations: Vec<&'r Relation>,
        index: &NodeFileIndex<'_>,
    ) -> Vec<&'r Relation> {
        let before = relations.len();
        let kept: Vec<&Relation> = relations
            .into_iter()
            .filter(|r| self.passes(r, index))
            .collect();
        tracing::trace!(before, after = kept.len(), "relations filtered");
        kept
    }
}
