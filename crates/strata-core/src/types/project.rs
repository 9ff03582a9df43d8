//! Project-wide node/relation set handed to the analyzers.

use serde::{Deserialize, Serialize};

use super::ast::AstNode;
use super::package::{DeclaredDependency, PackageInfo};
use super::relation::Relation;
use crate::errors::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub root_path: String,
    #[serde(default)]
    pub name: Option<String>,
    pub ast: Vec<AstNode>,
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub package: Option<PackageInfo>,
    /// Project file paths, as enumerated by the file layer.
    #[serde(default)]
    pub files: Vec<String>,
}

impl ProjectInfo {
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            ..Default::default()
        }
    }

    /// Deserialize from JSON, reporting missing or non-array `ast`/`relations`
    /// and a missing root path as input errors rather than serde errors.
    pub fn from_json(json: &str) -> AnalysisResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let obj = value.as_object().ok_or_else(|| AnalysisError::InvalidInput {
            message: "project info must be a JSON object".to_string(),
        })?;

        match obj.get("rootPath").and_then(|v| v.as_str()) {
            Some(root) if !root.is_empty() => {}
            _ => return Err(AnalysisError::MissingRootPath),
        }
        for field in ["relations", "ast"] {
            if !obj.get(field).is_some_and(|v| v.is_array()) {
                return Err(AnalysisError::InvalidInput {
                    message: format!("`{field}` must be an array"),
                });
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Fail fast on a missing root path.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.root_path.trim().is_empty() {
            return Err(AnalysisError::MissingRootPath);
        }
        Ok(())
    }

    pub fn declared_dependencies(&self) -> Vec<DeclaredDependency> {
        self.package
            .as_ref()
            .map(PackageInfo::declared_dependencies)
            .unwrap_or_default()
    }
}
