//! `package.json`-shaped metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
    Production,
    Development,
    Peer,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredDependency {
    pub name: String,
    pub version: String,
    pub kind: DependencyKind,
}

impl DeclaredDependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub main: Option<String>,
    pub module: Option<String>,
    pub browser: Option<serde_json::Value>,
    pub types: Option<String>,
    pub typings: Option<String>,
    /// A single path or a command → path map.
    pub bin: Option<serde_json::Value>,
    /// A single path or an arbitrarily nested conditions map.
    pub exports: Option<serde_json::Value>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub peer_dependencies: BTreeMap<String, String>,
    pub optional_dependencies: BTreeMap<String, String>,
}

impl PackageInfo {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Every declared dependency: production, development, peer, then
    /// optional, each group in name order. A name declared in several groups
    /// appears once per group.
    pub fn declared_dependencies(&self) -> Vec<DeclaredDependency> {
        [
            (&self.dependencies, DependencyKind::Production),
            (&self.dev_dependencies, DependencyKind::Development),
            (&self.peer_dependencies, DependencyKind::Peer),
            (&self.optional_dependencies, DependencyKind::Optional),
        ]
        .into_iter()
        .flat_map(|(group, kind)| {
            group
                .iter()
                .map(move |(name, version)| DeclaredDependency::new(name, version, kind))
        })
        .collect()
    }
}
