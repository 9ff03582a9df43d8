//! Structured documentation comment content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JSDocParam {
    pub name: String,
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub is_optional: bool,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JSDocInfo {
    /// First sentence of the description.
    pub summary: Option<String>,
    pub description: Option<String>,
    pub params: Vec<JSDocParam>,
    pub returns: Option<String>,
    pub examples: Vec<String>,
    /// Tags without a dedicated field, tag name (without `@`) → text.
    pub tags: BTreeMap<String, String>,
    pub see: Vec<String>,
    pub deprecated: bool,
    pub since: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
}

impl JSDocInfo {
    /// No description text and no tags of any kind.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.params.is_empty()
            && self.returns.is_none()
            && self.examples.is_empty()
            && self.tags.is_empty()
            && self.see.is_empty()
            && !self.deprecated
            && self.since.is_none()
            && self.author.is_none()
            && self.version.is_none()
    }
}
