//! Directed, typed edges between node ids (or a node id and an external package).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::EXTERNAL_PREFIX;

/// Edge kind. Names outside the known set (or a missing `type`) load as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    References,
    Inherits,
    Implements,
    Imports,
    Exports,
    #[default]
    Other,
}

impl RelationType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::References => "references",
            Self::Inherits => "inherits",
            Self::Implements => "implements",
            Self::Imports => "imports",
            Self::Exports => "exports",
            Self::Other => "other",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "references" => Self::References,
            "inherits" => Self::Inherits,
            "implements" => Self::Implements,
            "imports" => Self::Imports,
            "exports" => Self::Exports,
            _ => Self::Other,
        }
    }
}

impl<'de> Deserialize<'de> for RelationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(name) => Self::from_name(&name),
            _ => Self::Other,
        })
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields written by import, dynamic-import, and re-export relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportMetadata {
    pub module_path: Option<String>,
    pub imported_names: Vec<String>,
    pub is_type_only: bool,
    pub is_namespace: bool,
    pub is_dynamic: bool,
    pub is_barrel_export: bool,
    pub condition: Option<String>,
}

/// Keys that mark an untagged metadata object as import metadata.
const IMPORT_KEYS: &[&str] = &[
    "modulePath",
    "importedNames",
    "isTypeOnly",
    "isNamespace",
    "isDynamic",
    "isBarrelExport",
    "condition",
];

/// Per-producer metadata, written with a `relationship` tag.
///
/// Input may omit the tag: an object carrying any import key loads as
/// `Import`, anything else (including `{}` and unknown tags) as `Unspecified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "relationship", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RelationMetadata {
    ParentChild,
    Inheritance { base_type: String },
    Implementation { interface: String },
    Import(ImportMetadata),
    #[default]
    Unspecified,
}

#[derive(Deserialize)]
#[serde(tag = "relationship", rename_all = "kebab-case", rename_all_fields = "camelCase")]
enum TaggedMetadata {
    ParentChild,
    Inheritance { base_type: String },
    Implementation { interface: String },
    Import(ImportMetadata),
}

impl From<TaggedMetadata> for RelationMetadata {
    fn from(tagged: TaggedMetadata) -> Self {
        match tagged {
            TaggedMetadata::ParentChild => Self::ParentChild,
            TaggedMetadata::Inheritance { base_type } => Self::Inheritance { base_type },
            TaggedMetadata::Implementation { interface } => Self::Implementation { interface },
            TaggedMetadata::Import(meta) => Self::Import(meta),
        }
    }
}

impl RelationMetadata {
    fn from_value(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::Unspecified;
        };
        let parsed = if map.contains_key("relationship") {
            serde_json::from_value::<TaggedMetadata>(Value::Object(map)).map(Self::from)
        } else if IMPORT_KEYS.iter().any(|key| map.contains_key(*key)) {
            serde_json::from_value(Value::Object(map)).map(Self::Import)
        } else {
            return Self::Unspecified;
        };
        parsed.unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for RelationMetadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Non-string endpoints load as empty and are dropped as malformed.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub relation_type: RelationType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub from: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub to: String,
    #[serde(default)]
    pub metadata: RelationMetadata,
}

impl Relation {
    /// Create a relation with an id derived from its type and endpoints.
    pub fn new(
        relation_type: RelationType,
        from: impl Into<String>,
        to: impl Into<String>,
        metadata: RelationMetadata,
    ) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            id: format!("{}:{}->{}", relation_type.name(), from, to),
            relation_type,
            from,
            to,
            metadata,
        }
    }

    /// Both endpoints present.
    pub fn is_well_formed(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }

    pub fn is_external(&self) -> bool {
        self.to.starts_with(EXTERNAL_PREFIX)
    }

    /// Package name of an `external:` target.
    pub fn external_package(&self) -> Option<&str> {
        self.to.strip_prefix(EXTERNAL_PREFIX)
    }

    pub fn import_metadata(&self) -> Option<&ImportMetadata> {
        match &self.metadata {
            RelationMetadata::Import(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn is_type_only(&self) -> bool {
        self.import_metadata().is_some_and(|m| m.is_type_only)
    }
}

/// Build an `external:` endpoint for a package name.
pub fn external_endpoint(package: &str) -> String {
    format!("{EXTERNAL_PREFIX}{package}")
}
