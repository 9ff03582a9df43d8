//! Best-effort type information attached to every AST node.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Coarse classification of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Union,
    Intersection,
    Conditional,
    Object,
    Primitive,
    #[default]
    Unknown,
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Conditional => "conditional",
            Self::Object => "object",
            Self::Primitive => "primitive",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterInfo {
    pub name: String,
    pub constraint: Option<String>,
    pub default: Option<String>,
    /// Reserved for `in`/`out` variance annotations; never populated today.
    pub variance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTypeInfo {
    pub name: String,
    pub type_name: String,
    pub is_optional: bool,
    pub is_readonly: bool,
    pub is_static: bool,
    pub visibility: Visibility,
    pub default_value: Option<String>,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParameterTypeInfo {
    pub name: String,
    pub type_name: String,
    pub is_optional: bool,
    pub is_rest: bool,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MethodTypeInfo {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<ParameterTypeInfo>,
    pub is_async: bool,
    pub is_generator: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub visibility: Visibility,
    pub documentation: Option<String>,
}

/// Why an enrichment step fell back to its basic form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DegradedReason {
    #[error("source text of `{kind}` is not valid UTF-8")]
    InvalidUtf8 { kind: String },

    #[error("`{kind}` has no {field} child")]
    MissingChild { kind: String, field: String },

    #[error("no type context for `{kind}`")]
    MissingTypeContext { kind: String },

    #[error("malformed documentation comment: {message}")]
    MalformedComment { message: String },
}

/// Raw type-system observations, kept for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetadata {
    pub flags: Vec<String>,
    pub degraded: Option<DegradedReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
    pub type_parameters: Vec<TypeParameterInfo>,
    pub properties: Vec<PropertyTypeInfo>,
    pub methods: Vec<MethodTypeInfo>,
    pub base_types: SmallVec<[String; 2]>,
    pub implemented_interfaces: SmallVec<[String; 2]>,
    pub is_optional: bool,
    pub is_readonly: bool,
    pub default_value: Option<String>,
    pub metadata: TypeMetadata,
}

impl TypeInfo {
    /// Name and kind only, every collection empty.
    pub fn basic(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    /// The basic form, recording why the enhanced extraction did not apply.
    pub fn degraded(name: impl Into<String>, kind: TypeKind, reason: DegradedReason) -> Self {
        let mut info = Self::basic(name, kind);
        info.metadata.degraded = Some(reason);
        info
    }

    pub fn is_degraded(&self) -> bool {
        self.metadata.degraded.is_some()
    }
}
