//! Normalized AST nodes and the per-file parser output.

use serde::{Deserialize, Serialize};

use super::jsdoc::JSDocInfo;
use super::relation::{Relation, RelationType};
use super::type_info::{DegradedReason, TypeInfo};

/// Normalized category of a recognized syntax construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    SourceFile,
    Class,
    Interface,
    Function,
    Method,
    Property,
    Variable,
    TypeAlias,
    Enum,
    Namespace,
    Import,
    Export,
    Constructor,
    Accessor,
    Parameter,
    TypeParameter,
    Decorator,
}

impl NodeType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SourceFile => "sourceFile",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Function => "function",
            Self::Method => "method",
            Self::Property => "property",
            Self::Variable => "variable",
            Self::TypeAlias => "typeAlias",
            Self::Enum => "enum",
            Self::Namespace => "namespace",
            Self::Import => "import",
            Self::Export => "export",
            Self::Constructor => "constructor",
            Self::Accessor => "accessor",
            Self::Parameter => "parameter",
            Self::TypeParameter => "typeParameter",
            Self::Decorator => "decorator",
        }
    }

    /// Callable constructs that carry a cyclomatic complexity.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Constructor | Self::Accessor)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Position and raw syntax observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    /// 1-based.
    pub line: u32,
    /// 0-based, in bytes.
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub raw_kind: String,
    pub flags: Vec<String>,
    /// Enrichment steps that fell back to empty/basic values for this node.
    pub degraded: Vec<DegradedReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessorKind {
    Get,
    Set,
}

/// Module specifier and bindings of an import, dynamic `import()`, or re-export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportClause {
    pub module_specifier: String,
    pub imported_names: Vec<String>,
    pub default_import: Option<String>,
    pub namespace_import: Option<String>,
    pub is_type_only: bool,
    pub is_namespace: bool,
    pub is_dynamic: bool,
    /// `export ... from '...'`.
    pub is_re_export: bool,
    /// Source text of the enclosing `if` condition, for conditional dynamic imports.
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperties {
    pub is_async: bool,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_exported: bool,
    pub is_default: bool,
    pub is_generator: bool,
    pub is_optional: bool,
    pub is_readonly: bool,
    pub is_declare: bool,
    pub has_shebang: bool,
    pub has_syntax_errors: bool,
    pub accessor: Option<AccessorKind>,
    pub parameter_count: Option<u32>,
    pub cyclomatic_complexity: Option<u32>,
    pub import: Option<ImportClause>,
}

/// Name-only decorator descriptor. Arguments are never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DecoratorInfo {
    pub name: String,
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstNode {
    /// `filePath:start:end`, suffixed with `:rawKind` only when two nodes share a span.
    pub id: String,
    pub name: String,
    /// Raw tree-sitter kind label.
    pub kind: String,
    pub node_type: NodeType,
    pub file_path: String,
    pub start: usize,
    pub end: usize,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub metadata: NodeMetadata,
    pub properties: NodeProperties,
    pub modifiers: Vec<String>,
    pub decorators: Vec<DecoratorInfo>,
    pub type_info: TypeInfo,
    pub jsdoc: Option<JSDocInfo>,
}

impl AstNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseMetadata {
    pub file: String,
    pub parsing_time_ms: f64,
    pub node_count: usize,
    pub relation_count: usize,
    pub parser_version: String,
}

/// Everything derivable from one file in isolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserResult {
    pub nodes: Vec<AstNode>,
    pub relations: Vec<Relation>,
    pub metadata: ParseMetadata,
}

impl ParserResult {
    /// The source-file node. Always the first node of a successful parse.
    pub fn root(&self) -> Option<&AstNode> {
        self.nodes.first().filter(|n| n.node_type == NodeType::SourceFile)
    }

    pub fn node(&self, id: &str) -> Option<&AstNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&AstNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &AstNode> {
        self.nodes.iter().filter(move |n| n.node_type == node_type)
    }

    pub fn relations_of_type(
        &self,
        relation_type: RelationType,
    ) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |r| r.relation_type == relation_type)
    }
}
