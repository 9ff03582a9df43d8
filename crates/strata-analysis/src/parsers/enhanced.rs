//! EnhancedParser: one file in, normalized nodes and relations out.
//!
//! The traversal is iterative (explicit stack, children pushed in reverse)
//! so deeply nested sources cannot overflow the call stack. Recognized
//! nodes are linked to their nearest recognized ancestor; unrecognized
//! syntax is transparent.

use std::path::Path;
use std::time::Instant;

use strata_core::config::{ParsingConfig, TraversalMode};
use strata_core::constants::PARSER_VERSION;
use strata_core::errors::ParseError;
use strata_core::types::ast::{AstNode, NodeMetadata, NodeType, ParseMetadata, ParserResult};
use strata_core::types::file::{FileInfo, SourceExtension};
use strata_core::types::relation::{Relation, RelationMetadata, RelationType};
use strata_core::types::type_info::{DegradedReason, TypeInfo, TypeKind};
use strata_core::FxHashSet;
use tree_sitter::Node;

use super::cache::ParseCache;
use super::context::ParseContext;
use super::extract::{
    extract_decorators, extract_modifiers, extract_name, extract_properties, recognize,
};
use super::jsdoc::extract_jsdoc;
use super::syntax::named_children;
use super::type_extract::extract_type_info;

/// Thread-safe: holds configuration and an optional cache, never per-file state.
pub struct EnhancedParser {
    config: ParsingConfig,
    cache: Option<ParseCache>,
}

impl EnhancedParser {
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        let cache = config
            .cache
            .effective_enabled()
            .then(|| ParseCache::new(config.cache.effective_capacity()));
        Self { config, cache }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&ParseCache> {
        self.cache.as_ref()
    }

    /// Parse in-memory content, deriving the file descriptor from the path.
    pub fn parse_source(&self, path: &str, content: &str) -> Result<ParserResult, ParseError> {
        self.parse(&FileInfo::from_content(path, content), content)
    }

    pub fn parse(&self, file: &FileInfo, content: &str) -> Result<ParserResult, ParseError> {
        let path = file.path.as_str();
        if path.trim().is_empty() {
            return Err(ParseError::EmptyPath);
        }
        let extension = source_extension(file)?;

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(path, content) {
                tracing::trace!(file = path, "parse cache hit");
                return Ok(hit);
            }
        }

        let started = Instant::now();
        let ctx = ParseContext::build(path, content, extension)?;
        let file_name = if file.name.is_empty() {
            Path::new(path)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(path)
                .to_string()
        } else {
            file.name.clone()
        };

        let nodes = self.collect_nodes(&ctx, &file_name);
        let relations = derive_relations(&nodes);
        let parsing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        tracing::debug!(
            file = path,
            nodes = nodes.len(),
            relations = relations.len(),
            declarations = ctx.types.declaration_count(),
            elapsed_ms = parsing_time_ms,
            "parsed file"
        );

        let result = ParserResult {
            metadata: ParseMetadata {
                file: path.to_string(),
                parsing_time_ms,
                node_count: nodes.len(),
                relation_count: relations.len(),
                parser_version: PARSER_VERSION.to_string(),
            },
            nodes,
            relations,
        };

        if let Some(cache) = &self.cache {
            cache.insert(path, content, result.clone());
        }
        Ok(result)
    }

    fn collect_nodes(&self, ctx: &ParseContext<'_>, file_name: &str) -> Vec<AstNode> {
        let src = ctx.bytes();
        let top_level_only = self.config.effective_traversal_mode() == TraversalMode::TopLevel;
        let mut nodes: Vec<AstNode> = Vec::new();
        let mut ids: FxHashSet<String> = FxHashSet::default();

        // (syntax node, index of nearest recognized ancestor, syntactic parent kind)
        let mut stack: Vec<(Node, Option<usize>, Option<&'static str>)> =
            vec![(ctx.tree.root_node(), None, None)];

        while let Some((node, ancestor, parent_kind)) = stack.pop() {
            let mut next_ancestor = ancestor;
            if let Some(node_type) = recognize(node, parent_kind, src) {
                let parent_id = ancestor.map(|i| nodes[i].id.clone());
                let ast = self.build_node(node, node_type, parent_id, ctx, file_name, &mut ids);
                if let Some(i) = ancestor {
                    nodes[i].children.push(ast.id.clone());
                }
                next_ancestor = Some(nodes.len());
                nodes.push(ast);

                let descends = matches!(node_type, NodeType::SourceFile | NodeType::Export);
                if top_level_only && !descends {
                    continue;
                }
            }

            let kind = node.kind();
            let kids: Vec<Node> = named_children(node).collect();
            for child in kids.into_iter().rev() {
                stack.push((child, next_ancestor, Some(kind)));
            }
        }
        nodes
    }

    fn build_node(
        &self,
        node: Node,
        node_type: NodeType,
        parent: Option<String>,
        ctx: &ParseContext<'_>,
        file_name: &str,
        ids: &mut FxHashSet<String>,
    ) -> AstNode {
        let src = ctx.bytes();
        let name = extract_name(node, node_type, file_name, src);
        let id = unique_id(ctx.path, node, ids);
        let mut degraded: Vec<DegradedReason> = Vec::new();

        let type_info = if self.config.effective_extract_types() {
            extract_type_info(node, node_type, &name, ctx).unwrap_or_else(|reason| {
                tracing::warn!(node = %id, %reason, "type extraction degraded");
                degraded.push(reason.clone());
                TypeInfo::degraded(&name, TypeKind::Unknown, reason)
            })
        } else {
            TypeInfo::basic(&name, TypeKind::Unknown)
        };

        let modifiers = extract_modifiers(node, src).unwrap_or_else(|reason| {
            tracing::warn!(node = %id, %reason, "modifier extraction degraded");
            degraded.push(reason);
            Vec::new()
        });

        let decorators = extract_decorators(node, src).unwrap_or_else(|reason| {
            tracing::warn!(node = %id, %reason, "decorator extraction degraded");
            degraded.push(reason);
            Vec::new()
        });

        let jsdoc = if self.config.effective_extract_documentation() {
            extract_jsdoc(node, src).unwrap_or_else(|reason| {
                tracing::warn!(node = %id, %reason, "documentation extraction degraded");
                degraded.push(reason);
                None
            })
        } else {
            None
        };

        let properties = extract_properties(node, node_type, &modifiers, src);
        let start = node.start_position();
        let end = node.end_position();

        AstNode {
            id,
            name,
            kind: node.kind().to_string(),
            node_type,
            file_path: ctx.path.to_string(),
            start: node.start_byte(),
            end: node.end_byte(),
            parent,
            children: Vec::new(),
            metadata: NodeMetadata {
                line: start.row as u32 + 1,
                column: start.column as u32,
                end_line: end.row as u32 + 1,
                end_column: end.column as u32,
                raw_kind: node.kind().to_string(),
                flags: syntax_flags(node),
                degraded,
            },
            properties,
            modifiers,
            decorators,
            type_info,
            jsdoc,
        }
    }
}

impl Default for EnhancedParser {
    fn default() -> Self {
        Self::new()
    }
}

fn source_extension(file: &FileInfo) -> Result<SourceExtension, ParseError> {
    let extension = if file.extension.is_empty() {
        Path::new(&file.path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default()
    } else {
        file.extension.clone()
    };
    SourceExtension::from_extension(&extension).ok_or_else(|| ParseError::UnsupportedExtension {
        path: file.path.clone(),
        extension,
    })
}

/// `path:start:end`, then `:kind`, then an ordinal, until unique.
fn unique_id(path: &str, node: Node, ids: &mut FxHashSet<String>) -> String {
    let base = format!("{}:{}:{}", path, node.start_byte(), node.end_byte());
    if ids.insert(base.clone()) {
        return base;
    }
    let with_kind = format!("{base}:{}", node.kind());
    if ids.insert(with_kind.clone()) {
        return with_kind;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{with_kind}:{n}");
        if ids.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn syntax_flags(node: Node) -> Vec<String> {
    let mut flags = Vec::new();
    if node.kind() == "variable_declarator" {
        let declaration = node.parent();
        let label = declaration.and_then(|decl| match decl.kind() {
            "variable_declaration" => Some("Var"),
            "lexical_declaration" => decl.child(0).map(|kw| match kw.kind() {
                "const" => "Const",
                _ => "Let",
            }),
            _ => None,
        });
        if let Some(label) = label {
            flags.push(label.to_string());
        }
    }
    if node.has_error() {
        flags.push("ThisNodeHasError".to_string());
    }
    flags
}

/// Structural relations: parent → child, class → base, class → interface.
pub fn derive_relations(nodes: &[AstNode]) -> Vec<Relation> {
    let mut relations = Vec::new();
    let mut ids: FxHashSet<String> = FxHashSet::default();
    let mut push = |mut relation: Relation| {
        if !ids.insert(relation.id.clone()) {
            let base = relation.id.clone();
            let mut n = 2;
            while !ids.insert(format!("{base}#{n}")) {
                n += 1;
            }
            relation.id = format!("{base}#{n}");
        }
        relations.push(relation);
    };

    for node in nodes {
        if let Some(parent) = &node.parent {
            push(Relation::new(
                RelationType::References,
                parent.as_str(),
                node.id.as_str(),
                RelationMetadata::ParentChild,
            ));
        }
        for base in &node.type_info.base_types {
            push(Relation::new(
                RelationType::Inherits,
                node.id.as_str(),
                base.as_str(),
                RelationMetadata::Inheritance {
                    base_type: base.clone(),
                },
            ));
        }
        for interface in &node.type_info.implemented_interfaces {
            push(Relation::new(
                RelationType::Implements,
                node.id.as_str(),
                interface.as_str(),
                RelationMetadata::Implementation {
                    interface: interface.clone(),
                },
            ));
        }
    }
    relations
}
