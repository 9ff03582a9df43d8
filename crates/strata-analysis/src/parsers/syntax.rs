//! Small tree-sitter helpers shared by the extraction passes.

use strata_core::types::type_info::DegradedReason;
use tree_sitter::Node;

pub(crate) fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

/// Like [`node_text`] but surfaces undecodable text as a degraded reason.
pub(crate) fn try_text<'s>(node: Node, source: &'s [u8]) -> Result<&'s str, DegradedReason> {
    node.utf8_text(source).map_err(|_| DegradedReason::InvalidUtf8 {
        kind: node.kind().to_string(),
    })
}

pub(crate) fn field_text(node: Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source))
        .filter(|t| !t.is_empty())
}

/// A required field, or a degraded reason naming it.
pub(crate) fn require_field<'t>(node: Node<'t>, field: &str) -> Result<Node<'t>, DegradedReason> {
    node.child_by_field_name(field).ok_or_else(|| DegradedReason::MissingChild {
        kind: node.kind().to_string(),
        field: field.to_string(),
    })
}

pub(crate) fn find_child_by_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|c| c.kind() == kind)
}

pub(crate) fn has_child_kind(node: Node, kind: &str) -> bool {
    find_child_by_kind(node, kind).is_some()
}

pub(crate) fn children(node: Node) -> impl Iterator<Item = Node> {
    (0..node.child_count()).filter_map(move |i| node.child(i))
}

pub(crate) fn named_children(node: Node) -> impl Iterator<Item = Node> {
    (0..node.named_child_count()).filter_map(move |i| node.named_child(i))
}

pub(crate) fn strip_quotes(text: &str) -> String {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
}

/// The text of a type annotation without its leading `:`.
pub(crate) fn annotation_text(annotation: Node, source: &[u8]) -> String {
    node_text(annotation, source)
        .trim_start_matches(':')
        .trim()
        .to_string()
}

/// Walk through `export_statement` / `ambient_declaration` / declaration-list
/// wrappers to the node that owns leading comments and export keywords.
pub(crate) fn statement_owner(node: Node) -> Node {
    let mut owner = node;
    if owner.kind() == "variable_declarator" {
        if let Some(decl) = owner.parent() {
            if matches!(decl.kind(), "lexical_declaration" | "variable_declaration") {
                owner = decl;
            }
        }
    }
    while let Some(parent) = owner.parent() {
        if matches!(parent.kind(), "export_statement" | "ambient_declaration") {
            owner = parent;
        } else {
            break;
        }
    }
    owner
}

/// Nearest enclosing `export_statement`, looking through declaration wrappers.
pub(crate) fn enclosing_export(node: Node) -> Option<Node> {
    let owner = statement_owner(node);
    if owner.kind() == "export_statement" && owner.id() != node.id() {
        return Some(owner);
    }
    None
}
