//! Import clauses for static imports, dynamic `import()` calls, and
//! re-exports.

use strata_core::types::ast::ImportClause;
use tree_sitter::Node;

use super::extract::is_dynamic_import;
use super::syntax::{
    field_text, find_child_by_kind, has_child_kind, named_children, node_text, strip_quotes,
};

pub fn extract_import_clause(node: Node, source: &[u8]) -> Option<ImportClause> {
    match node.kind() {
        "import_statement" => Some(static_import(node, source)),
        "call_expression" if is_dynamic_import(node) => Some(dynamic_import(node, source)),
        "export_statement" => re_export(node, source),
        _ => None,
    }
}

fn static_import(node: Node, source: &[u8]) -> ImportClause {
    let mut clause = ImportClause {
        is_type_only: has_child_kind(node, "type"),
        ..Default::default()
    };

    if let Some(src) = node.child_by_field_name("source") {
        clause.module_specifier = strip_quotes(&node_text(src, source));
    }

    // `import x = require('y')`
    if let Some(require) = find_child_by_kind(node, "import_require_clause") {
        if let Some(alias) = require.named_child(0) {
            let alias = node_text(alias, source);
            clause.imported_names.push(alias.clone());
            clause.default_import = Some(alias);
        }
        if let Some(src) = require.child_by_field_name("source") {
            clause.module_specifier = strip_quotes(&node_text(src, source));
        }
    }

    let Some(import_clause) = find_child_by_kind(node, "import_clause") else {
        return clause;
    };
    for part in named_children(import_clause) {
        match part.kind() {
            "identifier" => {
                let name = node_text(part, source);
                clause.imported_names.push(name.clone());
                clause.default_import = Some(name);
            }
            "namespace_import" => {
                clause.is_namespace = true;
                if let Some(alias) = part.named_child(0) {
                    let alias = node_text(alias, source);
                    clause.imported_names.push(alias.clone());
                    clause.namespace_import = Some(alias);
                }
            }
            "named_imports" => {
                for spec in named_children(part).filter(|s| s.kind() == "import_specifier") {
                    if let Some(name) = field_text(spec, "name", source) {
                        clause.imported_names.push(name);
                    }
                }
            }
            _ => {}
        }
    }
    clause
}

fn dynamic_import(node: Node, source: &[u8]) -> ImportClause {
    let specifier = node
        .child_by_field_name("arguments")
        .and_then(|args| args.named_child(0))
        .map(|arg| strip_quotes(&node_text(arg, source)))
        .unwrap_or_default();

    ImportClause {
        module_specifier: specifier,
        is_dynamic: true,
        condition: enclosing_condition(node, source),
        ..Default::default()
    }
}

/// Condition text of the nearest enclosing `if` statement.
fn enclosing_condition(node: Node, source: &[u8]) -> Option<String> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == "if_statement" {
            let condition = ancestor.child_by_field_name("condition")?;
            // The import may sit inside the condition itself.
            if condition.start_byte() <= node.start_byte()
                && node.end_byte() <= condition.end_byte()
            {
                current = ancestor.parent();
                continue;
            }
            let text = node_text(condition, source);
            let text = text
                .strip_prefix('(')
                .and_then(|t| t.strip_suffix(')'))
                .unwrap_or(&text);
            return Some(text.trim().to_string());
        }
        current = ancestor.parent();
    }
    None
}

/// `export { a } from 'x'`, `export * from 'x'`, `export * as ns from 'x'`.
fn re_export(node: Node, source: &[u8]) -> Option<ImportClause> {
    let src = node.child_by_field_name("source")?;
    let mut clause = ImportClause {
        module_specifier: strip_quotes(&node_text(src, source)),
        is_type_only: has_child_kind(node, "type"),
        is_re_export: true,
        ..Default::default()
    };

    if let Some(export_clause) = find_child_by_kind(node, "export_clause") {
        for spec in named_children(export_clause).filter(|s| s.kind() == "export_specifier") {
            if let Some(name) = field_text(spec, "name", source) {
                clause.imported_names.push(name);
            }
        }
    } else if let Some(ns) = find_child_by_kind(node, "namespace_export") {
        clause.is_namespace = true;
        clause.imported_names.push("*".to_string());
        clause.namespace_import = ns.named_child(0).map(|alias| node_text(alias, source));
    } else {
        clause.is_namespace = true;
        clause.imported_names.push("*".to_string());
    }
    Some(clause)
}
