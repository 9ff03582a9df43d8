//! Per-node extraction: recognition, names, modifiers, decorators, and the
//! typed property bag.

use strata_core::constants::UNKNOWN_NAME;
use strata_core::types::ast::{AccessorKind, DecoratorInfo, NodeProperties, NodeType};
use strata_core::types::type_info::{DegradedReason, Visibility};
use tree_sitter::Node;

use super::imports::extract_import_clause;
use super::syntax::{
    children, enclosing_export, field_text, find_child_by_kind, has_child_kind,
    named_children, node_text, strip_quotes, try_text,
};

/// Map a raw tree-sitter kind to its normalized category, if recognized.
///
/// `parent_kind` is the immediate syntactic parent, needed for JavaScript
/// parameters which are bare patterns under `formal_parameters`.
pub fn recognize(node: Node, parent_kind: Option<&str>, source: &[u8]) -> Option<NodeType> {
    let node_type = match node.kind() {
        "program" => NodeType::SourceFile,
        "class_declaration" | "abstract_class_declaration" | "class" => NodeType::Class,
        "interface_declaration" => NodeType::Interface,
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            NodeType::Function
        }
        "method_definition" => {
            if accessor_kind(node).is_some() {
                NodeType::Accessor
            } else if field_text(node, "name", source).as_deref() == Some("constructor") {
                NodeType::Constructor
            } else {
                NodeType::Method
            }
        }
        "method_signature" | "abstract_method_signature" => NodeType::Method,
        "public_field_definition" | "field_definition" | "property_signature" => {
            NodeType::Property
        }
        "variable_declarator" => NodeType::Variable,
        "type_alias_declaration" => NodeType::TypeAlias,
        "enum_declaration" => NodeType::Enum,
        "internal_module" | "module" => NodeType::Namespace,
        "import_statement" => NodeType::Import,
        "call_expression" if is_dynamic_import(node) => NodeType::Import,
        "export_statement" => NodeType::Export,
        "required_parameter" | "optional_parameter" => NodeType::Parameter,
        "identifier" | "assignment_pattern" | "rest_pattern" | "object_pattern"
        | "array_pattern"
            if parent_kind == Some("formal_parameters") =>
        {
            NodeType::Parameter
        }
        "type_parameter" => NodeType::TypeParameter,
        "decorator" => NodeType::Decorator,
        _ => return None,
    };
    Some(node_type)
}

pub(crate) fn is_dynamic_import(node: Node) -> bool {
    node.kind() == "call_expression"
        && node
            .child_by_field_name("function")
            .is_some_and(|f| f.kind() == "import")
}

pub(crate) fn accessor_kind(node: Node) -> Option<AccessorKind> {
    children(node).find_map(|c| match c.kind() {
        "get" => Some(AccessorKind::Get),
        "set" => Some(AccessorKind::Set),
        _ => None,
    })
}

/// Kind-specific display name; `unknown` when the construct has none.
pub fn extract_name(node: Node, node_type: NodeType, file_name: &str, source: &[u8]) -> String {
    let name = match node_type {
        NodeType::SourceFile => Some(file_name.to_string()),
        NodeType::Constructor => Some("constructor".to_string()),
        NodeType::Property => {
            field_text(node, "name", source).or_else(|| field_text(node, "property", source))
        }
        NodeType::Namespace => field_text(node, "name", source).map(|n| strip_quotes(&n)),
        NodeType::Parameter => parameter_name(node, source),
        NodeType::Import => extract_import_clause(node, source)
            .map(|clause| clause.module_specifier)
            .filter(|s| !s.is_empty()),
        NodeType::Export => export_name(node, source),
        NodeType::Decorator => decorator_name(node, source),
        _ => field_text(node, "name", source),
    };
    name.unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

pub(crate) fn parameter_name(node: Node, source: &[u8]) -> Option<String> {
    let pattern = match node.kind() {
        "required_parameter" | "optional_parameter" => node.child_by_field_name("pattern")?,
        "assignment_pattern" => node.child_by_field_name("left")?,
        _ => node,
    };
    if pattern.kind() == "rest_pattern" {
        return pattern.named_child(0).map(|inner| node_text(inner, source));
    }
    Some(node_text(pattern, source)).filter(|t| !t.is_empty())
}

fn export_name(node: Node, source: &[u8]) -> Option<String> {
    if let Some(declaration) = node.child_by_field_name("declaration") {
        let inner = match declaration.kind() {
            "lexical_declaration" | "variable_declaration" => {
                find_child_by_kind(declaration, "variable_declarator")?
            }
            _ => declaration,
        };
        return field_text(inner, "name", source);
    }
    if has_child_kind(node, "default") {
        return Some("default".to_string());
    }
    if let Some(clause) = find_child_by_kind(node, "export_clause") {
        let names: Vec<String> = named_children(clause)
            .filter(|c| c.kind() == "export_specifier")
            .filter_map(|spec| {
                field_text(spec, "alias", source).or_else(|| field_text(spec, "name", source))
            })
            .collect();
        return Some(names.join(",")).filter(|n| !n.is_empty());
    }
    if let Some(ns) = find_child_by_kind(node, "namespace_export") {
        return ns.named_child(0).map(|alias| node_text(alias, source));
    }
    if has_child_kind(node, "*") {
        return Some("*".to_string());
    }
    None
}

fn decorator_name(node: Node, source: &[u8]) -> Option<String> {
    let expr = node.named_child(0)?;
    let target = match expr.kind() {
        "call_expression" => expr.child_by_field_name("function")?,
        "parenthesized_expression" => expr.named_child(0)?,
        _ => expr,
    };
    Some(node_text(target, source)).filter(|t| !t.is_empty())
}

/// Modifier keywords present on a declaration, in source order.
pub fn extract_modifiers(node: Node, source: &[u8]) -> Result<Vec<String>, DegradedReason> {
    let mut modifiers = Vec::new();
    if let Some(export) = enclosing_export(node) {
        modifiers.push("export".to_string());
        if has_child_kind(export, "default") {
            modifiers.push("default".to_string());
        }
    }
    if is_ambient(node) {
        modifiers.push("declare".to_string());
    }
    if matches!(node.kind(), "abstract_class_declaration" | "abstract_method_signature") {
        modifiers.push("abstract".to_string());
    }
    for child in children(node) {
        let label = match child.kind() {
            "accessibility_modifier" => try_text(child, source)?.trim().to_string(),
            "override_modifier" => "override".to_string(),
            "declare" if !modifiers.iter().any(|m| m == "declare") => "declare".to_string(),
            "abstract" if !modifiers.iter().any(|m| m == "abstract") => "abstract".to_string(),
            "static" | "readonly" | "async" | "accessor" => child.kind().to_string(),
            "const" if node.kind() == "enum_declaration" => "const".to_string(),
            _ => continue,
        };
        modifiers.push(label);
    }
    Ok(modifiers)
}

pub(crate) fn is_ambient(node: Node) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        match parent.kind() {
            "ambient_declaration" => return true,
            "export_statement" | "lexical_declaration" | "variable_declaration" => {
                current = parent.parent();
            }
            _ => return false,
        }
    }
    false
}

pub(crate) fn visibility_of(node: Node, source: &[u8]) -> Visibility {
    match find_child_by_kind(node, "accessibility_modifier")
        .map(|m| node_text(m, source))
        .as_deref()
    {
        Some("private") => Visibility::Private,
        Some("protected") => Visibility::Protected,
        _ => {
            let name = field_text(node, "name", source).unwrap_or_default();
            if name.starts_with('#') {
                Visibility::Private
            } else {
                Visibility::Public
            }
        }
    }
}

/// Decorators attached to a node: its own `decorator` children plus
/// decorator siblings immediately preceding it (class members, exports).
pub fn extract_decorators(node: Node, source: &[u8]) -> Result<Vec<DecoratorInfo>, DegradedReason> {
    let mut decorators = Vec::new();

    let mut preceding = Vec::new();
    let mut prev = node.prev_named_sibling();
    while let Some(sibling) = prev {
        match sibling.kind() {
            "decorator" => preceding.push(sibling),
            "comment" => {}
            _ => break,
        }
        prev = sibling.prev_named_sibling();
    }
    preceding.reverse();

    // `@dec export class X {}` puts the decorator on the export statement.
    let export_decorators = enclosing_export(node)
        .map(|export| named_children(export).filter(|c| c.kind() == "decorator").collect())
        .unwrap_or_else(Vec::new);

    let own = named_children(node).filter(|c| c.kind() == "decorator");
    for decorator in preceding.into_iter().chain(export_decorators).chain(own) {
        try_text(decorator, source)?;
        decorators.push(DecoratorInfo {
            name: decorator_name(decorator, source).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            arguments: Vec::new(),
        });
    }
    Ok(decorators)
}

/// The typed property bag for a recognized node.
pub fn extract_properties(
    node: Node,
    node_type: NodeType,
    modifiers: &[String],
    source: &[u8],
) -> NodeProperties {
    let has_mod = |m: &str| modifiers.iter().any(|x| x == m);
    let mut props = NodeProperties {
        is_async: has_mod("async"),
        is_abstract: has_mod("abstract"),
        is_static: has_mod("static"),
        is_exported: has_mod("export"),
        is_default: has_mod("default"),
        is_readonly: has_mod("readonly"),
        is_declare: has_mod("declare"),
        is_generator: node_type.is_callable()
            && (node.kind() == "generator_function_declaration" || has_child_kind(node, "*")),
        is_optional: node.kind() == "optional_parameter" || has_child_kind(node, "?"),
        ..Default::default()
    };

    match node_type {
        NodeType::SourceFile => {
            props.has_shebang = node.named_child(0).is_some_and(|c| c.kind() == "hash_bang_line");
            props.has_syntax_errors = node.has_error();
        }
        NodeType::Accessor => props.accessor = accessor_kind(node),
        NodeType::Import | NodeType::Export => {
            props.import = extract_import_clause(node, source);
        }
        NodeType::Parameter => {
            props.is_optional = props.is_optional
                || node.child_by_field_name("value").is_some()
                || node.kind() == "assignment_pattern";
        }
        _ => {}
    }

    if node_type.is_callable() {
        props.parameter_count = Some(parameter_count(node));
        props.cyclomatic_complexity = Some(cyclomatic_complexity(node));
    }
    props
}

pub(crate) fn parameter_count(node: Node) -> u32 {
    node.child_by_field_name("parameters")
        .map(|params| {
            named_children(params)
                .filter(|p| !matches!(p.kind(), "comment" | "decorator"))
                .count() as u32
        })
        .unwrap_or(0)
}

/// Function-like nodes whose bodies belong to their own complexity count.
const NESTED_SCOPES: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
    "arrow_function",
    "method_definition",
    "class_declaration",
    "class",
];

/// 1 + decision points in the body, excluding nested functions and classes.
pub fn cyclomatic_complexity(node: Node) -> u32 {
    let Some(body) = node.child_by_field_name("body") else {
        return 1;
    };
    let mut complexity = 1;
    let mut stack = vec![body];
    while let Some(current) = stack.pop() {
        match current.kind() {
            "if_statement" | "for_statement" | "for_in_statement" | "while_statement"
            | "do_statement" | "catch_clause" | "ternary_expression" | "switch_case" => {
                complexity += 1;
            }
            "binary_expression" => {
                let op = current.child_by_field_name("operator").map(|o| o.kind());
                if matches!(op, Some("&&" | "||" | "??")) {
                    complexity += 1;
                }
            }
            kind if NESTED_SCOPES.contains(&kind) => continue,
            _ => {}
        }
        stack.extend(named_children(current));
    }
    complexity
}
