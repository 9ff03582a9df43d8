//! Enhanced type information per recognized node.
//!
//! Every function returns `Result<TypeInfo, DegradedReason>`; the caller
//! substitutes [`TypeInfo::degraded`] on error.

use smallvec::SmallVec;
use strata_core::types::ast::{AccessorKind, NodeType};
use strata_core::types::type_info::{
    DegradedReason, MethodTypeInfo, ParameterTypeInfo, PropertyTypeInfo, TypeInfo, TypeKind,
    TypeParameterInfo,
};
use tree_sitter::Node;

use super::context::ParseContext;
use super::extract::{accessor_kind, parameter_name, visibility_of};
use super::jsdoc::member_documentation;
use super::syntax::{
    annotation_text, children, field_text, find_child_by_kind, has_child_kind, named_children,
    node_text, require_field, try_text,
};
use super::type_query::kind_flags;

/// Longest initializer text kept as a default value.
const MAX_DEFAULT_VALUE_LEN: usize = 200;

pub fn extract_type_info(
    node: Node,
    node_type: NodeType,
    name: &str,
    ctx: &ParseContext<'_>,
) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    try_text(node, src)?;
    match node_type {
        NodeType::SourceFile => Ok(flagged(TypeInfo::basic(name, TypeKind::Object), &["Module"])),
        NodeType::Class => class_type(node, name, ctx),
        NodeType::Interface => interface_type(node, name, ctx),
        NodeType::TypeAlias => alias_type(node, name, ctx),
        NodeType::Enum => enum_type(node, name, ctx),
        NodeType::Function | NodeType::Method | NodeType::Constructor => callable_type(node, ctx),
        NodeType::Accessor => accessor_type(node, ctx),
        NodeType::Property | NodeType::Variable => value_type(node, ctx),
        NodeType::Parameter => parameter_type(node, ctx),
        NodeType::TypeParameter => type_parameter_type(node, name, ctx),
        NodeType::Namespace => Ok(flagged(TypeInfo::basic(name, TypeKind::Object), &["Module"])),
        NodeType::Import | NodeType::Export | NodeType::Decorator => {
            Ok(TypeInfo::basic(name, TypeKind::Unknown))
        }
    }
}

fn flagged(mut info: TypeInfo, extra: &[&str]) -> TypeInfo {
    let mut flags = kind_flags(info.kind);
    flags.extend(extra.iter().map(|f| f.to_string()));
    info.metadata.flags = flags;
    info
}

fn truncate_default(text: String) -> String {
    if text.len() <= MAX_DEFAULT_VALUE_LEN {
        return text;
    }
    let mut end = MAX_DEFAULT_VALUE_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// `<T extends U = V, ...>` on any declaration.
pub(crate) fn type_parameters(node: Node, src: &[u8]) -> Vec<TypeParameterInfo> {
    let Some(list) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    named_children(list)
        .filter(|p| p.kind() == "type_parameter")
        .map(|p| type_parameter_info(p, src))
        .collect()
}

fn type_parameter_info(param: Node, src: &[u8]) -> TypeParameterInfo {
    let strip = |n: Node, keyword: char| {
        let text = node_text(n, src);
        text.trim_start_matches(keyword).trim().to_string()
    };
    TypeParameterInfo {
        name: field_text(param, "name", src).unwrap_or_default(),
        constraint: param
            .child_by_field_name("constraint")
            .map(|c| node_text(c, src).trim_start_matches("extends").trim().to_string()),
        default: param.child_by_field_name("value").map(|d| strip(d, '=')),
        variance: None,
    }
}

/// Name of a heritage type without its type arguments: `Base<T>` → `Base`.
fn heritage_name(node: Node, src: &[u8]) -> String {
    match node.kind() {
        "generic_type" => field_text(node, "name", src).unwrap_or_else(|| node_text(node, src)),
        _ => node_text(node, src),
    }
}

/// Base classes and implemented interfaces from a class heritage.
fn class_heritage(node: Node, src: &[u8]) -> (SmallVec<[String; 2]>, SmallVec<[String; 2]>) {
    let mut bases = SmallVec::new();
    let mut interfaces = SmallVec::new();
    let Some(heritage) = find_child_by_kind(node, "class_heritage") else {
        return (bases, interfaces);
    };
    for clause in named_children(heritage) {
        match clause.kind() {
            "extends_clause" => {
                let mut cursor = clause.walk();
                for value in clause.children_by_field_name("value", &mut cursor) {
                    bases.push(heritage_name(value, src));
                }
            }
            "implements_clause" => {
                for ty in named_children(clause) {
                    interfaces.push(heritage_name(ty, src));
                }
            }
            // JavaScript: `class_heritage` holds the superclass expression directly.
            "comment" => {}
            _ => bases.push(heritage_name(clause, src)),
        }
    }
    (bases, interfaces)
}

fn class_type(node: Node, name: &str, ctx: &ParseContext<'_>) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    let body = require_field(node, "body")?;
    let (base_types, implemented_interfaces) = class_heritage(node, src);

    let mut info = TypeInfo::basic(name, TypeKind::Object);
    info.type_parameters = type_parameters(node, src);
    info.base_types = base_types;
    info.implemented_interfaces = implemented_interfaces;

    for member in named_children(body) {
        match member.kind() {
            "public_field_definition" | "field_definition" => {
                info.properties.push(field_property(member, ctx));
            }
            "method_definition" | "abstract_method_signature" | "method_signature" => {
                match accessor_kind(member) {
                    // A getter reads like a property; the setter adds nothing new.
                    Some(AccessorKind::Get) => info.properties.push(getter_property(member, ctx)),
                    Some(AccessorKind::Set) => {}
                    None => {
                        if field_text(member, "name", src).as_deref() != Some("constructor") {
                            info.methods.push(method_info(member, ctx));
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let mut extra = vec!["Class"];
    if node.kind() == "abstract_class_declaration" {
        extra.push("Abstract");
    }
    Ok(flagged(info, &extra))
}

fn interface_type(
    node: Node,
    name: &str,
    ctx: &ParseContext<'_>,
) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    let body = require_field(node, "body")?;

    let mut info = TypeInfo::basic(name, TypeKind::Object);
    info.type_parameters = type_parameters(node, src);
    if let Some(extends) = find_child_by_kind(node, "extends_type_clause") {
        for ty in named_children(extends) {
            info.base_types.push(heritage_name(ty, src));
        }
    }
    collect_object_members(body, ctx, &mut info);
    Ok(flagged(info, &["Interface"]))
}

/// Members of an `object_type` / interface body.
fn collect_object_members(body: Node, ctx: &ParseContext<'_>, info: &mut TypeInfo) {
    for member in named_children(body) {
        match member.kind() {
            "property_signature" => info.properties.push(field_property(member, ctx)),
            "method_signature" => info.methods.push(method_info(member, ctx)),
            _ => {}
        }
    }
}

fn alias_type(node: Node, name: &str, ctx: &ParseContext<'_>) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    let value = require_field(node, "value")?;
    let mut info = TypeInfo::basic(name, ctx.types.classify(value, src));
    info.type_parameters = type_parameters(node, src);
    if value.kind() == "object_type" {
        collect_object_members(value, ctx, &mut info);
    }
    Ok(flagged(info, &["TypeAlias"]))
}

fn enum_type(node: Node, name: &str, ctx: &ParseContext<'_>) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    let body = require_field(node, "body")?;
    let mut info = TypeInfo::basic(name, TypeKind::Union);
    for member in named_children(body) {
        let (member_name, value) = match member.kind() {
            "property_identifier" | "string" => (node_text(member, src), None),
            "enum_assignment" => (
                field_text(member, "name", src).unwrap_or_default(),
                member.child_by_field_name("value"),
            ),
            _ => continue,
        };
        let type_name = match value.map(|v| v.kind()) {
            Some("string") | Some("template_string") => "string",
            _ => "number",
        };
        info.properties.push(PropertyTypeInfo {
            name: member_name,
            type_name: type_name.to_string(),
            is_readonly: true,
            is_static: true,
            default_value: value.map(|v| node_text(v, src)),
            documentation: member_documentation(member, src),
            ..Default::default()
        });
    }
    Ok(flagged(info, &["EnumLiteral"]))
}

/// Declared or inferred type of a property/variable-like node.
fn declared_or_inferred(node: Node, ctx: &ParseContext<'_>) -> (String, TypeKind) {
    let src = ctx.bytes();
    if let Some(annotation) = node.child_by_field_name("type") {
        return ctx.types.annotation(annotation, src);
    }
    match node.child_by_field_name("value") {
        Some(value) => ctx.types.infer_expression(value, src),
        None => ("unknown".to_string(), TypeKind::Unknown),
    }
}

fn field_property(member: Node, ctx: &ParseContext<'_>) -> PropertyTypeInfo {
    let src = ctx.bytes();
    let (type_name, _) = declared_or_inferred(member, ctx);
    PropertyTypeInfo {
        name: field_text(member, "name", src)
            .or_else(|| field_text(member, "property", src))
            .unwrap_or_default(),
        type_name,
        is_optional: has_child_kind(member, "?"),
        is_readonly: has_child_kind(member, "readonly"),
        is_static: has_child_kind(member, "static"),
        visibility: visibility_of(member, src),
        default_value: member
            .child_by_field_name("value")
            .map(|v| truncate_default(node_text(v, src))),
        documentation: member_documentation(member, src),
    }
}

fn getter_property(member: Node, ctx: &ParseContext<'_>) -> PropertyTypeInfo {
    let src = ctx.bytes();
    PropertyTypeInfo {
        name: field_text(member, "name", src).unwrap_or_default(),
        type_name: return_type(member, src),
        is_readonly: true,
        is_static: has_child_kind(member, "static"),
        visibility: visibility_of(member, src),
        documentation: member_documentation(member, src),
        ..Default::default()
    }
}

fn return_type(node: Node, src: &[u8]) -> String {
    node.child_by_field_name("return_type")
        .map(|r| annotation_text(r, src))
        .unwrap_or_else(|| "unknown".to_string())
}

fn method_info(member: Node, ctx: &ParseContext<'_>) -> MethodTypeInfo {
    let src = ctx.bytes();
    MethodTypeInfo {
        name: field_text(member, "name", src).unwrap_or_default(),
        return_type: return_type(member, src),
        parameters: parameters(member, ctx),
        is_async: has_child_kind(member, "async"),
        is_generator: has_child_kind(member, "*"),
        is_static: has_child_kind(member, "static"),
        is_abstract: member.kind() == "abstract_method_signature"
            || has_child_kind(member, "abstract"),
        visibility: visibility_of(member, src),
        documentation: member_documentation(member, src),
    }
}

pub(crate) fn parameters(node: Node, ctx: &ParseContext<'_>) -> Vec<ParameterTypeInfo> {
    let Some(list) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };
    named_children(list)
        .filter(|p| !matches!(p.kind(), "comment" | "decorator"))
        .map(|p| parameter_info(p, ctx))
        .collect()
}

fn parameter_info(param: Node, ctx: &ParseContext<'_>) -> ParameterTypeInfo {
    let src = ctx.bytes();
    let default = param
        .child_by_field_name("value")
        .or_else(|| param.child_by_field_name("right"));
    let type_name = match param.child_by_field_name("type") {
        Some(annotation) => annotation_text(annotation, src),
        None => default
            .map(|d| ctx.types.infer_expression(d, src).0)
            .unwrap_or_else(|| "any".to_string()),
    };
    let is_rest = param.kind() == "rest_pattern"
        || param
            .child_by_field_name("pattern")
            .is_some_and(|p| p.kind() == "rest_pattern");
    ParameterTypeInfo {
        name: parameter_name(param, src).unwrap_or_default(),
        type_name,
        is_optional: param.kind() == "optional_parameter" || default.is_some(),
        is_rest,
        default_value: default.map(|d| truncate_default(node_text(d, src))),
    }
}

fn callable_type(node: Node, ctx: &ParseContext<'_>) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    require_field(node, "parameters")?;
    let mut info = TypeInfo::basic(ctx.types.signature(node, src), TypeKind::Object);
    info.type_parameters = type_parameters(node, src);
    info.is_optional = has_child_kind(node, "?");
    let mut extra = vec!["Callable"];
    if children(node).any(|c| c.kind() == "async") {
        extra.push("Async");
    }
    Ok(flagged(info, &extra))
}

fn accessor_type(node: Node, ctx: &ParseContext<'_>) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    let (type_name, kind) = match accessor_kind(node) {
        Some(AccessorKind::Set) => {
            let params = parameters(node, ctx);
            let type_name = params
                .first()
                .map(|p| p.type_name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            (type_name, TypeKind::Unknown)
        }
        _ => match node.child_by_field_name("return_type") {
            Some(annotation) => ctx.types.annotation(annotation, src),
            None => ("unknown".to_string(), TypeKind::Unknown),
        },
    };
    let mut info = TypeInfo::basic(type_name, kind);
    info.is_readonly = accessor_kind(node) == Some(AccessorKind::Get);
    Ok(flagged(info, &["Accessor"]))
}

fn value_type(node: Node, ctx: &ParseContext<'_>) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    let (type_name, kind) = declared_or_inferred(node, ctx);
    let mut info = TypeInfo::basic(type_name, kind);
    info.is_optional = has_child_kind(node, "?");
    info.is_readonly = has_child_kind(node, "readonly");
    info.default_value = node
        .child_by_field_name("value")
        .map(|v| truncate_default(node_text(v, src)));
    let object_annotation = node
        .child_by_field_name("type")
        .and_then(|annotation| annotation.named_child(0))
        .filter(|ty| ty.kind() == "object_type");
    if let Some(object) = object_annotation {
        collect_object_members(object, ctx, &mut info);
    }
    Ok(flagged(info, &[]))
}

fn parameter_type(node: Node, ctx: &ParseContext<'_>) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    if matches!(node.kind(), "required_parameter" | "optional_parameter") {
        require_field(node, "pattern")?;
    }
    let param = parameter_info(node, ctx);
    let kind = match node.child_by_field_name("type") {
        Some(annotation) => ctx.types.classify(annotation, src),
        None => node
            .child_by_field_name("value")
            .or_else(|| node.child_by_field_name("right"))
            .map(|d| ctx.types.infer_expression(d, src).1)
            .unwrap_or(TypeKind::Unknown),
    };
    let mut info = TypeInfo::basic(param.type_name, kind);
    info.is_optional = param.is_optional;
    info.is_readonly = has_child_kind(node, "readonly");
    info.default_value = param.default_value;
    Ok(flagged(info, &[]))
}

fn type_parameter_type(
    node: Node,
    name: &str,
    ctx: &ParseContext<'_>,
) -> Result<TypeInfo, DegradedReason> {
    let src = ctx.bytes();
    let kind = node
        .child_by_field_name("constraint")
        .map(|c| ctx.types.classify(c, src))
        .unwrap_or(TypeKind::Unknown);
    let mut info = TypeInfo::basic(name, kind);
    let param = type_parameter_info(node, src);
    info.default_value = param.default.clone();
    info.type_parameters = vec![param];
    Ok(flagged(info, &["TypeParameter"]))
}
