//! Single-file type query.
//!
//! Built once per parse from the syntax tree. It knows the declared shape of
//! every named type in the file (interfaces, classes, aliases, enums) and
//! classifies annotations and initializers into a [`TypeKind`]. It never
//! looks at other files; unresolved names classify as `Unknown`.

use strata_core::types::type_info::TypeKind;
use strata_core::FxHashMap;
use tree_sitter::{Node, Tree};

use super::syntax::{annotation_text, field_text, named_children, node_text};

/// Ambient library types that are always objects.
const GLOBAL_OBJECT_TYPES: &[&str] = &[
    "Array", "ReadonlyArray", "Map", "Set", "WeakMap", "WeakSet", "Promise",
    "Date", "RegExp", "Error", "Record", "Partial", "Required", "Readonly",
    "Pick", "Omit", "Function", "Object",
];

#[derive(Debug, Default)]
pub struct TypeQuery {
    /// Type name → kind its local declaration gives it.
    declarations: FxHashMap<String, TypeKind>,
}

impl TypeQuery {
    /// Scan the tree for named type declarations.
    ///
    /// Fails when the tree has no `program` root, i.e. there is nothing to
    /// anchor declarations to.
    pub fn build(tree: &Tree, source: &[u8]) -> Result<Self, String> {
        let root = tree.root_node();
        if root.kind() != "program" {
            return Err(format!("unexpected root node `{}`", root.kind()));
        }

        let mut query = Self::default();
        let mut aliases: Vec<(String, Node)> = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let name = || field_text(node, "name", source);
            match node.kind() {
                "interface_declaration" => {
                    if let Some(name) = name() {
                        query.declare(name, TypeKind::Object);
                    }
                }
                "class_declaration" | "abstract_class_declaration" => {
                    if let Some(name) = name() {
                        query.declare(name, TypeKind::Object);
                    }
                }
                "enum_declaration" => {
                    if let Some(name) = name() {
                        query.declare(name, TypeKind::Union);
                    }
                }
                "type_alias_declaration" => {
                    if let (Some(name), Some(value)) = (name(), node.child_by_field_name("value")) {
                        aliases.push((name, value));
                    }
                }
                _ => {}
            }
            stack.extend(named_children(node));
        }

        // Aliases may refer to each other; settle chains a level at a time.
        for _ in 0..=aliases.len() {
            let mut changed = false;
            for (name, value) in &aliases {
                let kind = query.classify(*value, source);
                let entry = query.declarations.get(name).copied();
                if entry != Some(kind) {
                    query.declare(name.clone(), kind);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        Ok(query)
    }

    fn declare(&mut self, name: String, kind: TypeKind) {
        self.declarations.insert(name, kind);
    }

    pub fn resolve(&self, name: &str) -> Option<TypeKind> {
        self.declarations.get(name).copied()
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    /// Classify a type node (or a `type_annotation` wrapping one).
    pub fn classify(&self, node: Node, source: &[u8]) -> TypeKind {
        match node.kind() {
            "type_annotation" | "opting_type_annotation" | "omitting_type_annotation"
            | "parenthesized_type" | "constraint" | "default_type" => node
                .named_child(0)
                .map(|inner| self.classify(inner, source))
                .unwrap_or_default(),
            "union_type" => TypeKind::Union,
            "intersection_type" => TypeKind::Intersection,
            "conditional_type" => TypeKind::Conditional,
            "object_type" | "interface_body" | "function_type" | "constructor_type"
            | "array_type" | "tuple_type" | "readonly_type" | "this_type" => TypeKind::Object,
            "literal_type" | "template_literal_type" | "type_predicate"
            | "asserts_annotation" => TypeKind::Primitive,
            "predefined_type" => match node_text(node, source).as_str() {
                "any" | "unknown" => TypeKind::Unknown,
                "object" => TypeKind::Object,
                _ => TypeKind::Primitive,
            },
            "type_identifier" | "identifier" => self.classify_name(&node_text(node, source)),
            "generic_type" => node
                .child_by_field_name("name")
                .map(|name| self.classify_name(&node_text(name, source)))
                .unwrap_or(TypeKind::Object),
            _ => TypeKind::Unknown,
        }
    }

    fn classify_name(&self, name: &str) -> TypeKind {
        if let Some(kind) = self.resolve(name) {
            return kind;
        }
        if GLOBAL_OBJECT_TYPES.contains(&name) {
            return TypeKind::Object;
        }
        TypeKind::Unknown
    }

    /// Type text and kind of a `type_annotation` node.
    pub fn annotation(&self, annotation: Node, source: &[u8]) -> (String, TypeKind) {
        (annotation_text(annotation, source), self.classify(annotation, source))
    }

    /// Infer a type from an initializer expression, the way a checker would
    /// widen a literal.
    pub fn infer_expression(&self, expr: Node, source: &[u8]) -> (String, TypeKind) {
        let primitive = |name: &str| (name.to_string(), TypeKind::Primitive);
        match expr.kind() {
            "number" => primitive("number"),
            "string" | "template_string" => primitive("string"),
            "true" | "false" => primitive("boolean"),
            "null" => primitive("null"),
            "undefined" => primitive("undefined"),
            "regex" => ("RegExp".to_string(), TypeKind::Object),
            "array" => ("any[]".to_string(), TypeKind::Object),
            "object" => ("object".to_string(), TypeKind::Object),
            "arrow_function" | "function_expression" | "function" => {
                (self.signature(expr, source), TypeKind::Object)
            }
            "class" => ("typeof class".to_string(), TypeKind::Object),
            "new_expression" => {
                let name = field_text(expr, "constructor", source)
                    .unwrap_or_else(|| "object".to_string());
                let kind = match self.classify_name(&name) {
                    TypeKind::Unknown => TypeKind::Object,
                    kind => kind,
                };
                (name, kind)
            }
            "as_expression" | "satisfies_expression" => expr
                .named_child(1)
                .map(|ty| (node_text(ty, source), self.classify(ty, source)))
                .unwrap_or_else(|| ("unknown".to_string(), TypeKind::Unknown)),
            "parenthesized_expression" => expr
                .named_child(0)
                .map(|inner| self.infer_expression(inner, source))
                .unwrap_or_else(|| ("unknown".to_string(), TypeKind::Unknown)),
            "unary_expression" => match expr.child(0).map(|op| op.kind()) {
                Some("!") => primitive("boolean"),
                Some("typeof") => primitive("string"),
                Some("-") | Some("+") | Some("~") => primitive("number"),
                _ => ("unknown".to_string(), TypeKind::Unknown),
            },
            _ => ("unknown".to_string(), TypeKind::Unknown),
        }
    }

    /// `(a: T, b?: U) => R` for anything with `parameters`/`return_type` fields.
    pub fn signature(&self, node: Node, source: &[u8]) -> String {
        let params = node
            .child_by_field_name("parameters")
            .map(|p| node_text(p, source))
            .or_else(|| {
                // Single bare parameter arrow: `x => x`.
                field_text(node, "parameter", source).map(|p| format!("({p})"))
            })
            .unwrap_or_else(|| "()".to_string());
        let returns = node
            .child_by_field_name("return_type")
            .map(|r| annotation_text(r, source))
            .unwrap_or_else(|| "unknown".to_string());
        format!("{params} => {returns}")
    }
}

/// Flag labels mirroring the checker's type flags for a kind.
pub fn kind_flags(kind: TypeKind) -> Vec<String> {
    let label = match kind {
        TypeKind::Union => "Union",
        TypeKind::Intersection => "Intersection",
        TypeKind::Conditional => "Conditional",
        TypeKind::Object => "Object",
        TypeKind::Primitive => "Primitive",
        TypeKind::Unknown => "Unknown",
    };
    vec![label.to_string()]
}
