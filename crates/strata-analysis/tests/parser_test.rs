//! Enhanced parser tests: node recognition, relations, type info, docs, imports.

use strata_analysis::parsers::jsdoc::parse_jsdoc;
use strata_analysis::EnhancedParser;
use strata_core::config::{CacheConfig, ParsingConfig, TraversalMode};
use strata_core::errors::ParseError;
use strata_core::types::ast::{AccessorKind, NodeType, ParserResult};
use strata_core::types::type_info::{DegradedReason, TypeKind};
use strata_core::{FxHashSet, RelationType, StrataErrorCode};

fn parse(path: &str, source: &str) -> ParserResult {
    strata_core::logging::init_tracing("warn");
    EnhancedParser::new().parse_source(path, source).unwrap()
}

fn named<'r>(
    result: &'r ParserResult,
    node_type: NodeType,
    name: &str,
) -> &'r strata_core::AstNode {
    result
        .nodes_of_type(node_type)
        .find(|n| n.name == name)
        .unwrap_or_else(|| panic!("no {node_type} named {name}"))
}

// ─── Structure ─────────────────────────────────────────────────────────────

/// An empty file still yields its source-file node.
#[test]
fn test_empty_file_has_single_root() {
    let result = parse("src/empty.ts", "");
    assert_eq!(result.nodes.len(), 1);
    assert!(result.relations.is_empty());
    let root = result.root().unwrap();
    assert_eq!(root.name, "empty.ts");
    assert!(root.is_root());
    assert_eq!(result.metadata.node_count, 1);
}

#[test]
fn test_class_heritage_relations() {
    let result = parse("src/foo.ts", "class Foo extends Bar implements Baz {}");
    let class = named(&result, NodeType::Class, "Foo");
    assert_eq!(class.type_info.base_types.as_slice(), ["Bar"]);
    assert_eq!(class.type_info.implemented_interfaces.as_slice(), ["Baz"]);
    assert_eq!(class.type_info.kind, TypeKind::Object);

    assert_eq!(result.relations_of_type(RelationType::Inherits).count(), 1);
    let implements: Vec<_> = result.relations_of_type(RelationType::Implements).collect();
    assert_eq!(implements.len(), 1);
    assert_eq!(implements[0].from, class.id);
    assert_eq!(implements[0].to, "Baz");
}

/// Every non-root node has exactly one parent-child relation, and children lists agree.
#[test]
fn test_parent_child_consistency() {
    let source = r#"
        export class Service {
            private count = 0;
            constructor(private readonly name: string) {}
            get total(): number { return this.count; }
            run(times: number): void {}
        }
        function helper(a: string, b?: number) {}
    "#;
    let result = parse("src/service.ts", source);
    assert_eq!(result.metadata.node_count, result.nodes.len());
    assert_eq!(result.metadata.relation_count, result.relations.len());

    let references: Vec<_> = result.relations_of_type(RelationType::References).collect();
    let parented = result.nodes.iter().filter(|n| n.parent.is_some()).count();
    assert_eq!(references.len(), parented);

    for node in &result.nodes {
        if let Some(parent) = &node.parent {
            let parent = result.node(parent).unwrap();
            assert!(parent.children.contains(&node.id));
        }
    }
    let ids: FxHashSet<&str> = result.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), result.nodes.len());
    let relation_ids: FxHashSet<&str> = result.relations.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(relation_ids.len(), result.relations.len());
}

#[test]
fn test_class_members_recognized() {
    let source = r#"
        class Counter {
            static instances = 0;
            #secret = "x";
            constructor(start: number) {}
            get value(): number { return 1; }
            set value(v: number) {}
            async *stream() {}
        }
    "#;
    let result = parse("src/counter.ts", source);
    assert!(result.nodes_of_type(NodeType::Constructor).any(|n| n.name == "constructor"));

    let accessors: Vec<_> = result.nodes_of_type(NodeType::Accessor).collect();
    assert_eq!(accessors.len(), 2);
    assert_eq!(accessors[0].properties.accessor, Some(AccessorKind::Get));
    assert_eq!(accessors[1].properties.accessor, Some(AccessorKind::Set));

    let stream = named(&result, NodeType::Method, "stream");
    assert!(stream.properties.is_async);
    assert!(stream.properties.is_generator);

    let instances = named(&result, NodeType::Property, "instances");
    assert!(instances.properties.is_static);

    let class = named(&result, NodeType::Class, "Counter");
    let names: Vec<&str> = class.type_info.properties.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&"instances"));
    assert!(names.contains(&"value"));
    assert_eq!(class.type_info.methods.len(), 1);
    assert_eq!(class.type_info.methods[0].name, "stream");
}

/// Top-level mode keeps the source file and its declarations but skips bodies.
#[test]
fn test_top_level_traversal() {
    let source = "class A { method() { const x = 1; } }\nfunction f() { const y = 2; }\n";
    let config = ParsingConfig {
        traversal_mode: Some(TraversalMode::TopLevel),
        ..Default::default()
    };
    let top = EnhancedParser::with_config(config).parse_source("src/a.ts", source).unwrap();
    let types: Vec<NodeType> = top.nodes.iter().map(|n| n.node_type).collect();
    assert_eq!(types, [NodeType::SourceFile, NodeType::Class, NodeType::Function]);

    let full = parse("src/a.ts", source);
    assert!(full.nodes.len() > top.nodes.len());
    assert!(full.nodes_of_type(NodeType::Variable).any(|n| n.name == "y"));
}

// ─── Types ─────────────────────────────────────────────────────────────────

#[test]
fn test_interface_and_alias_types() {
    let source = r#"
        interface Shape extends Base<number> {
            readonly name: string;
            area(): number;
        }
        type Id = string | number;
        type Point = { x: number; y: number };
        enum Color { Red, Green = "green" }
    "#;
    let result = parse("src/shapes.ts", source);

    let shape = named(&result, NodeType::Interface, "Shape");
    assert_eq!(shape.type_info.base_types.as_slice(), ["Base"]);
    assert_eq!(shape.type_info.properties.len(), 1);
    assert!(shape.type_info.properties[0].is_readonly);
    assert_eq!(shape.type_info.methods[0].return_type, "number");

    assert_eq!(named(&result, NodeType::TypeAlias, "Id").type_info.kind, TypeKind::Union);
    let point = named(&result, NodeType::TypeAlias, "Point");
    assert_eq!(point.type_info.kind, TypeKind::Object);
    assert_eq!(point.type_info.properties.len(), 2);

    let color = named(&result, NodeType::Enum, "Color");
    assert_eq!(color.type_info.kind, TypeKind::Union);
    let members: Vec<(&str, &str)> = color
        .type_info
        .properties
        .iter()
        .map(|p| (p.name.as_str(), p.type_name.as_str()))
        .collect();
    assert_eq!(members, [("Red", "number"), ("Green", "string")]);
}

#[test]
fn test_variable_inference() {
    let source = "const count = 42;\nlet label: string = 'a';\nconst items = [1, 2];\n";
    let result = parse("src/vars.ts", source);

    let count = named(&result, NodeType::Variable, "count");
    assert_eq!(count.type_info.kind, TypeKind::Primitive);
    assert_eq!(count.type_info.default_value.as_deref(), Some("42"));
    assert!(count.metadata.flags.contains(&"Const".to_string()));

    let label = named(&result, NodeType::Variable, "label");
    assert_eq!(label.type_info.name, "string");
    assert!(label.metadata.flags.contains(&"Let".to_string()));

    assert_eq!(named(&result, NodeType::Variable, "items").type_info.kind, TypeKind::Object);
}

#[test]
fn test_javascript_parameters() {
    let result = parse("src/util.js", "function f(a, b = 2, ...rest) { return a; }");
    let params: Vec<&str> = result
        .nodes_of_type(NodeType::Parameter)
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(params, ["a", "b", "rest"]);
    assert!(named(&result, NodeType::Parameter, "b").properties.is_optional);
    assert_eq!(named(&result, NodeType::Function, "f").properties.parameter_count, Some(3));
}

/// Disabling type extraction still yields a basic type info per node.
#[test]
fn test_type_extraction_toggle() {
    let config = ParsingConfig {
        extract_types: Some(false),
        ..Default::default()
    };
    let result = EnhancedParser::with_config(config)
        .parse_source("src/a.ts", "class A extends B {}")
        .unwrap();
    let class = named(&result, NodeType::Class, "A");
    assert_eq!(class.type_info.kind, TypeKind::Unknown);
    assert!(class.type_info.base_types.is_empty());
    assert_eq!(result.relations_of_type(RelationType::Inherits).count(), 0);
}

// ─── Modifiers, decorators, docs ───────────────────────────────────────────

#[test]
fn test_export_modifiers() {
    let result = parse(
        "src/mod.ts",
        "export default class App {}\nexport abstract class Base {}\ndeclare const VERSION: string;\n",
    );
    let app = named(&result, NodeType::Class, "App");
    assert_eq!(app.modifiers, ["export", "default"]);
    assert!(app.properties.is_default);

    let base = named(&result, NodeType::Class, "Base");
    assert!(base.has_modifier("abstract"));
    assert!(base.properties.is_exported);
    assert!(base.type_info.metadata.flags.contains(&"Abstract".to_string()));

    assert!(named(&result, NodeType::Variable, "VERSION").properties.is_declare);
}

/// Decorators are captured by name only.
#[test]
fn test_decorators_by_name() {
    let source = r#"
        @Component({ selector: 'app-widget' })
        class Widget {
            @Input() label: string;
            @HostListener('click', ['$event'])
            onClick() {}
        }
    "#;
    let result = parse("src/widget.ts", source);
    let class = named(&result, NodeType::Class, "Widget");
    assert_eq!(class.decorators.len(), 1);
    assert_eq!(class.decorators[0].name, "Component");
    assert!(class.decorators[0].arguments.is_empty());

    let label = named(&result, NodeType::Property, "label");
    assert_eq!(label.decorators[0].name, "Input");

    let on_click = named(&result, NodeType::Method, "onClick");
    let names: Vec<&str> = on_click.decorators.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["HostListener"]);
}

#[test]
fn test_jsdoc_attached_to_export() {
    let source = r#"
/**
 * Adds two numbers. Returns the sum.
 * @param {number} a - first operand
 * @param [b=1] second operand
 * @returns the sum
 * @deprecated
 */
export function add(a: number, b = 1): number { return a + b; }

// not documentation
function plain() {}
"#;
    let result = parse("src/math.ts", source);
    let add = named(&result, NodeType::Function, "add");
    let doc = add.jsdoc.as_ref().unwrap();
    assert_eq!(doc.summary.as_deref(), Some("Adds two numbers."));
    assert_eq!(doc.params.len(), 2);
    assert_eq!(doc.params[0].name, "a");
    assert_eq!(doc.params[0].type_name.as_deref(), Some("number"));
    assert_eq!(doc.params[0].description.as_deref(), Some("first operand"));
    assert!(doc.params[1].is_optional);
    assert_eq!(doc.params[1].default_value.as_deref(), Some("1"));
    assert_eq!(doc.returns.as_deref(), Some("the sum"));
    assert!(doc.deprecated);

    assert!(named(&result, NodeType::Function, "plain").jsdoc.is_none());
}

#[test]
fn test_parse_jsdoc_tags() {
    let doc = parse_jsdoc(
        "/**\n * Loads config.\n *\n * More detail here.\n * @example\n * load('a');\n * load('b');\n * @see other\n * @since 1.2\n * @throws {Error} on failure\n */",
    )
    .unwrap();
    assert_eq!(doc.summary.as_deref(), Some("Loads config."));
    assert!(doc.description.as_deref().unwrap().contains("More detail"));
    assert_eq!(doc.examples, ["load('a');\nload('b');"]);
    assert_eq!(doc.see, ["other"]);
    assert_eq!(doc.since.as_deref(), Some("1.2"));
    assert_eq!(doc.tags.get("throws").map(String::as_str), Some("{Error} on failure"));

    assert!(parse_jsdoc("/** never closed").is_err());
    assert!(parse_jsdoc("/* plain */").is_err());
}

/// A broken doc comment is recorded on the node; the rest still extracts.
#[test]
fn test_malformed_doc_comment_degrades() {
    let result = parse(
        "src/degraded.ts",
        "/**/\nexport async function f(a: number): string { return ''; }\n",
    );
    let f = named(&result, NodeType::Function, "f");

    assert!(f.jsdoc.is_none());
    assert_eq!(
        f.metadata.degraded,
        [DegradedReason::MalformedComment {
            message: "unterminated comment".to_string(),
        }]
    );
    assert_eq!(f.modifiers, ["export", "async"]);
    assert_eq!(f.type_info.kind, TypeKind::Object);
    assert!(f.type_info.metadata.flags.iter().any(|flag| flag == "Callable"));
    assert!(f.type_info.metadata.degraded.is_none());
    assert_eq!(f.properties.parameter_count, Some(1));

    let clean = parse("src/clean.ts", "export function g() {}\n");
    assert!(named(&clean, NodeType::Function, "g").metadata.degraded.is_empty());
}

// ─── Imports and exports ───────────────────────────────────────────────────

#[test]
fn test_static_imports() {
    let source = "import React, { useState } from 'react';\nimport type { Props } from './types';\nimport * as path from 'path';\n";
    let result = parse("src/app.tsx", source);
    let imports: Vec<_> = result.nodes_of_type(NodeType::Import).collect();
    assert_eq!(imports.len(), 3);

    let react = imports[0].properties.import.as_ref().unwrap();
    assert_eq!(react.module_specifier, "react");
    assert_eq!(react.default_import.as_deref(), Some("React"));
    assert_eq!(react.imported_names, ["React", "useState"]);

    let types = imports[1].properties.import.as_ref().unwrap();
    assert!(types.is_type_only);
    assert_eq!(imports[1].name, "./types");

    let path = imports[2].properties.import.as_ref().unwrap();
    assert!(path.is_namespace);
    assert_eq!(path.namespace_import.as_deref(), Some("path"));
}

/// A dynamic import inside an `if` records the condition text.
#[test]
fn test_conditional_dynamic_import() {
    let source = r#"
        async function load(flag: boolean) {
            if (flag) {
                const mod = await import('./heavy');
            }
        }
    "#;
    let result = parse("src/load.ts", source);
    let import = named(&result, NodeType::Import, "./heavy");
    let clause = import.properties.import.as_ref().unwrap();
    assert!(clause.is_dynamic);
    assert_eq!(clause.condition.as_deref(), Some("flag"));
}

#[test]
fn test_re_exports() {
    let source = "export { a, b } from './lib';\nexport * from './all';\nexport const local = 1;\n";
    let result = parse("src/index.ts", source);
    let exports: Vec<_> = result.nodes_of_type(NodeType::Export).collect();
    assert_eq!(exports.len(), 3);

    assert_eq!(exports[0].name, "a,b");
    let named_clause = exports[0].properties.import.as_ref().unwrap();
    assert!(named_clause.is_re_export);
    assert_eq!(named_clause.module_specifier, "./lib");
    assert_eq!(named_clause.imported_names, ["a", "b"]);

    assert_eq!(exports[1].name, "*");
    assert!(exports[1].properties.import.as_ref().unwrap().is_namespace);

    assert_eq!(exports[2].name, "local");
    assert!(exports[2].properties.import.is_none());
}

// ─── Complexity ────────────────────────────────────────────────────────────

#[test]
fn test_cyclomatic_complexity() {
    let source = r#"
        function decide(x: number) {
            if (x > 0 && x < 10) { return 1; }
            for (const i of [1, 2]) {}
            const inner = () => { if (x) {} };
            return x ? 2 : 3;
        }
    "#;
    let result = parse("src/decide.ts", source);
    let decide = named(&result, NodeType::Function, "decide");
    assert_eq!(decide.properties.cyclomatic_complexity, Some(5));
    assert_eq!(decide.properties.parameter_count, Some(1));
}

// ─── Errors and caching ────────────────────────────────────────────────────

#[test]
fn test_empty_path_rejected() {
    let err = EnhancedParser::new().parse_source("", "const a = 1;").unwrap_err();
    assert_eq!(err, ParseError::EmptyPath);
    assert_eq!(err.error_code(), "PARSE_EMPTY_PATH");
}

#[test]
fn test_unsupported_extension_rejected() {
    let err = EnhancedParser::new().parse_source("src/main.py", "x = 1").unwrap_err();
    assert!(err.to_string().ends_with("(expected one of .ts, .tsx, .js, .jsx)"));
    match err {
        ParseError::UnsupportedExtension { extension, .. } => assert_eq!(extension, ".py"),
        other => panic!("unexpected error: {other}"),
    }
}

/// Syntax errors do not abort the parse; the root records them.
#[test]
fn test_syntax_errors_are_recorded() {
    let result = parse("src/broken.ts", "class { function (");
    let root = result.root().unwrap();
    assert!(root.properties.has_syntax_errors);
}

#[test]
fn test_cache_reuses_identical_input() {
    let config = ParsingConfig {
        cache: CacheConfig {
            enabled: Some(true),
            capacity: Some(16),
        },
        ..Default::default()
    };
    let parser = EnhancedParser::with_config(config);
    let first = parser.parse_source("src/a.ts", "const a = 1;").unwrap();
    let second = parser.parse_source("src/a.ts", "const a = 1;").unwrap();
    assert_eq!(first, second);

    let cache = parser.cache().unwrap();
    assert_eq!(cache.entry_count(), 1);
    parser.parse_source("src/a.ts", "const a = 2;").unwrap();
    assert_eq!(cache.entry_count(), 2);
}
