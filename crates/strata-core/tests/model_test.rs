//! Data model tests: serialization shape, relation helpers, project input validation.

use strata_core::errors::AnalysisError;
use strata_core::types::file::{FileInfo, SourceExtension};
use strata_core::types::jsdoc::JSDocInfo;
use strata_core::types::package::{DependencyKind, PackageInfo};
use strata_core::types::project::ProjectInfo;
use strata_core::types::relation::{external_endpoint, ImportMetadata};
use strata_core::{Relation, RelationMetadata, RelationType, StrataErrorCode};

// ─── Relations ─────────────────────────────────────────────────────────────

#[test]
fn test_relation_id_derived_from_endpoints() {
    let base = RelationMetadata::Inheritance {
        base_type: "Base".into(),
    };
    let r = Relation::new(RelationType::Inherits, "a.ts:0:10", "Base", base);
    assert_eq!(r.id, "inherits:a.ts:0:10->Base");
    assert!(r.is_well_formed());
    assert!(!r.is_external());
}

#[test]
fn test_external_endpoint_helpers() {
    let r = Relation::new(
        RelationType::Imports,
        "a.ts:0:5",
        external_endpoint("@scope/pkg"),
        RelationMetadata::Import(ImportMetadata {
            is_type_only: true,
            ..Default::default()
        }),
    );
    assert!(r.is_external());
    assert_eq!(r.external_package(), Some("@scope/pkg"));
    assert!(r.is_type_only());
}

/// Metadata serializes as a tagged object with camelCase fields.
#[test]
fn test_relation_metadata_wire_shape() {
    let r = Relation::new(RelationType::Implements, "x", "Iface", RelationMetadata::Implementation {
        interface: "Iface".into(),
    });
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["type"], "implements");
    assert_eq!(json["metadata"]["relationship"], "implementation");
    assert_eq!(json["metadata"]["interface"], "Iface");

    let import = RelationMetadata::Import(ImportMetadata {
        module_path: Some("./b".into()),
        is_barrel_export: true,
        ..Default::default()
    });
    let json = serde_json::to_value(&import).unwrap();
    assert_eq!(json["relationship"], "import");
    assert_eq!(json["modulePath"], "./b");
    assert_eq!(json["isBarrelExport"], true);
}

/// Missing endpoints survive deserialization so the analyzer can drop them.
#[test]
fn test_malformed_relation_deserializes() {
    let r: Relation = serde_json::from_str(r#"{"id":"r1","type":"imports","to":"b.ts"}"#).unwrap();
    assert_eq!(r.from, "");
    assert!(!r.is_well_formed());
    assert_eq!(r.metadata, RelationMetadata::Unspecified);
}

/// Untagged metadata objects load by shape.
#[test]
fn test_untagged_metadata_loads_by_shape() {
    let meta: RelationMetadata = serde_json::from_str(r#"{"isTypeOnly":true}"#).unwrap();
    assert_eq!(
        meta,
        RelationMetadata::Import(ImportMetadata {
            is_type_only: true,
            ..Default::default()
        })
    );
    let meta: RelationMetadata = serde_json::from_str("{}").unwrap();
    assert_eq!(meta, RelationMetadata::Unspecified);
    let meta: RelationMetadata = serde_json::from_str("null").unwrap();
    assert_eq!(meta, RelationMetadata::Unspecified);
    let meta: RelationMetadata =
        serde_json::from_str(r#"{"relationship":"inheritance","baseType":"Base"}"#).unwrap();
    assert_eq!(meta, RelationMetadata::Inheritance { base_type: "Base".into() });
    let meta: RelationMetadata = serde_json::from_str(r#"{"relationship":"calls"}"#).unwrap();
    assert_eq!(meta, RelationMetadata::Unspecified);
}

/// Serialized metadata loads back to the same variant.
#[test]
fn test_tagged_metadata_reloads() {
    let original = RelationMetadata::Import(ImportMetadata {
        module_path: Some("./b".into()),
        imported_names: vec!["x".into()],
        is_dynamic: true,
        ..Default::default()
    });
    let json = serde_json::to_string(&original).unwrap();
    let reloaded: RelationMetadata = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn test_unknown_relation_type_loads_as_other() {
    let r: Relation =
        serde_json::from_str(r#"{"id":"r1","type":"calls","from":"a.ts","to":"b.ts"}"#).unwrap();
    assert_eq!(r.relation_type, RelationType::Other);
    assert!(r.is_well_formed());

    let r: Relation = serde_json::from_str(r#"{"from":"a.ts","to":7}"#).unwrap();
    assert_eq!(r.relation_type, RelationType::Other);
    assert_eq!(r.id, "");
    assert!(!r.is_well_formed());
}

/// Relations written with bare metadata bags and no `type` still load.
#[test]
fn test_project_from_json_accepts_untyped_relations() {
    let project = ProjectInfo::from_json(
        r#"{
            "rootPath": "/p",
            "ast": [],
            "relations": [
                {"from": "a.ts", "to": "external:lodash", "metadata": {"isTypeOnly": true}},
                {"from": "b.ts", "to": "external:lodash", "metadata": {}},
                {"id": "c", "type": "calls", "from": "c.ts", "to": "d.ts"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(project.relations.len(), 3);
    assert!(project.relations[0].is_type_only());
    assert!(!project.relations[1].is_type_only());
    assert_eq!(project.relations[1].metadata, RelationMetadata::Unspecified);
    assert_eq!(project.relations[2].relation_type, RelationType::Other);
}

// ─── Project input ─────────────────────────────────────────────────────────

#[test]
fn test_project_from_json_requires_root_path() {
    let err = ProjectInfo::from_json(r#"{"rootPath":"","ast":[],"relations":[]}"#).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingRootPath));
    assert_eq!(err.error_code(), "ANALYSIS_MISSING_ROOT_PATH");
}

#[test]
fn test_project_from_json_requires_arrays() {
    let err = ProjectInfo::from_json(r#"{"rootPath":"/p","ast":[],"relations":{}}"#).unwrap_err();
    match err {
        AnalysisError::InvalidInput { message } => assert!(message.contains("relations")),
        other => panic!("unexpected error: {other}"),
    }
    let err = ProjectInfo::from_json(r#"{"rootPath":"/p","relations":[]}"#).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidInput { .. }));
}

#[test]
fn test_project_from_json_accepts_minimal_input() {
    let project = ProjectInfo::from_json(r#"{"rootPath":"/p","ast":[],"relations":[]}"#).unwrap();
    assert_eq!(project.root_path, "/p");
    assert!(project.package.is_none());
    assert!(project.validate().is_ok());
}

// ─── Package metadata ──────────────────────────────────────────────────────

#[test]
fn test_declared_dependencies_in_group_order() {
    let package = PackageInfo::from_json_str(
        r#"{
            "name": "demo",
            "dependencies": {"react": "^18.0.0", "axios": "1.6.0"},
            "devDependencies": {"vitest": "~1.2.0"},
            "peerDependencies": {"react-dom": ">=18"}
        }"#,
    )
    .unwrap();
    let declared = package.declared_dependencies();
    let names: Vec<&str> = declared.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["axios", "react", "vitest", "react-dom"]);
    assert_eq!(declared[2].kind, DependencyKind::Development);
    assert_eq!(declared[3].kind, DependencyKind::Peer);
}

// ─── Files and docs ────────────────────────────────────────────────────────

#[test]
fn test_source_extension_parsing() {
    assert_eq!(SourceExtension::from_extension(".TS"), Some(SourceExtension::Ts));
    assert_eq!(SourceExtension::from_extension("jsx"), Some(SourceExtension::Jsx));
    assert_eq!(SourceExtension::from_extension(".py"), None);

    let file = FileInfo::from_content("src/app.tsx", "let a = 1;\nlet b = 2;\n");
    assert_eq!(file.name, "app.tsx");
    assert_eq!(file.extension, ".tsx");
    assert_eq!(file.line_count, 2);
    assert_eq!(file.source_extension(), Some(SourceExtension::Tsx));
    assert!(file.content_hash.is_some());
}

#[test]
fn test_empty_jsdoc() {
    let mut doc = JSDocInfo::default();
    assert!(doc.is_empty());
    doc.deprecated = true;
    assert!(!doc.is_empty());
}
