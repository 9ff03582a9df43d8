//! Internal and external dependency aggregation.
//!
//! Both aggregations preserve first-seen order of their keys.

use strata_core::types::relation::Relation;
use strata_core::FxHashMap;

use super::filter::NodeFileIndex;
use super::types::{ExternalDependency, InternalDependency};
use crate::paths;

fn push_new_names(names: &mut Vec<String>, incoming: &[String]) {
    for name in incoming {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
}

/// Absolute path of an import target.
///
/// Relative module paths are joined onto the importer's directory, then onto
/// the root; anything without a recognized source extension gets `.ts`.
pub fn resolve_target_path(
    root: &str,
    from_file: &str,
    to_file: &str,
    module_path: Option<&str>,
) -> String {
    let target = match module_path {
        Some(spec) if paths::is_path_specifier(spec) => {
            paths::join(paths::parent_dir(from_file), spec)
        }
        _ => paths::normalize(to_file),
    };
    paths::with_module_extension(paths::join(root, &target))
}

/// Merge non-external relations by resolved `from->to` file pair.
///
/// With `skip_same_file`, pairs whose endpoints resolve to one file are left out.
pub fn aggregate_internal(
    relations: &[&Relation],
    index: &NodeFileIndex<'_>,
    root: &str,
    skip_same_file: bool,
) -> Vec<InternalDependency> {
    let mut order: Vec<InternalDependency> = Vec::new();
    let mut by_key: FxHashMap<String, usize> = FxHashMap::default();

    for relation in relations.iter().filter(|r| !r.is_external()) {
        let from = index.resolve(&relation.from);
        let to = index.resolve(&relation.to);
        if skip_same_file && from == to {
            continue;
        }
        let meta = relation.import_metadata();
        let names: &[String] = meta.map(|m| m.imported_names.as_slice()).unwrap_or(&[]);
        let key = format!("{from}->{to}");

        match by_key.get(&key) {
            Some(&i) => {
                let existing = &mut order[i];
                existing.usage_count += 1;
                push_new_names(&mut existing.imported_names, names);
            }
            None => {
                let module_path = meta.and_then(|m| m.module_path.clone());
                by_key.insert(key, order.len());
                order.push(InternalDependency {
                    from: from.to_string(),
                    to: to.to_string(),
                    resolved_path: resolve_target_path(root, from, to, module_path.as_deref()),
                    module_path,
                    imported_names: names.to_vec(),
                    usage_count: 1,
                    is_barrel_export: meta.is_some_and(|m| m.is_barrel_export),
                    is_type_only: meta.is_some_and(|m| m.is_type_only),
                    is_namespace: meta.is_some_and(|m| m.is_namespace),
                    is_dynamic: meta.is_some_and(|m| m.is_dynamic),
                    condition: meta.and_then(|m| m.condition.clone()),
                });
            }
        }
    }
    order
}

/// Merge `external:` relations by package name.
pub fn aggregate_external(
    relations: &[&Relation],
    index: &NodeFileIndex<'_>,
) -> Vec<ExternalDependency> {
    let mut order: Vec<ExternalDependency> = Vec::new();
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();

    for relation in relations {
        let Some(name) = relation.external_package().filter(|n| !n.is_empty()) else {
            continue;
        };
        let i = *by_name.entry(name.to_string()).or_insert_with(|| {
            order.push(ExternalDependency {
                name: name.to_string(),
                is_scoped: name.starts_with('@'),
                ..Default::default()
            });
            order.len() - 1
        });
        let dep = &mut order[i];
        let meta = relation.import_metadata();

        dep.usage_count += 1;
        let file = index.resolve(&relation.from);
        if !dep.files.iter().any(|f| f == file) {
            dep.files.push(file.to_string());
        }
        if relation.is_type_only() {
            dep.type_only_imports += 1;
        } else {
            dep.runtime_imports += 1;
        }
        if let Some(meta) = meta {
            push_new_names(&mut dep.imported_names, &meta.imported_names);
            dep.is_namespace |= meta.is_namespace;
            dep.is_dynamic |= meta.is_dynamic;
            if let Some(condition) = &meta.condition {
                if !dep.conditions.contains(condition) {
                    dep.conditions.push(condition.clone());
                }
            }
        }
    }
    order
}
