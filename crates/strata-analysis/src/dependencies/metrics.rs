//! Depth metrics over the internal (file → file) dependency graph.

use std::collections::VecDeque;

use strata_core::constants::{AVERAGE_DEPTH_APPROXIMATION_THRESHOLD, MAX_BFS_ITERATIONS};
use strata_core::{FxHashMap, FxHashSet};

use super::types::{ExternalDependency, InternalDependency};

/// Adjacency over internal dependencies, vertices in first-seen order.
pub struct DependencyGraph<'d> {
    vertices: Vec<&'d str>,
    edges: FxHashMap<&'d str, Vec<&'d str>>,
}

impl<'d> DependencyGraph<'d> {
    pub fn new(deps: &'d [InternalDependency]) -> Self {
        let mut vertices = Vec::new();
        let mut known: FxHashSet<&str> = FxHashSet::default();
        let mut edges: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for dep in deps {
            for v in [dep.from.as_str(), dep.to.as_str()] {
                if known.insert(v) {
                    vertices.push(v);
                }
            }
            edges.entry(dep.from.as_str()).or_default().push(dep.to.as_str());
        }
        Self { vertices, edges }
    }

    fn successors(&self, v: &str) -> &[&'d str] {
        self.edges.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Longest BFS hop count from any unvisited start vertex.
    ///
    /// The second value reports whether a traversal hit the iteration cap.
    pub fn max_depth(&self) -> (usize, bool) {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut max_depth = 0;
        let mut capped = false;

        for &start in &self.vertices {
            if !visited.insert(start) {
                continue;
            }
            let mut queue = VecDeque::from([(start, 0usize)]);
            let mut iterations = 0;
            while let Some((v, depth)) = queue.pop_front() {
                iterations += 1;
                if iterations > MAX_BFS_ITERATIONS {
                    capped = true;
                    break;
                }
                max_depth = max_depth.max(depth);
                for &w in self.successors(v) {
                    if visited.insert(w) {
                        queue.push_back((w, depth + 1));
                    }
                }
            }
        }
        (max_depth, capped)
    }

    /// Mean depth of every edge reached by DFS from each root (a vertex that
    /// is never a target). Each root gets a fresh visited set.
    pub fn exact_average_depth(&self) -> f64 {
        let targets: FxHashSet<&str> = self.edges.values().flatten().copied().collect();
        let mut total = 0usize;
        let mut count = 0usize;

        for &root in self.vertices.iter().filter(|v| !targets.contains(*v)) {
            let mut visited: FxHashSet<&str> = FxHashSet::from_iter([root]);
            let mut stack = vec![(root, 0usize)];
            while let Some((v, depth)) = stack.pop() {
                for &w in self.successors(v) {
                    total += depth + 1;
                    count += 1;
                    if visited.insert(w) {
                        stack.push((w, depth + 1));
                    }
                }
            }
        }

        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
}

/// Exact below the approximation threshold, `count / 2` above it.
pub fn average_depth(deps: &[InternalDependency]) -> f64 {
    if deps.is_empty() {
        return 0.0;
    }
    if deps.len() > AVERAGE_DEPTH_APPROXIMATION_THRESHOLD {
        return deps.len() as f64 / 2.0;
    }
    DependencyGraph::new(deps).exact_average_depth()
}

/// Distinct importing files, and dependency records per importing file.
pub fn per_file(internal: &[InternalDependency], external: &[ExternalDependency]) -> (usize, f64) {
    let mut files: FxHashSet<&str> = FxHashSet::default();
    let mut records = 0usize;
    for dep in internal {
        files.insert(dep.from.as_str());
        records += 1;
    }
    for dep in external {
        for file in &dep.files {
            files.insert(file.as_str());
            records += 1;
        }
    }
    if files.is_empty() {
        (0, 0.0)
    } else {
        (files.len(), records as f64 / files.len() as f64)
    }
}
