//! Circular dependency detection: DFS with a recursion stack over a petgraph
//! DiGraph of raw relation endpoints.

use petgraph::graph::{DiGraph, NodeIndex};
use strata_core::types::relation::Relation;
use strata_core::{FxHashMap, FxHashSet};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CycleReport {
    pub cycles: Vec<Vec<String>>,
    /// Some branch exceeded the depth cap and was not explored.
    pub truncated: bool,
}

/// Graph over every endpoint (node ids and `external:` ids alike), vertices
/// in first-seen order.
pub fn build_graph(relations: &[&Relation]) -> DiGraph<String, ()> {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut index: FxHashMap<&str, NodeIndex> = FxHashMap::default();
    for &relation in relations {
        let from = vertex(&mut index, &mut graph, &relation.from);
        let to = vertex(&mut index, &mut graph, &relation.to);
        graph.add_edge(from, to, ());
    }
    graph
}

fn vertex<'r>(
    index: &mut FxHashMap<&'r str, NodeIndex>,
    graph: &mut DiGraph<String, ()>,
    name: &'r str,
) -> NodeIndex {
    *index
        .entry(name)
        .or_insert_with(|| graph.add_node(name.to_string()))
}

/// Key under which rotations and reorderings of one cycle coincide.
pub fn canonical_key(cycle: &[String]) -> String {
    let mut sorted: Vec<&str> = cycle.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join("\u{1f}")
}

struct Search<'g> {
    graph: &'g DiGraph<String, ()>,
    /// Successors in edge insertion order.
    successors: Vec<Vec<NodeIndex>>,
    visited: Vec<bool>,
    on_stack: Vec<bool>,
    path: Vec<NodeIndex>,
    seen: FxHashSet<String>,
    report: CycleReport,
    max_depth: usize,
}

impl Search<'_> {
    fn visit(&mut self, v: NodeIndex, depth: usize) {
        if depth >= self.max_depth {
            self.report.truncated = true;
            return;
        }
        self.visited[v.index()] = true;
        self.on_stack[v.index()] = true;
        self.path.push(v);

        for i in 0..self.successors[v.index()].len() {
            let w = self.successors[v.index()][i];
            if self.on_stack[w.index()] {
                self.record_cycle(w);
            } else if !self.visited[w.index()] {
                self.visit(w, depth + 1);
            }
        }

        self.path.pop();
        self.on_stack[v.index()] = false;
    }

    fn record_cycle(&mut self, start: NodeIndex) {
        let Some(pos) = self.path.iter().position(|&p| p == start) else {
            return;
        };
        let cycle: Vec<String> = self.path[pos..]
            .iter()
            .map(|&i| self.graph[i].clone())
            .collect();
        if self.seen.insert(canonical_key(&cycle)) {
            self.report.cycles.push(cycle);
        }
    }
}

/// Every distinct cycle reachable within `max_depth` nested visits.
pub fn detect_cycles(graph: &DiGraph<String, ()>, max_depth: usize) -> CycleReport {
    let successors = graph
        .node_indices()
        .map(|v| {
            // petgraph yields neighbors newest-first.
            let mut next: Vec<NodeIndex> = graph.neighbors(v).collect();
            next.reverse();
            next
        })
        .collect();

    let mut search = Search {
        graph,
        successors,
        visited: vec![false; graph.node_count()],
        on_stack: vec![false; graph.node_count()],
        path: Vec::new(),
        seen: FxHashSet::default(),
        report: CycleReport::default(),
        max_depth,
    };

    for v in graph.node_indices() {
        if !search.visited[v.index()] {
            search.visit(v, 0);
        }
    }

    if search.report.truncated {
        tracing::warn!(max_depth, "cycle search truncated at depth cap");
    }
    search.report
}
