//! Dependency graph implementation using petgraph.
//!
//! Provides a directed, unweighted graph over package names. Edges point from
//! a dependency to its dependent, so an edge `(a, b)` reads "a must be
//! installed before b".

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};

/// A directed graph of package names.
///
/// The graph uses petgraph's `StableDiGraph` internally so node indices
/// survive vertex removal. Every mutation is total: invalid input is a
/// silent no-op and the return value reports whether anything changed.
///
/// # Example
///
/// ```rust
/// use pkgorder::graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
///
/// // "libc" must be installed before "openssl"; both vertices are created.
/// graph.add_edge("libc", "openssl");
/// graph.add_edge("openssl", "curl");
///
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.adjacent_vertices_of("libc"), Some(vec!["openssl"]));
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: StableDiGraph<String, ()>,
    /// Maps package names to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Creates a new empty dependency graph.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pkgorder::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::new();
    /// assert_eq!(graph.vertex_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_indices: HashMap::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `vertices` - Expected number of vertices
    /// * `edges` - Expected number of edges
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            graph: StableDiGraph::with_capacity(vertices, edges),
            node_indices: HashMap::with_capacity(vertices),
        }
    }

    /// Adds a vertex to the graph.
    ///
    /// # Returns
    ///
    /// `true` if the vertex was inserted, `false` if it already existed.
    pub fn add_vertex(&mut self, name: &str) -> bool {
        if self.node_indices.contains_key(name) {
            return false;
        }
        self.insert_vertex(name);
        true
    }

    fn insert_vertex(&mut self, name: &str) -> NodeIndex {
        let idx = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    fn index_or_insert(&mut self, name: &str) -> NodeIndex {
        match self.node_indices.get(name) {
            Some(&idx) => idx,
            None => self.insert_vertex(name),
        }
    }

    /// Removes a vertex together with every edge that starts or ends at it.
    ///
    /// # Returns
    ///
    /// `true` if the vertex existed.
    pub fn remove_vertex(&mut self, name: &str) -> bool {
        let Some(idx) = self.node_indices.remove(name) else {
            return false;
        };
        self.graph.remove_node(idx);
        true
    }

    /// Adds the edge `from -> to`.
    ///
    /// Missing endpoints are created first. Parallel edges are never added.
    ///
    /// # Returns
    ///
    /// `true` if a new edge was added, `false` if it was already present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pkgorder::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// assert!(graph.add_edge("a", "b"));
    /// assert!(!graph.add_edge("a", "b")); // Already present
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let from_idx = self.index_or_insert(from);
        let to_idx = self.index_or_insert(to);

        if self.graph.contains_edge(from_idx, to_idx) {
            return false;
        }
        self.graph.add_edge(from_idx, to_idx, ());
        true
    }

    /// Removes the edge `from -> to`.
    ///
    /// # Returns
    ///
    /// `true` if both endpoints exist and the edge was present.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(&from_idx), Some(&to_idx)) =
            (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };

        match self.graph.find_edge(from_idx, to_idx) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    /// Returns every vertex name, sorted.
    pub fn all_vertices(&self) -> BTreeSet<&str> {
        self.node_indices.keys().map(String::as_str).collect()
    }

    /// Returns the direct successors of a vertex in edge-insertion order.
    ///
    /// # Returns
    ///
    /// `None` if the vertex does not exist.
    pub fn adjacent_vertices_of(&self, name: &str) -> Option<Vec<&str>> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Returns the vertices with an edge into `name`, in edge-insertion order.
    ///
    /// With edges pointing dependency -> dependent, these are the packages
    /// that must be installed before `name`.
    pub fn incoming_vertices_of(&self, name: &str) -> Option<Vec<&str>> {
        self.neighbors(name, Direction::Incoming)
    }

    fn neighbors(&self, name: &str, dir: Direction) -> Option<Vec<&str>> {
        let &idx = self.node_indices.get(name)?;

        // petgraph walks a node's edge list newest-first
        let mut names: Vec<&str> = self
            .graph
            .neighbors_directed(idx, dir)
            .filter_map(|n| self.graph.node_weight(n))
            .map(String::as_str)
            .collect();
        names.reverse();
        Some(names)
    }

    /// Returns true if the edge `from -> to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Returns the total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks if a vertex exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Checks if the graph contains cycles anywhere.
    ///
    /// This is a whole-graph check. Resolution queries only fail on cycles
    /// they actually have to traverse.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pkgorder::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_edge("a", "b");
    /// graph.add_edge("b", "a"); // Creates a cycle
    ///
    /// assert!(graph.has_cycles());
    /// ```
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Detects and returns all cycles in the graph.
    ///
    /// Each strongly connected component with more than one vertex, or a
    /// single vertex with a self-loop, is reported once. Results are sorted.
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            let is_cycle = match scc.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                members => members.len() > 1,
            };
            if !is_cycle {
                continue;
            }

            let nodes = scc
                .iter()
                .filter_map(|&idx| self.graph.node_weight(idx))
                .cloned()
                .collect();
            cycles.push(CycleInfo { nodes });
        }

        cycles.sort();
        cycles
    }
}

/// Information about a circular dependency.
///
/// Contains the list of package names that form the cycle.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CycleInfo {
    /// The package names in the cycle (the last connects back to the first)
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Creates cycle information from a list of package names.
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// Returns a formatted string representation of the cycle path.
    ///
    /// For example: "a -> b -> c -> a"
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        format!("{} -> {}", self.nodes.join(" -> "), first)
    }

    /// Returns true if the named package is part of the cycle.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    /// Returns the number of packages in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::fmt::Display for CycleInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.cycle_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_graph() {
        let graph = DependencyGraph::new();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
        assert!(graph.all_vertices().is_empty());
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_vertex("react"));
        assert!(!graph.add_vertex("react"));

        assert_eq!(graph.vertex_count(), 1);
        assert!(graph.contains("react"));
    }

    #[test]
    fn test_add_edge_creates_missing_vertices() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_edge("v1", "v2"));

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let all = graph.all_vertices();
        assert!(all.contains("v1"));
        assert!(all.contains("v2"));
    }

    #[test]
    fn test_add_edge_no_parallel_edges() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "b");

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.adjacent_vertices_of("a"), Some(vec!["b"]));
    }

    #[test]
    fn test_reverse_edge_is_distinct() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("a", "b"));
        assert!(graph.has_edge("b", "a"));
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");

        assert!(graph.remove_edge("a", "b"));
        assert_eq!(graph.edge_count(), 0);
        // Vertices stay behind
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_remove_edge_invalid_is_noop() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");

        assert!(!graph.remove_edge("b", "a"));
        assert!(!graph.remove_edge("a", "missing"));
        assert!(!graph.remove_edge("missing", "b"));
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains("missing"));
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "b");
        graph.add_edge("a", "c");

        assert!(graph.remove_vertex("b"));
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains("b"));
        assert_eq!(graph.adjacent_vertices_of("a"), Some(vec!["c"]));
        assert_eq!(graph.adjacent_vertices_of("c"), Some(vec![]));
    }

    #[test]
    fn test_remove_vertex_keeps_other_lookups_valid() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("c", "d");

        graph.remove_vertex("a");
        assert!(graph.has_edge("c", "d"));

        // Reinsert after removal
        graph.add_edge("a", "d");
        assert_eq!(graph.incoming_vertices_of("d"), Some(vec!["c", "a"]));
    }

    #[test]
    fn test_remove_missing_vertex_is_noop() {
        let mut graph = DependencyGraph::new();
        graph.add_vertex("a");

        assert!(!graph.remove_vertex("z"));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_adjacent_vertices_insertion_order() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("root", "x");
        graph.add_edge("root", "y");
        graph.add_edge("root", "z");

        assert_eq!(graph.adjacent_vertices_of("root"), Some(vec!["x", "y", "z"]));
    }

    #[test]
    fn test_adjacent_vertices_of_missing() {
        let graph = DependencyGraph::new();
        assert!(graph.adjacent_vertices_of("nonexistent").is_none());
        assert!(graph.incoming_vertices_of("nonexistent").is_none());
    }

    #[test]
    fn test_edge_count_sums_adjacency_lists() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");

        let total: usize = graph
            .all_vertices()
            .iter()
            .map(|v| graph.adjacent_vertices_of(v).map_or(0, |adj| adj.len()))
            .sum();
        assert_eq!(graph.edge_count(), total);
        assert_eq!(total, 3);
    }

    #[test]
    fn test_has_cycles_no_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");

        assert!(!graph.has_cycles());
        assert!(graph.detect_cycles().is_empty());
    }

    #[test]
    fn test_detect_cycles() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "a"); // Creates cycle: a -> b -> c -> a
        graph.add_edge("c", "d"); // d is not part of the cycle

        let cycles = graph.detect_cycles();
        assert_eq!(cycles.len(), 1);

        let cycle = &cycles[0];
        assert_eq!(cycle.len(), 3);
        assert!(cycle.contains("a"));
        assert!(cycle.contains("b"));
        assert!(cycle.contains("c"));
        assert!(!cycle.contains("d"));
    }

    #[test]
    fn test_detect_cycles_self_loop() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("self-ref", "self-ref");

        let cycles = graph.detect_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].nodes, vec!["self-ref"]);
        assert_eq!(cycles[0].cycle_path(), "self-ref -> self-ref");
    }

    #[test]
    fn test_cycle_path_format() {
        let cycle = CycleInfo::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(cycle.cycle_path(), "a -> b -> c -> a");
        assert_eq!(cycle.to_string(), "a -> b -> c -> a");

        assert_eq!(CycleInfo::new(Vec::new()).cycle_path(), "");
    }
}
