//! Weighted undirected graph keyed by node labels
//!
//! Thin wrapper over a petgraph `StableUnGraph` plus a label index, so callers
//! work with their own labels and the algorithms work with `NodeIndex`.

use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Deref;

use crate::error::GraphError;

/// Edge weight type
pub type Weight = f64;

/// Weighted undirected graph with hashable node labels
#[derive(Debug, Clone)]
pub struct PathGraph<N> {
    pub(crate) graph: StableUnGraph<N, Weight>,
    label_to_node: HashMap<N, NodeIndex>,
}

impl<N> PathGraph<N>
where
    N: Clone + Eq + Hash + Display,
{
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            label_to_node: HashMap::new(),
        }
    }

    /// Build a graph from `(u, v, weight)` triples
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (N, N, Weight)>,
    {
        let mut graph = Self::new();
        for (u, v, weight) in edges {
            graph.add_edge(u, v, weight)?;
        }
        Ok(graph)
    }

    /// Insert a node if it is not present yet
    pub fn add_node(&mut self, label: N) -> NodeIndex {
        if let Some(&node) = self.label_to_node.get(&label) {
            return node;
        }

        let node = self.graph.add_node(label.clone());
        self.label_to_node.insert(label, node);
        node
    }

    /// Add an undirected edge. Re-adding an existing edge overwrites its weight.
    pub fn add_edge(&mut self, u: N, v: N, weight: Weight) -> Result<(), GraphError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                u: u.to_string(),
                v: v.to_string(),
                weight,
            });
        }
        if u == v {
            return Err(GraphError::SelfLoop { node: u.to_string() });
        }

        let a = self.add_node(u);
        let b = self.add_node(v);

        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge] = weight,
            None => {
                self.graph.add_edge(a, b, weight);
            }
        }
        Ok(())
    }

    /// Remove an edge for good, returning its weight
    pub fn remove_edge(&mut self, u: &N, v: &N) -> Option<Weight> {
        let a = self.node_index(u)?;
        let b = self.node_index(v)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.remove_edge(edge)
    }

    pub fn weight(&self, u: &N, v: &N) -> Option<Weight> {
        let a = self.node_index(u)?;
        let b = self.node_index(v)?;
        self.weight_between(a, b)
    }

    pub fn contains_node(&self, label: &N) -> bool {
        self.label_to_node.contains_key(label)
    }

    pub fn node_index(&self, label: &N) -> Option<NodeIndex> {
        self.label_to_node.get(label).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Snapshot of every edge as `(u, v, weight)`, endpoints in insertion order
    pub fn edges(&self) -> Vec<(N, N, Weight)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                Some((self.graph[a].clone(), self.graph[b].clone(), self.graph[e]))
            })
            .collect()
    }
}

impl<N> PathGraph<N> {
    pub(crate) fn label(&self, node: NodeIndex) -> &N {
        &self.graph[node]
    }

    pub(crate) fn weight_between(&self, a: NodeIndex, b: NodeIndex) -> Option<Weight> {
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    /// Neighbours of `node` paired with the connecting edge weight
    pub(crate) fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, Weight)> + '_ {
        self.graph.edges(node).map(move |e| {
            let other = if e.source() == node { e.target() } else { e.source() };
            (other, *e.weight())
        })
    }

    /// Take the edge `a`–`b` out of the graph until the returned guard drops.
    ///
    /// The edge comes back with its original weight however the guard's scope
    /// is left, early returns included.
    pub(crate) fn remove_temporarily(&mut self, a: NodeIndex, b: NodeIndex) -> Option<EdgeRemoval<'_, N>> {
        let edge = self.graph.find_edge(a, b)?;
        let weight = self.graph.remove_edge(edge)?;
        Some(EdgeRemoval {
            graph: self,
            a,
            b,
            weight,
        })
    }
}

impl<N> Default for PathGraph<N>
where
    N: Clone + Eq + Hash + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped removal of one edge; restores it on drop
pub(crate) struct EdgeRemoval<'g, N> {
    graph: &'g mut PathGraph<N>,
    a: NodeIndex,
    b: NodeIndex,
    weight: Weight,
}

impl<N> EdgeRemoval<'_, N> {
    pub(crate) fn removed_weight(&self) -> Weight {
        self.weight
    }
}

impl<N> Deref for EdgeRemoval<'_, N> {
    type Target = PathGraph<N>;

    fn deref(&self) -> &Self::Target {
        &*self.graph
    }
}

impl<N> Drop for EdgeRemoval<'_, N> {
    fn drop(&mut self) {
        self.graph.graph.add_edge(self.a, self.b, self.weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_edges(graph: &PathGraph<&'static str>) -> Vec<(&'static str, &'static str, Weight)> {
        let mut edges: Vec<_> = graph
            .edges()
            .into_iter()
            .map(|(u, v, w)| if u <= v { (u, v, w) } else { (v, u, w) })
            .collect();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        edges
    }

    #[test]
    fn test_add_edge_is_undirected() {
        let graph = PathGraph::from_edges([("A", "B", 3.0), ("B", "C", 1.0)]).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight(&"A", &"B"), Some(3.0));
        assert_eq!(graph.weight(&"B", &"A"), Some(3.0));
        assert_eq!(graph.weight(&"A", &"C"), None);
    }

    #[test]
    fn test_readding_edge_overwrites_weight() {
        let mut graph = PathGraph::from_edges([("A", "B", 3.0)]).unwrap();
        graph.add_edge("B", "A", 7.0).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(&"A", &"B"), Some(7.0));
    }

    #[test]
    fn test_rejects_bad_edges() {
        let mut graph = PathGraph::new();

        assert!(matches!(
            graph.add_edge("A", "B", -1.0),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            graph.add_edge("A", "B", f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert_eq!(
            graph.add_edge("A", "A", 1.0),
            Err(GraphError::SelfLoop { node: "A".to_string() })
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = PathGraph::from_edges([("A", "B", 3.0), ("B", "C", 1.0)]).unwrap();

        assert_eq!(graph.remove_edge(&"C", &"B"), Some(1.0));
        assert_eq!(graph.remove_edge(&"C", &"B"), None);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_node(&"C"));
    }

    #[test]
    fn test_temporary_removal_restores_on_drop() {
        let mut graph =
            PathGraph::from_edges([("A", "B", 3.0), ("B", "C", 1.0), ("A", "C", 5.0)]).unwrap();
        let before = sorted_edges(&graph);
        let a = graph.node_index(&"A").unwrap();
        let b = graph.node_index(&"B").unwrap();

        {
            let removal = graph.remove_temporarily(a, b).unwrap();
            assert_eq!(removal.removed_weight(), 3.0);
            assert_eq!(removal.edge_count(), 2);
            assert_eq!(removal.weight(&"A", &"B"), None);
        }

        assert_eq!(sorted_edges(&graph), before);
    }

    #[test]
    fn test_neighbors_report_other_endpoint() {
        let graph = PathGraph::from_edges([("A", "B", 3.0), ("C", "A", 5.0)]).unwrap();
        let a = graph.node_index(&"A").unwrap();

        let mut seen: Vec<_> = graph
            .neighbors(a)
            .map(|(n, w)| (*graph.label(n), w))
            .collect();
        seen.sort_by(|x, y| x.0.cmp(y.0));

        assert_eq!(seen, vec![("B", 3.0), ("C", 5.0)]);
    }
}
