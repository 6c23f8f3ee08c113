//! Cheapest Path Search
//!
//! Dijkstra with a reproducible tie-break. Among paths of equal total weight
//! the one with the fewest edges wins; among those, the lexicographically
//! smallest sequence of node labels.
//!
//! The search runs backwards from the target, recording `(cost, hops)` for
//! every node, then walks forward from the source always stepping to the
//! smallest-labelled neighbour that lies on a cheapest route. Hop counts
//! strictly decrease along that walk, so zero-weight edges cannot trap it in a
//! loop.

use petgraph::stable_graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use super::graph::{PathGraph, Weight};

/// Relative tolerance when comparing summed path costs
pub const COST_TOLERANCE: f64 = 1e-9;

/// A path through the graph together with its total weight
#[derive(Debug, Clone, PartialEq)]
pub struct CostedPath<N> {
    pub nodes: Vec<N>,
    pub cost: Weight,
}

impl<N> CostedPath<N> {
    /// Consecutive node pairs, in path order
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.nodes.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Cheapest path from `source` to `target`, or `None` if either label is
/// unknown or the target is unreachable
pub fn cheapest_path<N>(graph: &PathGraph<N>, source: &N, target: &N) -> Option<CostedPath<N>>
where
    N: Clone + Eq + Hash + Ord + Display,
{
    let from = graph.node_index(source)?;
    let to = graph.node_index(target)?;
    let (route, cost) = cheapest_route(graph, from, to)?;

    Some(CostedPath {
        nodes: route.iter().map(|&n| graph.label(n).clone()).collect(),
        cost,
    })
}

pub(crate) fn approx_eq(a: Weight, b: Weight) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= COST_TOLERANCE * scale
}

#[derive(Debug, Clone, Copy)]
struct Distance {
    cost: Weight,
    hops: usize,
}

impl Distance {
    fn same_as(&self, other: &Distance) -> bool {
        self.hops == other.hops && self.cost == other.cost
    }

    fn improves_on(&self, other: &Distance) -> bool {
        if approx_eq(self.cost, other.cost) {
            self.hops < other.hops
        } else {
            self.cost < other.cost
        }
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the cheapest first
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: Distance,
    node: NodeIndex,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cost
            .total_cmp(&self.distance.cost)
            .then_with(|| other.distance.hops.cmp(&self.distance.hops))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// Distances to `target` from every node that can reach it
fn distances_to<N>(graph: &PathGraph<N>, target: NodeIndex) -> HashMap<NodeIndex, Distance> {
    let mut best: HashMap<NodeIndex, Distance> = HashMap::new();
    let mut settled: HashSet<NodeIndex> = HashSet::new();
    let mut heap = BinaryHeap::new();

    let start = Distance { cost: 0.0, hops: 0 };
    best.insert(target, start);
    heap.push(Frontier { distance: start, node: target });

    while let Some(Frontier { distance, node }) = heap.pop() {
        // A later, fewer-hop entry within tolerance may have replaced this one.
        // Settling from the stale entry would leave no tight edge to walk.
        let current = best.get(&node).is_some_and(|b| b.same_as(&distance));
        if !current || !settled.insert(node) {
            continue;
        }

        for (next, weight) in graph.neighbors(node) {
            if settled.contains(&next) {
                continue;
            }
            let candidate = Distance {
                cost: distance.cost + weight,
                hops: distance.hops + 1,
            };
            let improved = best
                .get(&next)
                .map_or(true, |current| candidate.improves_on(current));
            if improved {
                best.insert(next, candidate);
                heap.push(Frontier { distance: candidate, node: next });
            }
        }
    }

    best
}

/// Node indices of the cheapest route and its summed edge weight
pub(crate) fn cheapest_route<N>(
    graph: &PathGraph<N>,
    source: NodeIndex,
    target: NodeIndex,
) -> Option<(Vec<NodeIndex>, Weight)>
where
    N: Ord,
{
    let distances = distances_to(graph, target);
    let mut here = *distances.get(&source)?;

    let mut route = vec![source];
    let mut cost = 0.0;
    let mut current = source;

    while current != target {
        let (next, weight, distance) = graph
            .neighbors(current)
            .filter_map(|(next, weight)| {
                let distance = *distances.get(&next)?;
                let tight = distance.hops + 1 == here.hops
                    && approx_eq(here.cost, distance.cost + weight);
                tight.then_some((next, weight, distance))
            })
            .min_by(|a, b| graph.label(a.0).cmp(graph.label(b.0)))?;

        route.push(next);
        cost += weight;
        current = next;
        here = distance;
    }

    Some((route, cost))
}
