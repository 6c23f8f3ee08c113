//! VCG Edge Payments
//!
//! For every edge on the cheapest source → target path, the payment is the
//! externality that edge's presence imposes on the rest of the path:
//!
//! ```text
//! cost_with_uv    = -(total_cost - w(u, v))
//! cost_without_uv = -cost(cheapest path with (u, v) removed)
//! payment(u, v)   = cost_without_uv - cost_with_uv
//! ```
//!
//! Payments are therefore never positive. Edges are removed one at a time and
//! put back with their original weight before the next one is examined.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::hash::Hash;

use super::observer::{PaymentObserver, TracingObserver};
use crate::error::{PaymentError, Result};
use crate::network::cheapest::cheapest_route;
use crate::network::{PathGraph, Weight};

/// What to do when removing a path edge disconnects source from target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisconnectPolicy {
    /// Abort with [`PaymentError::UnreachableAfterRemoval`]
    #[default]
    Fail,

    /// Treat the alternative as infinitely expensive; the payment becomes `-inf`
    #[value(alias = "inf")]
    Infinite,
}

impl Display for DisconnectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisconnectPolicy::Fail => write!(f, "fail"),
            DisconnectPolicy::Infinite => write!(f, "infinite"),
        }
    }
}

/// Payments keyed by edge, kept in path order, along with the path they price
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMap<N> {
    path: Vec<N>,
    path_cost: Weight,
    entries: Vec<((N, N), Weight)>,
}

impl<N: PartialEq> PaymentMap<N> {
    fn for_path(path: Vec<N>, path_cost: Weight) -> Self {
        Self {
            entries: Vec::with_capacity(path.len().saturating_sub(1)),
            path,
            path_cost,
        }
    }

    /// Nodes of the cheapest path, source first
    pub fn path(&self) -> &[N] {
        &self.path
    }

    pub fn path_cost(&self) -> Weight {
        self.path_cost
    }

    /// Payment for the edge `(u, v)`, endpoints in path order
    pub fn get(&self, u: &N, v: &N) -> Option<Weight> {
        self.entries
            .iter()
            .find(|((a, b), _)| a == u && b == v)
            .map(|(_, payment)| *payment)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(N, N), Weight)> {
        self.entries.iter().map(|(edge, payment)| (edge, *payment))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all payments
    pub fn total(&self) -> Weight {
        self.entries.iter().map(|(_, payment)| payment).sum()
    }
}

impl<N> IntoIterator for PaymentMap<N> {
    type Item = ((N, N), Weight);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<N: Display> Display for PaymentMap<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, ((u, v), payment)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {}): {}", u, v, payment)?;
        }
        write!(f, "}}")
    }
}

/// Computes VCG payments for the edges of a cheapest path
#[derive(Debug, Clone, Default)]
pub struct PathPaymentCalculator<O = TracingObserver> {
    policy: DisconnectPolicy,
    observer: O,
}

impl PathPaymentCalculator<TracingObserver> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: PaymentObserver> PathPaymentCalculator<O> {
    pub fn with_observer(observer: O) -> Self {
        Self {
            policy: DisconnectPolicy::default(),
            observer,
        }
    }

    pub fn with_policy(mut self, policy: DisconnectPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DisconnectPolicy {
        self.policy
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Payment for every edge on the cheapest `source` → `target` path.
    ///
    /// The graph is borrowed mutably because path edges are taken out one at a
    /// time; each is restored before this returns, on error paths too.
    pub fn compute_payments<N>(
        &mut self,
        graph: &mut PathGraph<N>,
        source: &N,
        target: &N,
    ) -> Result<PaymentMap<N>>
    where
        N: Clone + Eq + Hash + Ord + Display,
    {
        let from = graph
            .node_index(source)
            .ok_or_else(|| PaymentError::NodeNotFound { node: source.to_string() })?;
        let to = graph
            .node_index(target)
            .ok_or_else(|| PaymentError::NodeNotFound { node: target.to_string() })?;

        let (route, total_cost) =
            cheapest_route(graph, from, to).ok_or_else(|| PaymentError::UnreachableTarget {
                from: source.to_string(),
                to: target.to_string(),
            })?;

        let labels: Vec<N> = route.iter().map(|&n| graph.label(n).clone()).collect();
        self.observer.path_found(&labels, total_cost);

        let mut payments = PaymentMap::for_path(labels.clone(), total_cost);

        for (i, pair) in route.windows(2).enumerate() {
            let (u, v) = (&labels[i], &labels[i + 1]);

            // `route` was walked along edges of this graph, and every earlier
            // removal was restored when its guard dropped
            let Some(removal) = graph.remove_temporarily(pair[0], pair[1]) else {
                unreachable!("edge ({u}, {v}) of the cheapest path is missing from the graph");
            };
            let weight = removal.removed_weight();
            let cost_with_uv = -(total_cost - weight);

            let cost_without_uv = match cheapest_route(&*removal, from, to) {
                Some((alternative, cost)) => {
                    let alternative: Vec<N> =
                        alternative.iter().map(|&n| removal.label(n).clone()).collect();
                    self.observer.alternative_found((u, v), &alternative, cost);
                    -cost
                }
                None => match self.policy {
                    DisconnectPolicy::Fail => {
                        return Err(PaymentError::UnreachableAfterRemoval {
                            u: u.to_string(),
                            v: v.to_string(),
                        });
                    }
                    DisconnectPolicy::Infinite => {
                        self.observer.edge_essential((u, v));
                        Weight::NEG_INFINITY
                    }
                },
            };
            drop(removal);

            let payment = cost_without_uv - cost_with_uv;
            self.observer.payment_computed((u, v), payment);
            payments.entries.push(((u.clone(), v.clone()), payment));
        }

        Ok(payments)
    }
}
