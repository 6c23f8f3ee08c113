//! Diagnostic hooks for the payment computation
//!
//! The calculator reports what it finds through a [`PaymentObserver`] handed
//! to it by the caller instead of touching global logger state.

use std::fmt::Display;
use tracing::{debug, info, warn};

use crate::network::Weight;

/// Receives structured events while payments are computed.
///
/// Every method defaults to a no-op.
pub trait PaymentObserver {
    /// The cheapest path through the untouched graph
    fn path_found<N: Display>(&mut self, _path: &[N], _cost: Weight) {}

    /// The best route once `removed` is taken out
    fn alternative_found<N: Display>(&mut self, _removed: (&N, &N), _path: &[N], _cost: Weight) {}

    /// No route survives removing this edge
    fn edge_essential<N: Display>(&mut self, _edge: (&N, &N)) {}

    fn payment_computed<N: Display>(&mut self, _edge: (&N, &N), _payment: Weight) {}
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PaymentObserver for NoopObserver {}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PaymentObserver for TracingObserver {
    fn path_found<N: Display>(&mut self, path: &[N], cost: Weight) {
        info!(cost, hops = path.len().saturating_sub(1), "Cheapest path: {}", format_path(path));
    }

    fn alternative_found<N: Display>(&mut self, removed: (&N, &N), path: &[N], cost: Weight) {
        debug!(
            cost,
            "Without ({}, {}): {}",
            removed.0,
            removed.1,
            format_path(path)
        );
    }

    fn edge_essential<N: Display>(&mut self, edge: (&N, &N)) {
        warn!("Edge ({}, {}) is essential: no route survives its removal", edge.0, edge.1);
    }

    fn payment_computed<N: Display>(&mut self, edge: (&N, &N), payment: Weight) {
        info!(payment, "Payment for ({}, {})", edge.0, edge.1);
    }
}

/// Render a path as `A → B → C`
pub fn format_path<N: Display>(path: &[N]) -> String {
    path.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}
