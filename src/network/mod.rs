//! The Network
//!
//! Responsible for:
//! - Holding the weighted undirected graph, keyed by caller-supplied labels
//! - Finding cheapest paths with a reproducible tie-break

pub(crate) mod cheapest;
mod graph;

pub use cheapest::{cheapest_path, CostedPath, COST_TOLERANCE};
pub use graph::{PathGraph, Weight};
