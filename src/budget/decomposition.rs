//! Budget Decomposition
//!
//! A budget over `m` subjects is decomposable for `n` citizens when it can be
//! split into `n` equal shares of `C / n` (with `C` the total budget), each
//! citizen spending only on subjects they approve of. That holds exactly when
//! the network
//!
//! ```text
//! s → c_i   capacity C / n
//! c_i → s_j capacity C / n   (citizen i approves subject j)
//! s_j → t   capacity budget[j]
//! ```
//!
//! carries a flow of value `C`.

use petgraph::algo::ford_fulkerson;
use petgraph::graph::DiGraph;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::error::BudgetError;

pub const DEFAULT_FLOW_TOLERANCE: f64 = 1e-9;

/// Outcome of a decomposition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Decomposition {
    /// `contributions[i][j]` is what citizen `i` gives to subject `j`
    Feasible(Vec<Vec<f64>>),
    Infeasible,
}

impl Decomposition {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Decomposition::Feasible(_))
    }

    pub fn contributions(&self) -> Option<&[Vec<f64>]> {
        match self {
            Decomposition::Feasible(rows) => Some(rows),
            Decomposition::Infeasible => None,
        }
    }
}

/// Checks budgets against approval preferences via max-flow
#[derive(Debug, Clone, Copy)]
pub struct BudgetDecomposer {
    tolerance: f64,
}

impl BudgetDecomposer {
    /// `tolerance` is relative to the total budget
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn decompose(
        &self,
        budget: &[f64],
        preferences: &[BTreeSet<usize>],
    ) -> Result<Decomposition, BudgetError> {
        if preferences.is_empty() {
            return Err(BudgetError::EmptyElectorate);
        }
        if let Some((subject, &amount)) = budget
            .iter()
            .enumerate()
            .find(|(_, a)| !a.is_finite() || **a < 0.0)
        {
            return Err(BudgetError::InvalidBudget { subject, amount });
        }
        for (citizen, approved) in preferences.iter().enumerate() {
            if let Some(&subject) = approved.iter().find(|&&j| j >= budget.len()) {
                return Err(BudgetError::UnknownSubject { citizen, subject });
            }
        }

        let total: f64 = budget.iter().sum();
        let share = total / preferences.len() as f64;
        let slack = self.tolerance * total.max(1.0);

        let mut network: DiGraph<String, f64> = DiGraph::new();
        let source = network.add_node("s".to_string());
        let sink = network.add_node("t".to_string());
        let subjects: Vec<_> = (0..budget.len())
            .map(|j| network.add_node(format!("s{j}")))
            .collect();

        for (j, &amount) in budget.iter().enumerate() {
            network.add_edge(subjects[j], sink, amount);
        }

        // arcs[i] lists (subject, edge) for every subject citizen i approves
        let mut arcs = Vec::with_capacity(preferences.len());
        for (i, approved) in preferences.iter().enumerate() {
            let citizen = network.add_node(format!("c{i}"));
            network.add_edge(source, citizen, share);
            arcs.push(
                approved
                    .iter()
                    .map(|&j| (j, network.add_edge(citizen, subjects[j], share)))
                    .collect::<Vec<_>>(),
            );
        }

        let (flow, flows) = ford_fulkerson(&network, source, sink);
        debug!(
            flow,
            total,
            share,
            arcs = network.edge_count(),
            "max flow computed"
        );

        if (flow - total).abs() > slack {
            info!(
                "Budget of {} is not decomposable among {} citizens (max flow {})",
                total,
                preferences.len(),
                flow
            );
            return Ok(Decomposition::Infeasible);
        }

        let contributions = arcs
            .iter()
            .map(|row| {
                let mut given = vec![0.0; budget.len()];
                for &(j, arc) in row {
                    given[j] = flows[arc.index()].max(0.0);
                }
                given
            })
            .collect();

        info!("Budget of {} decomposes into {} shares of {}", total, preferences.len(), share);
        Ok(Decomposition::Feasible(contributions))
    }
}

impl Default for BudgetDecomposer {
    fn default() -> Self {
        Self::new(DEFAULT_FLOW_TOLERANCE)
    }
}
