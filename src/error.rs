//! Error types for graph construction, path payments and budget decomposition
//!
//! Node labels are carried as formatted strings so the errors stay non-generic
//! and can be reported directly by the binaries.

use thiserror::Error;

/// Errors raised while building a [`PathGraph`](crate::network::PathGraph)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Weight is negative, NaN or infinite
    #[error("invalid weight {weight} on edge ({u}, {v}): weights must be finite and non-negative")]
    InvalidWeight { u: String, v: String, weight: f64 },

    #[error("self loop on node {node} is not allowed")]
    SelfLoop { node: String },
}

/// Errors raised by [`PathPaymentCalculator`](crate::mechanism::PathPaymentCalculator)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    /// Source or target is not a node of the graph
    #[error("node {node} not found in graph")]
    NodeNotFound { node: String },

    /// No path exists in the untouched graph
    #[error("target {to} is unreachable from source {from}")]
    UnreachableTarget { from: String, to: String },

    /// Removing a path edge disconnects source from target
    #[error("removing edge ({u}, {v}) leaves the target unreachable")]
    UnreachableAfterRemoval { u: String, v: String },
}

/// Errors raised by [`BudgetDecomposer`](crate::budget::BudgetDecomposer)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BudgetError {
    #[error("cannot decompose a budget over zero citizens")]
    EmptyElectorate,

    #[error("invalid budget {amount} for subject {subject}: amounts must be finite and non-negative")]
    InvalidBudget { subject: usize, amount: f64 },

    /// A preference names a subject index outside the budget
    #[error("citizen {citizen} approves unknown subject {subject}")]
    UnknownSubject { citizen: usize, subject: usize },
}

pub type Result<T, E = PaymentError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = PaymentError::UnreachableAfterRemoval {
            u: "A".into(),
            v: "D".into(),
        };
        assert_eq!(err.to_string(), "removing edge (A, D) leaves the target unreachable");

        let err = BudgetError::UnknownSubject { citizen: 2, subject: 7 };
        assert_eq!(err.to_string(), "citizen 2 approves unknown subject 7");
    }
}
