//! VCG Paths
//!
//! Mechanism-design exercises on graphs:
//! - `network`: weighted undirected graphs and deterministic cheapest paths
//! - `mechanism`: VCG payments for the edges of a cheapest path
//! - `budget`: budget decomposition among citizens via max-flow
//!
//! `config` and `scenario` serve the binaries.

pub mod budget;
pub mod config;
pub mod error;
pub mod mechanism;
pub mod network;
pub mod scenario;

pub use budget::{BudgetDecomposer, Decomposition};
pub use error::{BudgetError, GraphError, PaymentError};
pub use mechanism::{DisconnectPolicy, PathPaymentCalculator, PaymentMap, PaymentObserver};
pub use network::{cheapest_path, CostedPath, PathGraph, Weight};
