//! Budget Decomposition
//!
//! Responsible for:
//! - Deciding whether a budget splits into equal per-citizen shares that
//!   respect approval preferences
//! - Reading each citizen's contributions off the max flow

mod decomposition;

pub use decomposition::{BudgetDecomposer, Decomposition, DEFAULT_FLOW_TOLERANCE};
