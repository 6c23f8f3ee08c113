//! Reference scenarios - payments and decompositions for the textbook examples
//!
//! Run with: cargo run --bin reference-scenarios

use color_eyre::eyre::Result;
use console::style;
use std::collections::BTreeSet;

use vcg_paths::budget::{BudgetDecomposer, Decomposition};
use vcg_paths::mechanism::{NoopObserver, PathPaymentCalculator};
use vcg_paths::network::PathGraph;

/// Four-node complete graphs, weights for AB, AC, AD, BC, BD, CD
const PAYMENT_CASES: [[f64; 6]; 4] = [
    [3.0, 5.0, 10.0, 1.0, 4.0, 1.0],
    [10.0, 1.0, 7.0, 3.0, 2.0, 5.0],
    [5.0, 5.0, 12.0, 5.0, 5.0, 5.0],
    [5.0, 5.0, 3.0, 5.0, 5.0, 5.0],
];

fn prefs(sets: &[&[usize]]) -> Vec<BTreeSet<usize>> {
    sets.iter().map(|s| s.iter().copied().collect()).collect()
}

fn budget_cases() -> Vec<(Vec<f64>, Vec<BTreeSet<usize>>)> {
    vec![
        (vec![400.0, 50.0, 50.0, 0.0], prefs(&[&[0, 1], &[0, 2], &[0, 3], &[1, 2], &[0]])),
        (vec![1500.0, 3000.0, 1500.0], prefs(&[&[0, 1], &[1, 2]])),
        (vec![500.0, 300.0, 100.0], prefs(&[&[0, 1], &[1, 2], &[0, 2]])),
        (vec![500.0, 0.0, 100.0, 0.0, 200.0], prefs(&[&[0, 1], &[1, 2], &[1, 2]])),
        (vec![500.0, 0.0, 100.0, 0.0, 200.0], prefs(&[&[0, 1], &[0, 4], &[1, 2]])),
    ]
}

fn main() -> Result<()> {
    color_eyre::install()?;

    println!("{}", style("═══ VCG PAYMENTS (A → D) ═══").blue().bold());
    let pairs = [("A", "B"), ("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "D")];

    for (n, weights) in PAYMENT_CASES.iter().enumerate() {
        let mut graph = PathGraph::from_edges(
            pairs
                .iter()
                .zip(weights)
                .map(|(&(u, v), &w)| (u, v, w)),
        )?;

        let payments = PathPaymentCalculator::with_observer(NoopObserver)
            .compute_payments(&mut graph, &"A", &"D")?;
        println!("  #{}: {}", n + 1, payments);
    }

    println!();
    println!("{}", style("═══ BUDGET DECOMPOSITION ═══").blue().bold());
    let decomposer = BudgetDecomposer::default();

    for (n, (budget, preferences)) in budget_cases().iter().enumerate() {
        match decomposer.decompose(budget, preferences)? {
            Decomposition::Feasible(rows) => {
                println!("  #{}: {}", n + 1, style("decomposable").green());
                for (i, row) in rows.iter().enumerate() {
                    println!("      c{}: {:?}", i, row);
                }
            }
            Decomposition::Infeasible => {
                println!("  #{}: {}", n + 1, style("not decomposable").red());
            }
        }
    }

    Ok(())
}
