//! VCG Paths - command line harness
//!
//! Run with:
//!   cargo run -- payments --graph scenarios/dense.toml --source A --target D
//!   cargo run -- decompose --scenario scenarios/budget.toml

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use console::style;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vcg_paths::budget::{BudgetDecomposer, Decomposition};
use vcg_paths::config::Config;
use vcg_paths::mechanism::{format_path, DisconnectPolicy, PathPaymentCalculator};
use vcg_paths::scenario::{self, BudgetScenario, GraphScenario};

#[derive(Parser, Debug)]
#[command(name = "vcg-paths", version, about = "VCG path payments and budget decomposition")]
struct Cli {
    /// Load settings from a TOML file instead of the environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// VCG payments for every edge of the cheapest path
    Payments {
        /// Graph scenario (.toml or .json)
        #[arg(long)]
        graph: PathBuf,

        /// Overrides the scenario's source node
        #[arg(long)]
        source: Option<String>,

        /// Overrides the scenario's target node
        #[arg(long)]
        target: Option<String>,

        /// What to do when removing an edge disconnects the target
        #[arg(long, value_enum)]
        policy: Option<DisconnectPolicy>,
    },

    /// Decide whether a budget splits into equal citizen shares
    Decompose {
        /// Budget scenario (.toml or .json)
        #[arg(long)]
        scenario: PathBuf,

        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// Print the active configuration
    Config,
}

fn print_banner() {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(" VCG PATHS - Edge Payments & Budget Decomposition").cyan().bold()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!();
}

fn run_payments(
    config: &Config,
    graph_path: PathBuf,
    source: Option<String>,
    target: Option<String>,
    policy: Option<DisconnectPolicy>,
) -> Result<()> {
    let scenario: GraphScenario = scenario::load(&graph_path)
        .wrap_err_with(|| format!("failed to load graph scenario {}", graph_path.display()))?;

    let source = source
        .or_else(|| scenario.source.clone())
        .ok_or_else(|| eyre!("no source node: pass --source or set `source` in the scenario"))?;
    let target = target
        .or_else(|| scenario.target.clone())
        .ok_or_else(|| eyre!("no target node: pass --target or set `target` in the scenario"))?;

    let mut graph = scenario.build()?;
    info!(
        "Graph loaded: {} Nodes, {} Edges",
        graph.node_count(),
        graph.edge_count()
    );

    let policy = policy.unwrap_or(config.disconnect_policy);
    let mut calculator = PathPaymentCalculator::new().with_policy(policy);

    let payments = match calculator.compute_payments(&mut graph, &source, &target) {
        Ok(payments) => payments,
        Err(e) => {
            error!("Payment computation failed: {}", e);
            return Err(e.into());
        }
    };

    println!(
        "{} {}  (cost {})",
        style("Cheapest path:").green().bold(),
        format_path(payments.path()),
        payments.path_cost()
    );
    println!();

    for ((u, v), payment) in payments.iter() {
        println!("  Edge {} -> {}: {}", u, v, style(payment).yellow());
    }
    println!();
    println!("  {} {}", style("Total:").bold(), payments.total());

    Ok(())
}

fn run_decompose(config: &Config, scenario_path: PathBuf, tolerance: Option<f64>) -> Result<()> {
    let scenario: BudgetScenario = scenario::load(&scenario_path)
        .wrap_err_with(|| format!("failed to load budget scenario {}", scenario_path.display()))?;

    let decomposer = BudgetDecomposer::new(tolerance.unwrap_or(config.flow_tolerance));
    let result = decomposer.decompose(&scenario.budget, &scenario.preferences)?;

    match result {
        Decomposition::Feasible(rows) => {
            println!("{}", style("✓ Decomposable").green().bold());
            for (i, row) in rows.iter().enumerate() {
                let cells = row
                    .iter()
                    .enumerate()
                    .map(|(j, amount)| format!("s{}: {}", j, amount))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  c{}: {{{}}}", i, cells);
            }
        }
        Decomposition::Infeasible => {
            println!("{}", style("✗ Not decomposable").red().bold());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?,
        None => Config::from_env()?,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_filter.parse()?),
        )
        .init();

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e);
    }

    print_banner();

    match cli.command {
        Command::Payments {
            graph,
            source,
            target,
            policy,
        } => run_payments(&config, graph, source, target, policy),
        Command::Decompose {
            scenario,
            tolerance,
        } => run_decompose(&config, scenario, tolerance),
        Command::Config => {
            config.print_summary();
            Ok(())
        }
    }
}
