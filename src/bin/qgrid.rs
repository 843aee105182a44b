//! qgrid CLI - Tabular Q-learning on grid worlds
//!
//! This CLI provides a unified interface for:
//! - Training a Q-learning agent on a grid-world map
//! - Evaluating a trained agent's greedy policy
//! - Inspecting learned Q-values
//! - Comparing a trained agent against a random baseline

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qgrid")]
#[command(version, about = "Tabular Q-learning on grid worlds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent
    Train(qgrid::cli::commands::train::TrainArgs),

    /// Evaluate a trained agent with its greedy policy
    Evaluate(qgrid::cli::commands::evaluate::EvaluateArgs),

    /// Print the learned Q-values for a state
    Inspect(qgrid::cli::commands::inspect::InspectArgs),

    /// Compare a trained agent against a random baseline
    Compare(qgrid::cli::commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qgrid::cli::commands::train::execute(args),
        Commands::Evaluate(args) => qgrid::cli::commands::evaluate::execute(args),
        Commands::Inspect(args) => qgrid::cli::commands::inspect::execute(args),
        Commands::Compare(args) => qgrid::cli::commands::compare::execute(args),
    }
}
