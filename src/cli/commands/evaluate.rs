//! Evaluate command - Run greedy evaluation of a trained agent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_rate, print_kv, print_section},
    pipeline::{EvaluationConfig, evaluate_greedy},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent with its greedy policy")]
pub struct EvaluateArgs {
    /// Path to trained agent file
    pub agent: PathBuf,

    /// Map file (defaults to the map the agent was trained on)
    #[arg(long, short = 'm')]
    pub map: Option<PathBuf>,

    /// Number of evaluation episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Maximum steps per episode before it counts as failed
    #[arg(long, default_value_t = 100)]
    pub max_steps: usize,

    /// Override slippery dynamics (defaults to the training setting)
    #[arg(long)]
    pub slippery: Option<bool>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    println!("Loading trained agent from: {}", args.agent.display());
    let saved = super::load_agent(&args.agent)?;

    print_section("Loaded Agent");
    print_kv("Algorithm", "Q-learning");
    if let Some(episodes) = saved.metadata.episodes_trained {
        print_kv("Episodes trained", &episodes.to_string());
    }
    if let Some(map) = &saved.metadata.map {
        print_kv("Trained on map", map);
    }
    if let Some(epsilon) = saved.metadata.final_epsilon {
        print_kv("Final epsilon", &format!("{epsilon:.3}"));
    }

    let map = super::resolve_map(args.map.as_ref(), &saved.metadata)?;
    // Evaluation enforces its own step bound; no environment step limit.
    let mut env = super::build_env(map, args.slippery, &saved.metadata, 0);

    print_section("Evaluation Configuration");
    print_kv("Map", &env.map().describe());
    print_kv("Slippery", &env.is_slippery().to_string());
    print_kv("Episodes", &args.episodes.to_string());
    print_kv("Max steps", &args.max_steps.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

    let table = saved.to_agent()?.into_q_table();
    let config = EvaluationConfig {
        episodes: args.episodes,
        max_steps: args.max_steps,
        seed: args.seed,
    };
    let result = evaluate_greedy(&table, &mut env, &config)?;

    print_section("Evaluation Results");
    if args.episodes <= 20 {
        for (index, record) in result.records.iter().enumerate() {
            let outcome = if record.success { "SUCCESS" } else { "FAILED" };
            println!(
                "  Episode {:3}: {} (path length: {})",
                index + 1,
                outcome,
                record.steps
            );
        }
        println!();
    }
    print_kv("Episodes", &result.episodes.to_string());
    print_kv("Successes", &result.successes.to_string());
    print_kv("Success rate", &format_rate(result.success_rate));
    print_kv("Mean episode length", &format!("{:.1} steps", result.mean_steps));

    if let Some(export) = &args.export {
        result
            .save(export)
            .with_context(|| format!("failed to export results to {}", export.display()))?;
        println!("\nResults exported to: {}", export.display());
    }

    Ok(())
}
