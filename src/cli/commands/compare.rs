//! Compare command - Learned greedy policy vs. random baseline

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{format_rate, print_kv, print_section},
    pipeline::{Environment, EvaluationConfig, RandomAgent, evaluate_greedy, evaluate_policy},
};

#[derive(Parser, Debug)]
#[command(about = "Compare a trained agent against a random baseline")]
pub struct CompareArgs {
    /// Path to trained agent file
    pub agent: PathBuf,

    /// Map file (defaults to the map the agent was trained on)
    #[arg(long, short = 'm')]
    pub map: Option<PathBuf>,

    /// Number of episodes per policy
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
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let saved = super::load_agent(&args.agent)?;
    let map = super::resolve_map(args.map.as_ref(), &saved.metadata)?;
    let mut env = super::build_env(map, args.slippery, &saved.metadata, 0);

    print_section("Comparison Configuration");
    print_kv("Map", &env.map().describe());
    print_kv("Slippery", &env.is_slippery().to_string());
    print_kv("Episodes per policy", &args.episodes.to_string());

    let config = EvaluationConfig {
        episodes: args.episodes,
        max_steps: args.max_steps,
        seed: args.seed,
    };

    let table = saved.to_agent()?.into_q_table();
    let learned = evaluate_greedy(&table, &mut env, &config)?;

    let mut random = RandomAgent::new("Random".to_string(), env.action_count())?;
    let baseline = evaluate_policy(&mut random, &mut env, &config)?;

    print_section("Comparison Results");
    print_kv(
        "Random baseline",
        &format!(
            "{}/{} ({})",
            baseline.successes,
            baseline.episodes,
            format_rate(baseline.success_rate)
        ),
    );
    print_kv(
        "Learned policy",
        &format!(
            "{}/{} ({})",
            learned.successes,
            learned.episodes,
            format_rate(learned.success_rate)
        ),
    );
    let improvement = learned.successes as i64 - baseline.successes as i64;
    print_kv("Improvement", &format!("{improvement:+} successes"));

    Ok(())
}
