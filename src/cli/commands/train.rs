//! Train command - Train a Q-learning agent on a grid world

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_rate, print_kv, print_section, print_subsection},
    gridworld::{GridMap, GridWorld},
    pipeline::{Environment, ProgressObserver, TrainingConfig, TrainingPipeline},
    q_learning::{AgentConfig, QLearningAgent, SavedAgent, TrainingMetadata},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent")]
pub struct TrainArgs {
    /// Map file (defaults to the built-in 4x4 lecture map)
    #[arg(long, short = 'm')]
    pub map: Option<PathBuf>,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 5000)]
    pub episodes: usize,

    /// Learning rate (alpha)
    #[arg(long, default_value_t = 1.0)]
    pub learning_rate: f64,

    /// Discount factor (gamma)
    #[arg(long, default_value_t = 0.9)]
    pub discount: f64,

    /// Initial exploration rate
    #[arg(long, default_value_t = 1.0)]
    pub epsilon_start: f64,

    /// Exploration floor
    #[arg(long, default_value_t = 0.1)]
    pub epsilon_end: f64,

    /// Multiplicative exploration decay per episode
    #[arg(long, default_value_t = 0.998)]
    pub epsilon_decay: f64,

    /// Use slippery (stochastic) dynamics
    #[arg(long)]
    pub slippery: bool,

    /// Truncate episodes after this many steps (0 disables)
    #[arg(long, default_value_t = 100)]
    pub step_limit: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file for the trained agent
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let map = match &args.map {
        Some(path) => GridMap::load_from_file(path)
            .with_context(|| format!("failed to load map from {}", path.display()))?,
        None => GridMap::default(),
    };

    let mut env = GridWorld::new(map.clone()).with_slippery(args.slippery);
    if args.step_limit > 0 {
        env = env.with_step_limit(args.step_limit);
    }

    print_section("Training Configuration");
    print_kv("Map", &map.describe());
    print_kv(
        "States x Actions",
        &format!("{} x {}", env.state_count(), env.action_count()),
    );
    print_kv("Episodes", &args.episodes.to_string());
    print_kv("Learning rate", &args.learning_rate.to_string());
    print_kv("Discount", &args.discount.to_string());
    print_kv(
        "Epsilon",
        &format!(
            "{} -> {} (decay {})",
            args.epsilon_start, args.epsilon_end, args.epsilon_decay
        ),
    );
    print_kv("Slippery", &args.slippery.to_string());
    if let Some(seed) = args.seed {
        print_kv("Seed", &seed.to_string());
    }

    let agent_config = AgentConfig {
        learning_rate: args.learning_rate,
        discount_factor: args.discount,
        epsilon_start: args.epsilon_start,
        epsilon_end: args.epsilon_end,
        epsilon_decay: args.epsilon_decay,
    };
    let mut agent = QLearningAgent::new(&agent_config, env.state_count(), env.action_count())?;

    let training_config = TrainingConfig {
        episodes: args.episodes,
        seed: args.seed,
    };
    let mut pipeline =
        TrainingPipeline::new(training_config)?.with_observer(Box::new(ProgressObserver::new()));

    print_subsection("Training");
    let result = pipeline.run(&mut agent, &mut env)?;

    print_section("Training Results");
    print_kv("Episodes", &result.total_episodes.to_string());
    print_kv("Successes", &result.successes.to_string());
    print_kv("Success rate", &format_rate(result.success_rate));
    print_kv(
        "Mean episode length",
        &format!(
            "{:.1} steps",
            result.total_steps as f64 / result.total_episodes as f64
        ),
    );
    print_kv("Final epsilon", &format!("{:.3}", agent.epsilon()));

    if let Some(output) = &args.output {
        let metadata = TrainingMetadata {
            episodes_trained: Some(result.total_episodes),
            map: Some(map.describe()),
            slippery: Some(args.slippery),
            seed: args.seed,
            final_epsilon: Some(agent.epsilon()),
        };
        SavedAgent::from_agent(&agent, metadata)
            .save_to_file(output)
            .with_context(|| format!("failed to save agent to {}", output.display()))?;
        println!("\nAgent saved to: {}", output.display());
    }

    if let Some(export) = &args.export {
        result
            .save(export)
            .with_context(|| format!("failed to export summary to {}", export.display()))?;
        println!("Summary exported to: {}", export.display());
    }

    Ok(())
}
