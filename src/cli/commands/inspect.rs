//! Inspect command - Print learned Q-values for a state

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section},
    gridworld::Action,
};

#[derive(Parser, Debug)]
#[command(about = "Print the learned Q-values for a state")]
pub struct InspectArgs {
    /// Path to trained agent file
    pub agent: PathBuf,

    /// State index to inspect
    #[arg(long, short = 's', default_value_t = 0)]
    pub state: usize,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let saved = super::load_agent(&args.agent)?;
    let agent = saved.to_agent()?;
    let table = agent.q_table();

    print_section("Agent");
    print_kv("Algorithm", "Q-learning");
    if let Some(map) = &saved.metadata.map {
        print_kv("Trained on map", map);
    }
    if let Some(episodes) = saved.metadata.episodes_trained {
        print_kv("Episodes trained", &episodes.to_string());
    }
    print_kv("Current epsilon", &format!("{:.3}", agent.epsilon()));

    let row = table.row(args.state)?;
    let best = table.greedy_action(args.state);

    print_section(&format!("Q-values for state {}", args.state));
    for (action, q_value) in row.iter().enumerate() {
        let label = if table.action_count() == Action::COUNT {
            Action::from_index(action)
                .map(Action::name)
                .unwrap_or("?")
                .to_string()
        } else {
            format!("action {action}")
        };
        let marker = if action == best { " <-- BEST" } else { "" };
        println!("  {label:8} Q = {q_value:8.4}{marker}");
    }

    Ok(())
}
