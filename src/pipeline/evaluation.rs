//! Greedy policy evaluation
//!
//! Runs a fixed policy (no learning, no exploration) for a number of
//! episodes and reports the success rate. A step bound guards against
//! policies that never reach a terminal state; exceeding it counts the
//! episode as failed rather than raising an error.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    ports::{Agent, Environment},
    q_learning::QTable,
};

/// Evaluation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation episodes
    pub episodes: usize,

    /// Maximum steps per episode before the episode counts as failed
    pub max_steps: usize,

    /// Random seed for the environment (and the policy, if stochastic)
    pub seed: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            max_steps: 100,
            seed: None,
        }
    }
}

impl EvaluationConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `episodes` or `max_steps`
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episodes must be positive".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_steps must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Trajectory and outcome of a single evaluation episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Visited states, starting with the reset state
    pub states: Vec<usize>,
    /// Actions taken, one per step
    pub actions: Vec<usize>,
    /// Number of steps taken
    pub steps: usize,
    /// Reward on the final step
    pub terminal_reward: f64,
    /// Episode reached a terminal state (false: truncated or step bound hit)
    pub terminated: bool,
    /// Terminated with strictly positive reward
    pub success: bool,
}

/// Result of an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Episodes run
    pub episodes: usize,
    /// Successful episodes
    pub successes: usize,
    /// successes / episodes
    pub success_rate: f64,
    /// Mean steps per episode
    pub mean_steps: f64,
    /// Per-episode trajectories
    pub records: Vec<EpisodeRecord>,
}

impl EvaluationResult {
    fn from_records(records: Vec<EpisodeRecord>) -> Self {
        let episodes = records.len();
        let successes = records.iter().filter(|record| record.success).count();
        let total_steps: usize = records.iter().map(|record| record.steps).sum();
        Self {
            episodes,
            successes,
            success_rate: if episodes > 0 {
                successes as f64 / episodes as f64
            } else {
                0.0
            },
            mean_steps: if episodes > 0 {
                total_steps as f64 / episodes as f64
            } else {
                0.0
            },
            records,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Frozen greedy policy over a fixed table
///
/// Selects `argmax_a Q[state, a]` with the table's deterministic tie-break
/// and never mutates the table.
pub struct GreedyPolicy<'a> {
    table: &'a QTable,
}

impl<'a> GreedyPolicy<'a> {
    pub fn new(table: &'a QTable) -> Self {
        Self { table }
    }
}

impl Agent for GreedyPolicy<'_> {
    fn select_action(&mut self, state: usize) -> Result<usize> {
        if state >= self.table.state_count() {
            return Err(Error::StateOutOfBounds {
                state,
                state_count: self.table.state_count(),
            });
        }
        Ok(self.table.greedy_action(state))
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

/// Evaluate a fixed policy over `config.episodes` episodes.
///
/// The policy is not trained: `observe`/`end_episode` are never called, so
/// the policy's state after evaluation equals its state before.
pub fn evaluate_policy(
    policy: &mut dyn Agent,
    env: &mut dyn Environment,
    config: &EvaluationConfig,
) -> Result<EvaluationResult> {
    config.validate()?;

    if let Some(seed) = config.seed {
        policy.set_rng_seed(seed)?;
        env.set_rng_seed(seed.wrapping_add(1))?;
    }

    let mut records = Vec::with_capacity(config.episodes);
    for _ in 0..config.episodes {
        records.push(run_episode(policy, env, config.max_steps)?);
    }

    Ok(EvaluationResult::from_records(records))
}

/// Evaluate the greedy policy of a fixed table.
pub fn evaluate_greedy(
    table: &QTable,
    env: &mut dyn Environment,
    config: &EvaluationConfig,
) -> Result<EvaluationResult> {
    let mut policy = GreedyPolicy::new(table);
    evaluate_policy(&mut policy, env, config)
}

fn run_episode(
    policy: &mut dyn Agent,
    env: &mut dyn Environment,
    max_steps: usize,
) -> Result<EpisodeRecord> {
    let mut state = env.reset()?;
    let mut states = vec![state];
    let mut actions = Vec::new();
    let mut steps = 0;
    let mut terminal_reward = 0.0;
    let mut terminated = false;

    while steps < max_steps {
        let action = policy.select_action(state)?;
        let step = env.step(action)?;

        actions.push(action);
        states.push(step.next_state);
        steps += 1;
        terminal_reward = step.reward;
        state = step.next_state;

        if step.done() {
            terminated = step.terminated;
            break;
        }
    }

    Ok(EpisodeRecord {
        states,
        actions,
        steps,
        terminal_reward,
        terminated,
        success: terminated && terminal_reward > 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::{GridMap, GridWorld};

    /// Table whose greedy policy walks the safe path of the default map.
    fn goal_seeking_table() -> QTable {
        let mut table = QTable::new(16, 4, 1.0, 0.9);
        // 0 -> 4 -> 8 -> 9 -> 13 -> 14 -> 15 (Down, Down, Right, Down, Right, Right)
        table.set(0, 1, 1.0);
        table.set(4, 1, 1.0);
        table.set(8, 2, 1.0);
        table.set(9, 1, 1.0);
        table.set(13, 2, 1.0);
        table.set(14, 2, 1.0);
        table
    }

    #[test]
    fn test_successful_greedy_evaluation() {
        let table = goal_seeking_table();
        let mut env = GridWorld::new(GridMap::default());
        let config = EvaluationConfig {
            episodes: 10,
            max_steps: 100,
            seed: None,
        };

        let result = evaluate_greedy(&table, &mut env, &config).unwrap();

        assert_eq!(result.episodes, 10);
        assert_eq!(result.successes, 10);
        assert_eq!(result.success_rate, 1.0);
        assert_eq!(result.mean_steps, 6.0);
        assert_eq!(result.records[0].states.last(), Some(&15));
    }

    #[test]
    fn test_borrowed_policy_runs_as_trait_object() {
        // GreedyPolicy borrows its table; it must still pass through the
        // `&mut dyn Agent` entry point without owning anything.
        let table = goal_seeking_table();
        let mut policy = GreedyPolicy::new(&table);
        let mut env = GridWorld::new(GridMap::default());
        let config = EvaluationConfig {
            episodes: 2,
            max_steps: 100,
            seed: None,
        };

        let result = evaluate_policy(&mut policy, &mut env, &config).unwrap();

        assert_eq!(result.successes, 2);
        assert_eq!(policy.name(), "Greedy");
    }

    #[test]
    fn test_step_bound_counts_as_failure() {
        // All-zero table: greedy picks Left everywhere and never terminates.
        let table = QTable::new(16, 4, 1.0, 0.9);
        let mut env = GridWorld::new(GridMap::default());
        let config = EvaluationConfig {
            episodes: 3,
            max_steps: 10,
            seed: None,
        };

        let result = evaluate_greedy(&table, &mut env, &config).unwrap();

        assert_eq!(result.successes, 0);
        for record in &result.records {
            assert_eq!(record.steps, 10);
            assert!(!record.terminated);
            assert!(!record.success);
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let table = goal_seeking_table();
        let config = EvaluationConfig {
            episodes: 5,
            max_steps: 100,
            seed: None,
        };

        let mut env = GridWorld::new(GridMap::default());
        let first = evaluate_greedy(&table, &mut env, &config).unwrap();
        let second = evaluate_greedy(&table, &mut env, &config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_config() {
        let table = goal_seeking_table();
        let mut env = GridWorld::new(GridMap::default());

        let config = EvaluationConfig {
            episodes: 0,
            max_steps: 100,
            seed: None,
        };
        assert!(evaluate_greedy(&table, &mut env, &config).is_err());

        let config = EvaluationConfig {
            episodes: 1,
            max_steps: 0,
            seed: None,
        };
        assert!(evaluate_greedy(&table, &mut env, &config).is_err());
    }
}
