//! Tabular Q-learning agent
//!
//! An ε-greedy agent over a dense Q-table. The exploration rate is a field
//! of the agent, decayed once per episode, so independent training runs never
//! interfere through shared state.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    ports::{Agent, Transition},
    q_learning::q_table::QTable,
};

/// Hyperparameters for a training run, immutable once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ in [0, 1]
    pub discount_factor: f64,
    /// Initial exploration rate in [0, 1]
    pub epsilon_start: f64,
    /// Exploration floor in [0, epsilon_start]
    pub epsilon_end: f64,
    /// Multiplicative decay per episode in (0, 1]
    pub epsilon_decay: f64,
}

impl Default for AgentConfig {
    /// The lecture-demo hyperparameters: full replacement updates with a
    /// slow exploration decay toward 10%.
    fn default() -> Self {
        Self {
            learning_rate: 1.0,
            discount_factor: 0.9,
            epsilon_start: 1.0,
            epsilon_end: 0.1,
            epsilon_decay: 0.998,
        }
    }
}

impl AgentConfig {
    /// Validate every hyperparameter range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first violated
    /// constraint. Called before any training state is built, so a bad
    /// configuration never produces a partial table.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(invalid(format!(
                "discount_factor must be in [0, 1], got {}",
                self.discount_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon_start) {
            return Err(invalid(format!(
                "epsilon_start must be in [0, 1], got {}",
                self.epsilon_start
            )));
        }
        if !(self.epsilon_end >= 0.0 && self.epsilon_end <= self.epsilon_start) {
            return Err(invalid(format!(
                "epsilon_end must be in [0, epsilon_start], got {}",
                self.epsilon_end
            )));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(invalid(format!(
                "epsilon_decay must be in (0, 1], got {}",
                self.epsilon_decay
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Serializable snapshot of an agent, used for persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AgentState {
    pub q_table: QTable,
    pub epsilon: f64,
    pub initial_epsilon: f64,
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
    pub rng_seed: Option<u64>,
}

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal Q* function by always updating toward the maximum
/// next-state value, regardless of the action actually taken.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningAgent {
    /// Create an agent for a `state_count` x `action_count` space.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the config fails
    /// validation or either space dimension is zero.
    pub fn new(config: &AgentConfig, state_count: usize, action_count: usize) -> Result<Self> {
        config.validate()?;
        if state_count == 0 {
            return Err(invalid("state_count must be positive".to_string()));
        }
        if action_count == 0 {
            return Err(invalid("action_count must be positive".to_string()));
        }

        Ok(Self {
            q_table: QTable::new(
                state_count,
                action_count,
                config.learning_rate,
                config.discount_factor,
            ),
            epsilon: config.epsilon_start,
            initial_epsilon: config.epsilon_start,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.epsilon_end,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// ε-greedy action selection
    fn select_action_epsilon_greedy(&mut self, state: usize) -> usize {
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: uniform random action
            self.rng.random_range(0..self.q_table.action_count())
        } else {
            // Exploit: greedy action based on Q-values
            self.q_table.greedy_action(state)
        }
    }

    /// Decay epsilon after an episode, floored at the configured minimum.
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The learned table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Consume the agent, keeping only the learned table.
    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    pub(crate) fn export_state(&self) -> AgentState {
        AgentState {
            q_table: self.q_table.clone(),
            epsilon: self.epsilon,
            initial_epsilon: self.initial_epsilon,
            epsilon_decay: self.epsilon_decay,
            min_epsilon: self.min_epsilon,
            rng_seed: self.rng_seed,
        }
    }

    pub(crate) fn from_state(state: AgentState) -> Self {
        Self {
            q_table: state.q_table,
            epsilon: state.epsilon,
            initial_epsilon: state.initial_epsilon,
            epsilon_decay: state.epsilon_decay,
            min_epsilon: state.min_epsilon,
            rng: build_rng(state.rng_seed),
            rng_seed: state.rng_seed,
        }
    }
}

impl Agent for QLearningAgent {
    fn select_action(&mut self, state: usize) -> Result<usize> {
        if state >= self.q_table.state_count() {
            return Err(Error::StateOutOfBounds {
                state,
                state_count: self.q_table.state_count(),
            });
        }
        Ok(self.select_action_epsilon_greedy(state))
    }

    fn observe(&mut self, transition: &Transition) -> Result<()> {
        self.q_table.update(
            transition.state,
            transition.action,
            transition.reward,
            transition.next_state,
            transition.done,
        );
        Ok(())
    }

    fn end_episode(&mut self) {
        self.decay_epsilon();
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn exploration_rate(&self) -> Option<f64> {
        Some(self.epsilon)
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}
