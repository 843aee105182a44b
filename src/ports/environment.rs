//! Environment port - abstraction over discrete episodic environments
//!
//! Any environment with a finite, densely enumerated state/action space can
//! drive the training and evaluation pipelines through this port. States and
//! actions are plain integer indices; rewards are scalar.

use crate::Result;

/// Outcome of a single environment step.
///
/// Episode termination is reported through two independent flags, matching
/// the common discrete-environment convention: `terminated` means a terminal
/// condition was reached inside the environment (goal, hole), `truncated`
/// means an external cutoff fired (step limit). An episode is over when
/// either flag is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// State the environment transitioned into
    pub next_state: usize,
    /// Immediate scalar reward for the transition
    pub reward: f64,
    /// Episode ended at a terminal state
    pub terminated: bool,
    /// Episode was cut off externally
    pub truncated: bool,
}

impl Step {
    /// Whether the episode is over, for either reason.
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Environment trait - discrete, episodic data source for the trainer
///
/// Implementations are pure collaborators: they never touch the learner's
/// value estimates. `reset` must be callable an unbounded number of times.
pub trait Environment {
    /// Begin a new episode and return the initial state.
    fn reset(&mut self) -> Result<usize>;

    /// Apply `action` to the current state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] if `action` is outside
    /// `[0, action_count)`. The trainer does not recover from this.
    fn step(&mut self, action: usize) -> Result<Step>;

    /// Number of states in the environment (states are `0..state_count`).
    fn state_count(&self) -> usize;

    /// Number of actions available in every state.
    fn action_count(&self) -> usize;

    /// Seed the environment's internal random number generator, if any.
    ///
    /// Deterministic environments can use the default no-op implementation.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
