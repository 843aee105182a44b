//! Agent port - abstraction for action-selecting policies
//!
//! This port defines the interface the training and evaluation pipelines use
//! to drive a policy, allowing the system to work with:
//! - Learning agents (tabular Q-learning)
//! - Frozen greedy policies (evaluation)
//! - Baselines (uniform random)

use crate::Result;

/// A single environment transition, consumed online by learning agents.
///
/// Transitions are ephemeral: the pipeline hands each one to the agent
/// immediately after the step that produced it and never retains them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: usize,
    pub action: usize,
    pub reward: f64,
    pub next_state: usize,
    /// Episode ended on this transition (terminated or truncated)
    pub done: bool,
}

/// Agent trait - unified interface for policies driven by the pipelines
///
/// This trait is a port boundary between the episodic control loops and the
/// concrete policies. Learning agents implement `observe` and `end_episode`;
/// stateless policies keep the default no-ops.
pub trait Agent: Send {
    /// Select an action for the given state.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent cannot act in `state` (e.g. the state
    /// index is outside the agent's table).
    fn select_action(&mut self, state: usize) -> Result<usize>;

    /// Update the agent with a transition it just experienced.
    ///
    /// Called once per environment step, in order. The default implementation
    /// does nothing, suitable for non-adaptive policies.
    fn observe(&mut self, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Called once at the end of each episode.
    ///
    /// Learning agents use this hook to advance per-episode schedules such as
    /// exploration decay. The default implementation does nothing.
    fn end_episode(&mut self) {}

    /// Get the agent's name, used for identification in reports.
    fn name(&self) -> &str;

    /// Current exploration rate, if the agent has one.
    ///
    /// Used purely for reporting; pipelines never act on it.
    fn exploration_rate(&self) -> Option<f64> {
        None
    }

    /// Seed the agent's internal random number generator.
    ///
    /// Pipelines call this when supplied with a deterministic seed so runs
    /// are reproducible. Deterministic policies can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
