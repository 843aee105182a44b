//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling training
//! logic to specific output formats or metrics.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Summary of a completed episode, passed to observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Number of environment steps taken
    pub steps: usize,
    /// Sum of rewards over the episode
    pub total_reward: f64,
    /// Reward received on the final step
    pub terminal_reward: f64,
    /// Episode terminated (as opposed to truncated or still running)
    pub terminated: bool,
    /// Episode ended at a terminal state with strictly positive reward
    pub success: bool,
    /// Agent's exploration rate after the episode, if it has one
    pub exploration_rate: Option<f64>,
}

/// Observer trait for monitoring training and evaluation runs
///
/// Observers can be composed to collect different types of data during a run.
/// Examples include progress bars for user feedback and metrics tracking for
/// evaluation.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. `on_episode_end(episode, summary)` - once per completed episode
/// 3. `on_training_end()` - once at the end
pub trait Observer: Send {
    /// Called when a run starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode completes.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the completed episode (0-based)
    /// * `summary` - Outcome of the episode
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to record episode outcomes.
    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when a run completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to perform cleanup or final reporting.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
