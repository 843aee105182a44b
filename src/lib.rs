//! Tabular Q-learning on grid worlds
//!
//! This crate provides:
//! - A dense-table Q-learning trainer and greedy evaluator over finite
//!   discrete state/action spaces
//! - A FrozenLake-style grid-world environment with deterministic and
//!   slippery dynamics
//! - Training/evaluation pipelines with composable observers
//! - Agent persistence and a CLI for lecture demos

pub mod cli;
pub mod error;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use gridworld::{Action, Cell, GridMap, GridWorld};
pub use pipeline::{
    EvaluationConfig, EvaluationResult, RandomAgent, TrainingConfig, TrainingPipeline,
    TrainingResult, evaluate_greedy, evaluate_policy,
};
pub use ports::{Agent, Environment, EpisodeSummary, Observer, Step, Transition};
pub use q_learning::{AgentConfig, QLearningAgent, QTable, SavedAgent, TrainingMetadata};
