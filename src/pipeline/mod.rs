//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training a learning agent against an environment
//! - Evaluating frozen policies with a step bound
//! - Observing runs (progress bars, metrics)
//! - Baseline comparisons

pub mod comparison;
pub mod evaluation;
pub mod observers;
pub mod training;

pub use comparison::RandomAgent;
pub use evaluation::{
    EpisodeRecord, EvaluationConfig, EvaluationResult, GreedyPolicy, evaluate_greedy,
    evaluate_policy,
};
pub use observers::{MetricsObserver, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Environment, Observer};
