//! Tabular Q-learning
//!
//! This module implements one-step tabular Q-learning (Watkins), the
//! off-policy temporal difference control algorithm:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α [ r + γ max_a' Q(s',a') − Q(s,a) ]
//! ```
//!
//! Because the update bootstraps from the maximum next-state value rather
//! than the action the exploration policy actually takes, the agent learns
//! the value of the greedy policy regardless of how the data was generated.
//! Terminal transitions use the bare reward as the target; there is no
//! future to bootstrap from.
//!
//! ## Usage Example
//!
//! ```no_run
//! use qgrid::q_learning::{AgentConfig, QLearningAgent};
//!
//! let config = AgentConfig {
//!     learning_rate: 1.0,
//!     discount_factor: 0.9,
//!     epsilon_start: 1.0,
//!     epsilon_end: 0.1,
//!     epsilon_decay: 0.998,
//! };
//! let agent = QLearningAgent::new(&config, 16, 4).unwrap();
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{AgentConfig, QLearningAgent};
pub use q_table::QTable;
pub use serialization::{SavedAgent, TrainingMetadata};
