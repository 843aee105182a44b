//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and its
//! collaborators. The traits are owned by the core and implemented by
//! concrete environments, agents, and observers.

pub mod agent;
pub mod environment;
pub mod observer;

pub use agent::{Agent, Transition};
pub use environment::{Environment, Step};
pub use observer::{EpisodeSummary, Observer};
