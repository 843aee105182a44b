//! CLI infrastructure for the qgrid toolkit
//!
//! This module provides the command-line interface for training, evaluating,
//! inspecting, and comparing tabular Q-learning agents on grid worlds.

pub mod commands;
pub mod output;
