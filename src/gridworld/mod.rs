//! Grid-world environment for tabular reinforcement learning
//!
//! A FrozenLake-style episodic environment over a rectangular grid of cells.
//! The agent starts on the start cell and moves Left/Down/Right/Up; reaching
//! the goal yields reward 1 and terminates, falling into a hole yields reward
//! 0 and terminates, and every other transition yields reward 0.
//!
//! States are row-major cell indices, so the environment plugs directly into
//! the dense-table learning code. Dynamics are deterministic by default; the
//! slippery mode reproduces the classic stochastic variant where the executed
//! move is the intended direction or one of its two perpendiculars, each with
//! probability 1/3.

pub mod env;
pub mod map;

pub use env::{Action, GridWorld};
pub use map::{Cell, GridMap};
