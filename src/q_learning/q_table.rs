//! Q-table implementation for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dense action-value table over a finite state/action space
///
/// Stores one f64 per (state, action) pair in row-major order. The shape is
/// fixed at creation; every entry starts at zero and is mutated only through
/// [`QTable::update`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Vec<f64>,
    state_count: usize,
    action_count: usize,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zero-initialized table.
    pub fn new(
        state_count: usize,
        action_count: usize,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Self {
        Self {
            values: vec![0.0; state_count * action_count],
            state_count,
            action_count,
            learning_rate,
            discount_factor,
        }
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    fn index(&self, state: usize, action: usize) -> usize {
        state * self.action_count + action
    }

    /// Get the Q-value for a state-action pair.
    ///
    /// # Panics
    ///
    /// Panics if `state` or `action` is out of bounds. Use [`QTable::row`]
    /// for checked access to externally supplied indices.
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[self.index(state, action)]
    }

    /// Set the Q-value for a state-action pair.
    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        let index = self.index(state, action);
        self.values[index] = value;
    }

    /// Checked access to the action-value row of a state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateOutOfBounds`] if `state` is outside the table.
    pub fn row(&self, state: usize) -> Result<&[f64]> {
        if state >= self.state_count {
            return Err(Error::StateOutOfBounds {
                state,
                state_count: self.state_count,
            });
        }
        let start = state * self.action_count;
        Ok(&self.values[start..start + self.action_count])
    }

    /// Maximum Q-value over all actions in a state.
    pub fn max_value(&self, state: usize) -> f64 {
        let start = state * self.action_count;
        self.values[start..start + self.action_count]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action for a state: the argmax over its row.
    ///
    /// Ties break toward the lowest action index, so greedy selection is
    /// deterministic for any fixed table.
    pub fn greedy_action(&self, state: usize) -> usize {
        let start = state * self.action_count;
        let row = &self.values[start..start + self.action_count];
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Terminal transitions (`done`) never bootstrap: the target is the
    /// reward alone, so value cannot leak through terminal states.
    pub fn update(&mut self, state: usize, action: usize, reward: f64, next_state: usize, done: bool) {
        let current_q = self.get(state, action);
        let max_next_q = if done { 0.0 } else { self.max_value(next_state) };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
    }
}
