//! Episodic grid-world environment

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::{Error, Result},
    gridworld::map::{Cell, GridMap},
    ports::{Environment, Step},
};

/// The four movement actions, in the classic encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl Action {
    pub const COUNT: usize = 4;
    pub const ALL: [Action; 4] = [Action::Left, Action::Down, Action::Right, Action::Up];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::Left),
            1 => Some(Action::Down),
            2 => Some(Action::Right),
            3 => Some(Action::Up),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Left => "LEFT",
            Action::Down => "DOWN",
            Action::Right => "RIGHT",
            Action::Up => "UP",
        }
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Grid-world environment over a [`GridMap`].
///
/// Moving into a wall leaves the position unchanged. Entering the goal yields
/// reward 1 and terminates; entering a hole yields reward 0 and terminates.
/// An optional step limit truncates episodes that run too long.
#[derive(Debug, Clone)]
pub struct GridWorld {
    map: GridMap,
    position: usize,
    slippery: bool,
    step_limit: Option<usize>,
    steps_taken: usize,
    rng: StdRng,
}

impl GridWorld {
    /// Create a deterministic environment with no step limit.
    pub fn new(map: GridMap) -> Self {
        let position = map.start_state();
        Self {
            map,
            position,
            slippery: false,
            step_limit: None,
            steps_taken: 0,
            rng: build_rng(None),
        }
    }

    /// Enable or disable slippery dynamics.
    ///
    /// When slippery, the executed move is the intended direction or one of
    /// its two perpendiculars, each with probability 1/3.
    pub fn with_slippery(mut self, slippery: bool) -> Self {
        self.slippery = slippery;
        self
    }

    /// Truncate episodes after `limit` steps.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Seed the environment's RNG (only relevant in slippery mode).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn is_slippery(&self) -> bool {
        self.slippery
    }

    /// Target state for moving in `direction` from `state`, clamped at walls.
    fn move_from(&self, state: usize, direction: Action) -> usize {
        let columns = self.map.columns();
        let row = state / columns;
        let column = state % columns;
        let (row, column) = match direction {
            Action::Left => (row, column.saturating_sub(1)),
            Action::Down => ((row + 1).min(self.map.rows() - 1), column),
            Action::Right => (row, (column + 1).min(columns - 1)),
            Action::Up => (row.saturating_sub(1), column),
        };
        row * columns + column
    }
}

impl Environment for GridWorld {
    fn reset(&mut self) -> Result<usize> {
        self.position = self.map.start_state();
        self.steps_taken = 0;
        Ok(self.position)
    }

    fn step(&mut self, action: usize) -> Result<Step> {
        let intended = Action::from_index(action).ok_or(Error::InvalidAction {
            action,
            action_count: Action::COUNT,
        })?;

        let direction = if self.slippery {
            // Intended direction or one of its perpendiculars, 1/3 each.
            let candidates = [(action + 3) % 4, action, (action + 1) % 4];
            let slipped = candidates[self.rng.random_range(0..3)];
            Action::from_index(slipped).unwrap_or(intended)
        } else {
            intended
        };

        let next_state = self.move_from(self.position, direction);
        let cell = self.map.cell(next_state);
        let terminated = cell.is_terminal();
        let reward = if cell == Cell::Goal { 1.0 } else { 0.0 };

        self.position = next_state;
        self.steps_taken += 1;
        let truncated =
            !terminated && self.step_limit.is_some_and(|limit| self.steps_taken >= limit);

        Ok(Step {
            next_state,
            reward,
            terminated,
            truncated,
        })
    }

    fn state_count(&self) -> usize {
        self.map.state_count()
    }

    fn action_count(&self) -> usize {
        Action::COUNT
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> GridWorld {
        GridWorld::new(GridMap::default())
    }

    #[test]
    fn test_reset_returns_start() {
        let mut env = env();
        assert_eq!(env.reset().unwrap(), 0);
    }

    #[test]
    fn test_deterministic_moves() {
        let mut env = env();
        env.reset().unwrap();

        // Right from state 0 lands on state 1.
        let step = env.step(Action::Right as usize).unwrap();
        assert_eq!(step.next_state, 1);
        assert_eq!(step.reward, 0.0);
        assert!(!step.done());

        // Down from state 1 lands on the hole at state 5.
        let step = env.step(Action::Down as usize).unwrap();
        assert_eq!(step.next_state, 5);
        assert_eq!(step.reward, 0.0);
        assert!(step.terminated);
        assert!(!step.truncated);
    }

    #[test]
    fn test_wall_clamp() {
        let mut env = env();
        env.reset().unwrap();

        // Left and Up from the top-left corner stay put.
        let step = env.step(Action::Left as usize).unwrap();
        assert_eq!(step.next_state, 0);
        let step = env.step(Action::Up as usize).unwrap();
        assert_eq!(step.next_state, 0);
    }

    #[test]
    fn test_goal_reward() {
        let mut env = env();
        env.reset().unwrap();

        // Walk the safe path: 0 -> 4 -> 8 -> 9 -> 13 -> 14 -> 15.
        let path = [
            Action::Down,
            Action::Down,
            Action::Right,
            Action::Down,
            Action::Right,
            Action::Right,
        ];
        let mut last = None;
        for action in path {
            last = Some(env.step(action as usize).unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.next_state, 15);
        assert_eq!(last.reward, 1.0);
        assert!(last.terminated);
    }

    #[test]
    fn test_invalid_action() {
        let mut env = env();
        env.reset().unwrap();
        let err = env.step(4).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidAction {
                action: 4,
                action_count: 4,
            }
        ));
    }

    #[test]
    fn test_truncation_at_step_limit() {
        let mut env = GridWorld::new(GridMap::default()).with_step_limit(3);
        env.reset().unwrap();

        // Bounce off the left wall; never terminates on its own.
        assert!(!env.step(Action::Left as usize).unwrap().done());
        assert!(!env.step(Action::Left as usize).unwrap().done());
        let step = env.step(Action::Left as usize).unwrap();
        assert!(step.truncated);
        assert!(!step.terminated);
    }

    #[test]
    fn test_slippery_reproducible_with_seed() {
        let run = |seed: u64| -> Vec<usize> {
            let mut env = GridWorld::new(GridMap::default())
                .with_slippery(true)
                .with_seed(seed)
                .with_step_limit(20);
            env.reset().unwrap();
            let mut states = Vec::new();
            loop {
                let step = env.step(Action::Down as usize).unwrap();
                states.push(step.next_state);
                if step.done() {
                    break;
                }
            }
            states
        };

        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_slippery_moves_stay_on_grid() {
        let mut env = GridWorld::new(GridMap::default())
            .with_slippery(true)
            .with_seed(3)
            .with_step_limit(50);
        env.reset().unwrap();
        loop {
            let step = env.step(Action::Right as usize).unwrap();
            assert!(step.next_state < 16);
            if step.done() {
                break;
            }
        }
    }
}
