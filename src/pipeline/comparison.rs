//! Baseline policies for comparison runs
//!
//! A learned policy means little without a reference point; the random
//! baseline shows how often blind wandering reaches the goal.

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Result,
    error::Error,
    ports::Agent,
};

/// Uniform random policy over the action space
pub struct RandomAgent {
    name: String,
    action_count: usize,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: String, action_count: usize) -> Result<Self> {
        if action_count == 0 {
            return Err(Error::InvalidConfiguration {
                message: "action_count must be positive".to_string(),
            });
        }
        Ok(Self {
            name,
            action_count,
            rng: StdRng::seed_from_u64(random()),
        })
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: String, action_count: usize, seed: u64) -> Result<Self> {
        let mut agent = Self::new(name, action_count)?;
        agent.rng = StdRng::seed_from_u64(seed);
        Ok(agent)
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, _state: usize) -> Result<usize> {
        Ok(self.rng.random_range(0..self.action_count))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_in_range() {
        let mut agent = RandomAgent::with_seed("Random".to_string(), 4, 9).unwrap();
        for _ in 0..100 {
            assert!(agent.select_action(0).unwrap() < 4);
        }
    }

    #[test]
    fn test_seeded_determinism() {
        let run = |seed: u64| -> Vec<usize> {
            let mut agent = RandomAgent::with_seed("Random".to_string(), 4, seed).unwrap();
            (0..20).map(|_| agent.select_action(0).unwrap()).collect()
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_zero_actions_rejected() {
        assert!(RandomAgent::new("Random".to_string(), 0).is_err());
    }
}
