//! Training pipeline for learning agents

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    pipeline::observers::MetricsObserver,
    ports::{Agent, Environment, EpisodeSummary, Observer, Transition},
};

/// Training run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Random seed for agent and environment
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 5000,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `episodes` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episodes must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes run
    pub total_episodes: usize,

    /// Episodes that ended at a terminal state with positive reward
    pub successes: usize,

    /// Success rate over all training episodes
    pub success_rate: f64,

    /// Total environment steps across all episodes
    pub total_steps: usize,

    /// Agent's exploration rate after the final episode, if it has one
    pub final_exploration_rate: Option<f64>,
}

impl TrainingResult {
    pub fn new(
        total_episodes: usize,
        successes: usize,
        total_steps: usize,
        final_exploration_rate: Option<f64>,
    ) -> Self {
        let success_rate = if total_episodes > 0 {
            successes as f64 / total_episodes as f64
        } else {
            0.0
        };

        Self {
            total_episodes,
            successes,
            success_rate,
            total_steps,
            final_exploration_rate,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline driving an agent against an environment
///
/// Runs the episodic control loop: reset, select/step/observe until the
/// environment signals the episode is over, notify the agent and observers,
/// repeat for the configured number of episodes. Environment failures
/// propagate immediately; there are no retries.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the config is invalid,
    /// before any training state is touched.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and environment
    pub fn run(
        &mut self,
        agent: &mut dyn Agent,
        env: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        self.seed_pair(agent, env)?;

        let mut metrics = MetricsObserver::new();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            let summary = self.run_episode(agent, env)?;
            agent.end_episode();

            let summary = EpisodeSummary {
                exploration_rate: agent.exploration_rate(),
                ..summary
            };
            metrics.on_episode_end(episode, &summary)?;
            for observer in &mut self.observers {
                observer.on_episode_end(episode, &summary)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            metrics.total_episodes(),
            metrics.successes(),
            metrics.total_steps(),
            agent.exploration_rate(),
        ))
    }

    fn seed_pair(&self, agent: &mut dyn Agent, env: &mut dyn Environment) -> Result<()> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            env.set_rng_seed(seed.wrapping_add(1))?;
        }
        Ok(())
    }

    /// One episode of online learning: every transition is handed to the
    /// agent as soon as it happens and never retained.
    fn run_episode(
        &mut self,
        agent: &mut dyn Agent,
        env: &mut dyn Environment,
    ) -> Result<EpisodeSummary> {
        let mut state = env.reset()?;
        let mut steps = 0;
        let mut total_reward = 0.0;

        loop {
            let action = agent.select_action(state)?;
            let step = env.step(action)?;
            let done = step.done();

            agent.observe(&Transition {
                state,
                action,
                reward: step.reward,
                next_state: step.next_state,
                done,
            })?;

            steps += 1;
            total_reward += step.reward;
            state = step.next_state;

            if done {
                return Ok(EpisodeSummary {
                    steps,
                    total_reward,
                    terminal_reward: step.reward,
                    terminated: step.terminated,
                    success: step.terminated && step.reward > 0.0,
                    exploration_rate: None,
                });
            }
        }
    }
}
