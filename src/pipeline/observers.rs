//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    ports::{EpisodeSummary, Observer},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    successes: usize,
    failures: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            successes: 0,
            failures: 0,
        }
    }

    fn message(&self, exploration_rate: Option<f64>) -> String {
        match exploration_rate {
            Some(epsilon) => format!("{} F:{} eps:{:.3}", self.successes, self.failures, epsilon),
            None => format!("{} F:{}", self.successes, self.failures),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (S:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        if summary.success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message(summary.exploration_rate));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message(None));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks run statistics
pub struct MetricsObserver {
    successes: usize,
    total_episodes: usize,
    step_counts: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            successes: 0,
            total_episodes: 0,
            step_counts: Vec::new(),
        }
    }

    /// Get current success rate
    pub fn success_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.successes as f64 / self.total_episodes as f64
        }
    }

    /// Get mean episode length
    pub fn mean_steps(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<usize>() as f64 / self.step_counts.len() as f64
        }
    }

    pub fn successes(&self) -> usize {
        self.successes
    }

    /// Total environment steps across all observed episodes
    pub fn total_steps(&self) -> usize {
        self.step_counts.iter().sum()
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.total_episodes += 1;
        if summary.success {
            self.successes += 1;
        }
        self.step_counts.push(summary.steps);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(success: bool, steps: usize) -> EpisodeSummary {
        EpisodeSummary {
            steps,
            total_reward: if success { 1.0 } else { 0.0 },
            terminal_reward: if success { 1.0 } else { 0.0 },
            terminated: success,
            success,
            exploration_rate: None,
        }
    }

    #[test]
    fn test_metrics_observer() {
        let mut metrics = MetricsObserver::new();
        metrics.on_episode_end(0, &summary(true, 6)).unwrap();
        metrics.on_episode_end(1, &summary(false, 10)).unwrap();

        assert_eq!(metrics.total_episodes(), 2);
        assert_eq!(metrics.successes(), 1);
        assert_eq!(metrics.success_rate(), 0.5);
        assert_eq!(metrics.mean_steps(), 8.0);
        assert_eq!(metrics.total_steps(), 16);
    }

    #[test]
    fn test_metrics_observer_empty() {
        let metrics = MetricsObserver::new();
        assert_eq!(metrics.success_rate(), 0.0);
        assert_eq!(metrics.mean_steps(), 0.0);
        assert_eq!(metrics.total_steps(), 0);
    }
}
