//! Serialization support for trained Q-learning agents.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::agent::{AgentState, QLearningAgent},
};

/// Provenance recorded alongside a saved agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of episodes trained
    pub episodes_trained: Option<usize>,
    /// Compact description of the training map (e.g. `SFFF/FHFF/FFHF/HFFG`)
    pub map: Option<String>,
    /// Whether the training environment used slippery dynamics
    pub slippery: Option<bool>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Exploration rate at the end of training
    pub final_epsilon: Option<f64>,
}

/// Versioned on-disk representation of a trained agent (MessagePack).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: AgentState,
    pub metadata: TrainingMetadata,
}

impl SavedAgent {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearningAgent, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
            metadata,
        }
    }

    /// Reconstruct the agent, resuming its exploration schedule where it
    /// left off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSaveVersion`] for files written by an
    /// incompatible format version.
    pub fn to_agent(&self) -> Result<QLearningAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSaveVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(QLearningAgent::from_state(self.state.clone()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create file {}", path.as_ref().display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).map_err(|err| Error::SerializationContext {
            operation: "serialize agent".to_string(),
            message: err.to_string(),
        })?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open file {}", path.as_ref().display()),
            source,
        })?;
        let reader = BufReader::new(file);

        rmp_serde::decode::from_read(reader).map_err(|err| Error::SerializationContext {
            operation: "deserialize agent".to_string(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ports::{Agent, Transition},
        q_learning::agent::AgentConfig,
    };

    fn trained_agent() -> QLearningAgent {
        let mut agent = QLearningAgent::new(&AgentConfig::default(), 16, 4)
            .unwrap()
            .with_seed(7);
        agent
            .observe(&Transition {
                state: 14,
                action: 2,
                reward: 1.0,
                next_state: 15,
                done: true,
            })
            .unwrap();
        agent.end_episode();
        agent
    }

    #[test]
    fn test_roundtrip_in_memory() {
        let agent = trained_agent();
        let saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());

        let bytes = rmp_serde::to_vec(&saved).unwrap();
        let loaded: SavedAgent = rmp_serde::from_slice(&bytes).unwrap();
        let restored = loaded.to_agent().unwrap();

        assert_eq!(restored.q_table(), agent.q_table());
        assert_eq!(restored.epsilon(), agent.epsilon());
    }

    #[test]
    fn test_roundtrip_on_disk() {
        let agent = trained_agent();
        let metadata = TrainingMetadata {
            episodes_trained: Some(1),
            map: Some("SFFF/FHFF/FFHF/HFFG".to_string()),
            slippery: Some(false),
            seed: Some(7),
            final_epsilon: Some(agent.epsilon()),
        };
        let saved = SavedAgent::from_agent(&agent, metadata);

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("agent.msgpack");
        saved.save_to_file(&path).unwrap();

        let loaded = SavedAgent::load_from_file(&path).unwrap();
        assert_eq!(loaded.version, SavedAgent::VERSION);
        assert_eq!(loaded.metadata.episodes_trained, Some(1));
        let restored = loaded.to_agent().unwrap();
        assert_eq!(restored.q_table(), agent.q_table());
    }

    #[test]
    fn test_version_check() {
        let agent = trained_agent();
        let mut saved = SavedAgent::from_agent(&agent, TrainingMetadata::default());
        saved.version = 99;

        assert!(matches!(
            saved.to_agent().unwrap_err(),
            Error::UnsupportedSaveVersion {
                found: 99,
                expected: 1,
            }
        ));
    }
}
