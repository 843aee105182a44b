//! CLI subcommands

pub mod compare;
pub mod evaluate;
pub mod inspect;
pub mod train;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    gridworld::{GridMap, GridWorld},
    q_learning::{SavedAgent, TrainingMetadata},
};

/// Resolve the evaluation map: an explicit `--map` file wins, then the map
/// stored in the saved agent's metadata, then the default lecture map.
pub(crate) fn resolve_map(
    map_file: Option<&PathBuf>,
    metadata: &TrainingMetadata,
) -> Result<GridMap> {
    if let Some(path) = map_file {
        return GridMap::load_from_file(path)
            .with_context(|| format!("failed to load map from {}", path.display()));
    }
    if let Some(description) = &metadata.map {
        return GridMap::from_text(description)
            .with_context(|| format!("saved agent has an invalid map description '{description}'"));
    }
    Ok(GridMap::default())
}

/// Build an environment matching the saved agent's training setup unless
/// overridden.
pub(crate) fn build_env(
    map: GridMap,
    slippery: Option<bool>,
    metadata: &TrainingMetadata,
    step_limit: usize,
) -> GridWorld {
    let slippery = slippery
        .or(metadata.slippery)
        .unwrap_or(false);
    let mut env = GridWorld::new(map).with_slippery(slippery);
    if step_limit > 0 {
        env = env.with_step_limit(step_limit);
    }
    env
}

pub(crate) fn load_agent(path: &Path) -> Result<SavedAgent> {
    SavedAgent::load_from_file(path)
        .with_context(|| format!("failed to load agent from {}", path.display()))
}
