//! Run configuration shared by CLI commands

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, gridworld::GridWorldConfig, q_learning::Hyperparameters};

fn default_rollout_steps() -> usize {
    20
}

/// Everything needed to reproduce a training run
///
/// Defaults describe a 5x5 grid with the goal in the top-right corner, traps
/// at (2,2) and (3,1), the start in the bottom-left corner, and 500 episodes
/// of at most 50 steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub world: GridWorldConfig,

    #[serde(default)]
    pub hyperparameters: Hyperparameters,

    /// Random seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,

    /// Step cap for the post-training greedy rollout
    #[serde(default = "default_rollout_steps")]
    pub rollout_steps: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            world: GridWorldConfig::default(),
            hyperparameters: Hyperparameters::default(),
            seed: None,
            rollout_steps: default_rollout_steps(),
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file; missing sections fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {}", path.display()),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
