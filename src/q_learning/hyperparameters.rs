//! Learning hyperparameters

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn default_epsilon_decay() -> f64 {
    1.0
}

/// Hyperparameters of a training run, fixed for its duration.
///
/// Rates are not range-checked: values outside `[0, 1]` are accepted and
/// simply make learning diverge. Only the episode and step limits are
/// validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// α, fraction of the TD error applied per update
    pub learning_rate: f64,
    /// γ, weight of the bootstrapped next-state value
    pub discount_factor: f64,
    /// Initial exploration rate
    pub epsilon: f64,
    /// Multiplicative decay of ε after each episode (1.0 = fixed)
    #[serde(default = "default_epsilon_decay")]
    pub epsilon_decay: f64,
    /// Floor for the decayed ε
    #[serde(default)]
    pub min_epsilon: f64,
    /// Number of training episodes
    pub num_episodes: usize,
    /// Step cap per episode
    pub max_steps_per_episode: usize,
}

impl Hyperparameters {
    /// Check the integer limits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] if `num_episodes` or
    /// `max_steps_per_episode` is zero.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("num_episodes", self.num_episodes),
            ("max_steps_per_episode", self.max_steps_per_episode),
        ] {
            if value == 0 {
                return Err(Error::InvalidHyperparameter {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the per-episode decay and the floor for ε.
    pub fn with_epsilon_decay(mut self, epsilon_decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_num_episodes(mut self, num_episodes: usize) -> Self {
        self.num_episodes = num_episodes;
        self
    }

    pub fn with_max_steps_per_episode(mut self, max_steps: usize) -> Self {
        self.max_steps_per_episode = max_steps;
        self
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.95,
            epsilon: 0.2,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            num_episodes: 500,
            max_steps_per_episode: 50,
        }
    }
}
