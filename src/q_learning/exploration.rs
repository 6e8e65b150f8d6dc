//! ε-greedy exploration

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    q_learning::q_table::QTable,
    types::{Action, Position},
};

/// ε-greedy action selection
///
/// With probability `epsilon` a uniformly random action is returned,
/// otherwise the table's greedy action. Randomness comes only from `rng`.
pub fn select_action<R: Rng + ?Sized>(
    q_table: &QTable,
    position: Position,
    epsilon: f64,
    rng: &mut R,
) -> Action {
    if rng.random::<f64>() < epsilon {
        // Explore: random action
        Action::ALL[rng.random_range(0..Action::COUNT)]
    } else {
        // Exploit: greedy action based on Q-values
        q_table.best_action(position)
    }
}

/// Exploration rate schedule with multiplicative per-episode decay.
///
/// A decay of `1.0` keeps ε fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    epsilon: f64,
    initial_epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
}

impl EpsilonGreedy {
    /// Create a schedule.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Initial exploration rate
    /// * `epsilon_decay` - Multiplicative decay per episode
    /// * `min_epsilon` - Minimum exploration rate
    pub fn new(epsilon: f64, epsilon_decay: f64, min_epsilon: f64) -> Self {
        Self {
            epsilon,
            initial_epsilon: epsilon,
            epsilon_decay,
            min_epsilon,
        }
    }

    /// Fixed exploration rate.
    pub fn constant(epsilon: f64) -> Self {
        Self::new(epsilon, 1.0, 0.0)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Select an action at the current exploration rate.
    pub fn select_action<R: Rng + ?Sized>(
        &self,
        q_table: &QTable,
        position: Position,
        rng: &mut R,
    ) -> Action {
        select_action(q_table, position, self.epsilon, rng)
    }

    /// Decay epsilon after an episode
    pub fn decay(&mut self) {
        if self.epsilon_decay != 1.0 {
            self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
        }
    }

    /// Restore the initial exploration rate.
    pub fn reset(&mut self) {
        self.epsilon = self.initial_epsilon;
    }
}
