//! Configuration types for the grid world.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Reward constants for entering a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// Reward for entering the goal cell
    pub goal: f64,
    /// Reward for entering a trap cell
    pub trap: f64,
    /// Reward for any other move, including a bounce off a wall
    pub step: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            goal: 100.0,
            trap: -50.0,
            step: -1.0,
        }
    }
}

/// Immutable description of a grid world.
///
/// Validation happens in [`GridWorld::new`](super::GridWorld::new); this type
/// is plain data so it can be loaded from JSON and adjusted with the
/// builder-style `with_*` methods.
///
/// # Examples
///
/// ```
/// use qgrid::gridworld::{GridWorld, GridWorldConfig};
/// use qgrid::types::Position;
///
/// let config = GridWorldConfig::new(3, Position::new(0, 2), Position::new(2, 0))
///     .with_traps(vec![Position::new(1, 1)]);
/// let world = GridWorld::new(config)?;
/// assert!(world.is_trap(Position::new(1, 1)));
/// # Ok::<(), qgrid::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWorldConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Absorbing goal cell
    pub goal: Position,
    /// Absorbing trap cells
    #[serde(default)]
    pub traps: Vec<Position>,
    /// Cell every episode starts from
    pub start: Position,
    #[serde(default)]
    pub rewards: Rewards,
}

impl GridWorldConfig {
    /// Create a configuration without traps and with default rewards.
    pub fn new(grid_size: usize, goal: Position, start: Position) -> Self {
        Self {
            grid_size,
            goal,
            traps: Vec::new(),
            start,
            rewards: Rewards::default(),
        }
    }

    /// Set the trap cells.
    pub fn with_traps(mut self, traps: Vec<Position>) -> Self {
        self.traps = traps;
        self
    }

    /// Set the reward constants.
    pub fn with_rewards(mut self, rewards: Rewards) -> Self {
        self.rewards = rewards;
        self
    }

    /// Set the start cell.
    pub fn with_start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }
}

impl Default for GridWorldConfig {
    /// 5x5 grid with the goal in the top-right corner, two traps and the
    /// start in the bottom-left corner.
    fn default() -> Self {
        Self::new(5, Position::new(0, 4), Position::new(4, 0))
            .with_traps(vec![Position::new(2, 2), Position::new(3, 1)])
    }
}
