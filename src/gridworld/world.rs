//! Grid world dynamics: rewards, bounds and transitions.

use std::collections::BTreeSet;

use super::config::GridWorldConfig;
use crate::{
    Error, Result,
    types::{Action, Position},
};

/// Largest accepted side length. The dense Q-table for it takes 128 MiB.
pub const MAX_GRID_SIZE: usize = 2048;

/// A validated, immutable grid world.
///
/// All operations are pure. Moving off the edge leaves the agent where it
/// was; the step is still consumed and still pays the step reward.
#[derive(Debug, Clone)]
pub struct GridWorld {
    config: GridWorldConfig,
    size: i32,
    traps: BTreeSet<Position>,
}

impl GridWorld {
    /// Validate a configuration and build the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the grid is empty or larger
    /// than [`MAX_GRID_SIZE`], if the goal, the start or any trap lies outside
    /// the grid, or if the goal is also a trap.
    pub fn new(config: GridWorldConfig) -> Result<Self> {
        if config.grid_size == 0 {
            return Err(Error::config("grid size must be positive"));
        }
        let table_len = config
            .grid_size
            .checked_mul(config.grid_size)
            .and_then(|cells| cells.checked_mul(Action::COUNT));
        if config.grid_size > MAX_GRID_SIZE || table_len.is_none() {
            return Err(Error::config(format!(
                "grid size {} exceeds the maximum of {MAX_GRID_SIZE}",
                config.grid_size
            )));
        }
        let size = i32::try_from(config.grid_size).map_err(|_| {
            Error::config(format!("grid size {} is too large", config.grid_size))
        })?;
        let in_bounds = |p: Position| (0..size).contains(&p.row) && (0..size).contains(&p.col);

        if !in_bounds(config.goal) {
            return Err(Error::config(format!(
                "goal {} lies outside the {size}x{size} grid",
                config.goal
            )));
        }
        if !in_bounds(config.start) {
            return Err(Error::config(format!(
                "start {} lies outside the {size}x{size} grid",
                config.start
            )));
        }

        let mut traps = BTreeSet::new();
        for &trap in &config.traps {
            if !in_bounds(trap) {
                return Err(Error::config(format!(
                    "trap {trap} lies outside the {size}x{size} grid"
                )));
            }
            if trap == config.goal {
                return Err(Error::config(format!("goal {trap} is also a trap")));
            }
            traps.insert(trap);
        }

        Ok(Self {
            config,
            size,
            traps,
        })
    }

    /// Reward for entering `position`.
    pub fn reward(&self, position: Position) -> f64 {
        let rewards = &self.config.rewards;
        if position == self.config.goal {
            rewards.goal
        } else if self.traps.contains(&position) {
            rewards.trap
        } else {
            rewards.step
        }
    }

    /// Whether both coordinates lie within `[0, grid_size)`.
    pub fn is_valid(&self, position: Position) -> bool {
        (0..self.size).contains(&position.row) && (0..self.size).contains(&position.col)
    }

    /// Deterministic transition. Invalid moves bounce back to `position`.
    pub fn step(&self, position: Position, action: Action) -> Position {
        let candidate = position.offset(action);
        if self.is_valid(candidate) {
            candidate
        } else {
            position
        }
    }

    pub fn is_goal(&self, position: Position) -> bool {
        position == self.config.goal
    }

    pub fn is_trap(&self, position: Position) -> bool {
        self.traps.contains(&position)
    }

    /// Goal and trap cells end an episode.
    pub fn is_terminal(&self, position: Position) -> bool {
        self.is_goal(position) || self.is_trap(position)
    }

    pub fn start(&self) -> Position {
        self.config.start
    }

    pub fn goal(&self) -> Position {
        self.config.goal
    }

    pub fn traps(&self) -> impl Iterator<Item = Position> + '_ {
        self.traps.iter().copied()
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn config(&self) -> &GridWorldConfig {
        &self.config
    }

    /// Every cell of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::Rewards;

    fn sample_world() -> GridWorld {
        GridWorld::new(GridWorldConfig::default()).unwrap()
    }

    #[test]
    fn test_reward_lookup() {
        let world = sample_world();
        assert_eq!(world.reward(Position::new(0, 4)), 100.0);
        assert_eq!(world.reward(Position::new(2, 2)), -50.0);
        assert_eq!(world.reward(Position::new(3, 1)), -50.0);
        assert_eq!(world.reward(Position::new(4, 0)), -1.0);
    }

    #[test]
    fn test_step_bounces_off_walls() {
        let world = sample_world();
        let corner = Position::new(4, 0);
        assert_eq!(world.step(corner, Action::Down), corner);
        assert_eq!(world.step(corner, Action::Left), corner);
        assert_eq!(world.step(corner, Action::Up), Position::new(3, 0));
        assert_eq!(world.step(corner, Action::Right), Position::new(4, 1));
    }

    #[test]
    fn test_goal_outside_grid_is_rejected() {
        let config = GridWorldConfig::new(3, Position::new(3, 0), Position::new(0, 0));
        let err = GridWorld::new(config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_trap_outside_grid_is_rejected() {
        let config = GridWorldConfig::new(3, Position::new(0, 2), Position::new(2, 0))
            .with_traps(vec![Position::new(-1, 1)]);
        assert!(matches!(
            GridWorld::new(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_goal_on_trap_is_rejected() {
        let goal = Position::new(0, 2);
        let config =
            GridWorldConfig::new(3, goal, Position::new(2, 0)).with_traps(vec![goal]);
        assert!(matches!(
            GridWorld::new(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_zero_size_grid_is_rejected() {
        let config = GridWorldConfig::new(0, Position::new(0, 0), Position::new(0, 0));
        assert!(GridWorld::new(config).is_err());
    }

    #[test]
    fn test_start_on_trap_is_allowed() {
        let start = Position::new(1, 1);
        let config = GridWorldConfig::new(3, Position::new(0, 0), start)
            .with_traps(vec![start])
            .with_rewards(Rewards {
                goal: 10.0,
                trap: -10.0,
                step: -1.0,
            });
        let world = GridWorld::new(config).unwrap();
        assert!(world.is_terminal(world.start()));
    }

    #[test]
    fn test_positions_are_row_major() {
        let world = GridWorld::new(GridWorldConfig::new(
            2,
            Position::new(0, 0),
            Position::new(1, 1),
        ))
        .unwrap();
        let cells: Vec<_> = world.positions().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }
}
