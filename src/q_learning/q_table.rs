//! Dense Q-table for grid-world temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    types::{Action, Position},
};

/// Outcome of a single Q-learning update, reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdUpdate {
    /// Estimate before the update
    pub old_value: f64,
    /// `reward + γ max_a' Q(s',a')`
    pub target: f64,
    /// `target - old_value`
    pub td_error: f64,
    /// Estimate written back
    pub new_value: f64,
}

/// Q-table mapping (position, action) pairs to value estimates
///
/// Values live in a flat vector of `grid_size² × 4` entries, all starting at
/// zero. [`QTable::update`] is the only way to change an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    grid_size: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialised table for a square grid.
    ///
    /// Sizes come from a validated [`GridWorld`](crate::gridworld::GridWorld),
    /// which caps them at [`MAX_GRID_SIZE`](crate::gridworld::MAX_GRID_SIZE).
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            values: vec![0.0; grid_size * grid_size * Action::COUNT],
        }
    }

    fn index(&self, position: Position, action: Action) -> Option<usize> {
        let row = usize::try_from(position.row).ok()?;
        let col = usize::try_from(position.col).ok()?;
        if row >= self.grid_size || col >= self.grid_size {
            return None;
        }
        Some((row * self.grid_size + col) * Action::COUNT + action.index())
    }

    /// Current estimate; zero for never-updated pairs and cells outside the table.
    pub fn value(&self, position: Position, action: Action) -> f64 {
        self.index(position, action)
            .map_or(0.0, |idx| self.values[idx])
    }

    /// All four estimates for a cell, in [`Action::ALL`] order.
    pub fn values(&self, position: Position) -> [f64; Action::COUNT] {
        Action::ALL.map(|action| self.value(position, action))
    }

    /// Greedy action. Ties go to the earliest action in `Up, Right, Down, Left`.
    pub fn best_action(&self, position: Position) -> Action {
        let mut best = Action::Up;
        let mut best_value = self.value(position, best);
        for action in &Action::ALL[1..] {
            let value = self.value(position, *action);
            if value > best_value {
                best = *action;
                best_value = value;
            }
        }
        best
    }

    /// Estimate of the greedy action, so it always agrees with [`Self::best_action`].
    pub fn best_value(&self, position: Position) -> f64 {
        self.value(position, self.best_action(position))
    }

    /// Overwrite the estimate for a state-action pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfBounds`] if `position` is not a cell of
    /// the grid this table was built for.
    pub fn update(&mut self, position: Position, action: Action, new_value: f64) -> Result<()> {
        let idx = self
            .index(position, action)
            .ok_or(Error::PositionOutOfBounds { position })?;
        self.values[idx] = new_value;
        Ok(())
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The bootstrap term always reads `next`, terminal or not; terminal cells
    /// are never updated, so their estimates stay at zero.
    pub fn q_learning_update(
        &mut self,
        position: Position,
        action: Action,
        reward: f64,
        next: Position,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Result<TdUpdate> {
        let old_value = self.value(position, action);
        let target = reward + discount_factor * self.best_value(next);
        let td_error = target - old_value;
        let new_value = old_value + learning_rate * td_error;
        self.update(position, action, new_value)?;
        Ok(TdUpdate {
            old_value,
            target,
            td_error,
            new_value,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of cells with at least one non-zero estimate.
    pub fn visited_states(&self) -> usize {
        self.values
            .chunks_exact(Action::COUNT)
            .filter(|cell| cell.iter().any(|&v| v != 0.0))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(3);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(qtable.values(Position::new(row, col)), [0.0; 4]);
            }
        }
        assert_eq!(qtable.visited_states(), 0);
    }

    #[test]
    fn test_qtable_update_get() {
        let mut qtable = QTable::new(3);
        let state = Position::new(1, 2);
        qtable.update(state, Action::Down, 1.5).unwrap();
        assert_eq!(qtable.value(state, Action::Down), 1.5);
        assert_eq!(qtable.value(state, Action::Up), 0.0);
        assert_eq!(qtable.visited_states(), 1);
    }

    #[test]
    fn test_update_outside_grid_fails() {
        let mut qtable = QTable::new(3);
        let err = qtable.update(Position::new(3, 0), Action::Up, 1.0).unwrap_err();
        assert!(matches!(err, Error::PositionOutOfBounds { .. }));
        assert_eq!(qtable.value(Position::new(-1, 0), Action::Up), 0.0);
    }

    #[test]
    fn test_best_value_and_action() {
        let mut qtable = QTable::new(3);
        let state = Position::new(0, 0);
        qtable.update(state, Action::Up, 0.5).unwrap();
        qtable.update(state, Action::Right, 1.5).unwrap();
        qtable.update(state, Action::Down, 0.8).unwrap();
        qtable.update(state, Action::Left, -2.0).unwrap();

        assert_eq!(qtable.best_value(state), 1.5);
        assert_eq!(qtable.best_action(state), Action::Right);
    }

    #[test]
    fn test_best_action_ties_follow_declaration_order() {
        let mut qtable = QTable::new(2);
        let state = Position::new(1, 1);
        assert_eq!(qtable.best_action(state), Action::Up);

        qtable.update(state, Action::Up, -1.0).unwrap();
        assert_eq!(qtable.best_action(state), Action::Right);

        qtable.update(state, Action::Right, -1.0).unwrap();
        qtable.update(state, Action::Left, 3.0).unwrap();
        qtable.update(state, Action::Down, 3.0).unwrap();
        assert_eq!(qtable.best_action(state), Action::Down);
    }

    #[test]
    fn test_best_value_agrees_with_best_action_on_nan() {
        let mut qtable = QTable::new(2);
        let state = Position::new(0, 0);
        qtable.update(state, Action::Up, f64::NAN).unwrap();
        qtable.update(state, Action::Down, 2.0).unwrap();

        let best = qtable.best_action(state);
        let value = qtable.best_value(state);
        let expected = qtable.value(state, best);
        assert!(value == expected || (value.is_nan() && expected.is_nan()));
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(3);
        let state = Position::new(1, 1);
        let next_state = Position::new(0, 1);

        qtable.update(next_state, Action::Left, 1.0).unwrap();
        qtable.update(next_state, Action::Right, 2.0).unwrap();

        let update = qtable
            .q_learning_update(state, Action::Up, 0.0, next_state, 0.5, 0.99)
            .unwrap();

        // Q(s,up) = 0.0 + 0.5 * (0.0 + 0.99 * 2.0 - 0.0) = 0.99
        assert!((update.new_value - 0.99).abs() < 1e-12);
        assert!((update.target - 1.98).abs() < 1e-12);
        assert_eq!(qtable.value(state, Action::Up), update.new_value);
    }

    #[test]
    fn test_first_step_cost_update() {
        let mut qtable = QTable::new(5);
        let update = qtable
            .q_learning_update(
                Position::new(4, 0),
                Action::Up,
                -1.0,
                Position::new(3, 0),
                0.1,
                0.95,
            )
            .unwrap();
        assert_eq!(update.old_value, 0.0);
        assert_eq!(update.td_error, -1.0);
        assert!((update.new_value - (-0.1)).abs() < 1e-12);
    }
}
