//! Core value types shared by the environment, the Q-table and the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the grid, addressed by row and column.
///
/// Coordinates are signed so that a candidate move off the edge of the grid
/// (e.g. row -1) is representable and can be rejected by
/// [`GridWorld::is_valid`](crate::gridworld::GridWorld::is_valid).
/// Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Create a new position.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position reached by moving one cell in `action`'s direction, without
    /// any bounds check.
    pub fn offset(self, action: Action) -> Self {
        let (d_row, d_col) = action.delta();
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Manhattan (L1) distance to another position.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four moves available in every cell.
///
/// Declaration order (`Up < Right < Down < Left`) is the tie-breaking
/// priority used by greedy action selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    /// All actions in tie-breaking priority order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Number of actions.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index of the action (0-3), used for Q-table storage.
    pub const fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
        }
    }

    /// Inverse of [`Action::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// `(row, col)` displacement of the move.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
        }
    }

    /// Arrow glyph for policy grids.
    pub const fn arrow(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Right => '→',
            Action::Down => '↓',
            Action::Left => '←',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
        };
        f.write_str(name)
    }
}
