//! Greedy rollout from a start cell

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{gridworld::GridWorld, q_learning::QTable, types::Position};

/// How a greedy rollout ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutOutcome {
    /// Reached the goal
    Success,
    /// Entered a trap
    TrapHit,
    /// The greedy action bounced off a wall, so the rollout would repeat forever
    Stuck,
    /// Ran out of steps without reaching a terminal cell
    StepLimitExceeded,
}

impl fmt::Display for RolloutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RolloutOutcome::Success => "success",
            RolloutOutcome::TrapHit => "trap hit",
            RolloutOutcome::Stuck => "stuck",
            RolloutOutcome::StepLimitExceeded => "step limit exceeded",
        };
        f.write_str(label)
    }
}

/// A greedy trajectory through the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollout {
    /// Visited cells, starting with the start cell
    pub path: Vec<Position>,
    pub outcome: RolloutOutcome,
}

impl Rollout {
    /// Number of moves made.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Cell the rollout ended in.
    pub fn final_position(&self) -> Option<Position> {
        self.path.last().copied()
    }

    pub fn is_success(&self) -> bool {
        self.outcome == RolloutOutcome::Success
    }
}

/// Follow the greedy policy from `start` for at most `max_steps` moves.
///
/// The table is only read. A move that leaves the agent in place ends the
/// rollout as [`RolloutOutcome::Stuck`]; longer cycles run into the step cap.
pub fn rollout(q_table: &QTable, world: &GridWorld, start: Position, max_steps: usize) -> Rollout {
    let mut path = vec![start];

    if world.is_goal(start) {
        return Rollout {
            path,
            outcome: RolloutOutcome::Success,
        };
    }
    if world.is_trap(start) {
        return Rollout {
            path,
            outcome: RolloutOutcome::TrapHit,
        };
    }

    let mut current = start;
    for _ in 0..max_steps {
        let action = q_table.best_action(current);
        let next = world.step(current, action);
        if next == current {
            return Rollout {
                path,
                outcome: RolloutOutcome::Stuck,
            };
        }

        path.push(next);
        current = next;

        if world.is_goal(current) {
            return Rollout {
                path,
                outcome: RolloutOutcome::Success,
            };
        }
        if world.is_trap(current) {
            return Rollout {
                path,
                outcome: RolloutOutcome::TrapHit,
            };
        }
    }

    Rollout {
        path,
        outcome: RolloutOutcome::StepLimitExceeded,
    }
}
