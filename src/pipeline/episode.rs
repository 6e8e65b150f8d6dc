//! Per-episode and per-step training records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    q_learning::TdUpdate,
    types::{Action, Position},
};

/// Terminal state of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Agent entered the goal cell
    Goal,
    /// Agent entered a trap cell
    Trap,
    /// Step cap reached without entering a terminal cell
    StepLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Termination::Goal => "goal",
            Termination::Trap => "trap",
            Termination::StepLimit => "step_limit",
        };
        f.write_str(label)
    }
}

/// Summary of one completed episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeResult {
    /// Episode index (0-based)
    pub episode: usize,
    /// Sum of rewards collected during the episode
    pub total_reward: f64,
    /// Number of steps taken
    pub steps: usize,
    /// How the episode ended
    pub termination: Termination,
    /// Exploration rate used throughout the episode
    pub epsilon: f64,
}

impl EpisodeResult {
    pub fn reached_goal(&self) -> bool {
        self.termination == Termination::Goal
    }
}

/// Observation of a single step during an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObservation {
    /// Episode number
    pub episode: usize,
    /// Step number within the episode (0-based)
    pub step: usize,
    /// Position before the move
    pub position: Position,
    /// Action selected
    pub action: Action,
    /// Position after the move (equal to `position` on a wall bounce)
    pub next_position: Position,
    /// Reward for entering `next_position`
    pub reward: f64,
    /// Q-value update applied for this step
    pub update: TdUpdate,
}
