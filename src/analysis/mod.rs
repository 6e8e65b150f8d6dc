//! Post-training analysis
//!
//! Read-only tools over a trained Q-table and the episode history: the greedy
//! policy per cell, a greedy rollout from the start cell, and learning-curve
//! statistics.

pub mod policy;
pub mod rollout;
pub mod stats;

pub use policy::{GreedyPolicy, greedy_policy};
pub use rollout::{Rollout, RolloutOutcome, rollout};
pub use stats::LearningCurve;
