//! Tabular Q-learning in a deterministic grid world
//!
//! This crate provides:
//! - A grid world with a goal, traps, wall bounces and per-cell rewards
//! - A dense Q-table with the Q-learning update rule
//! - ε-greedy exploration driven by an injected random source
//! - An episodic training loop with observer hooks for telemetry
//! - Greedy policy extraction and greedy rollouts
//!
//! ```
//! use qgrid::{
//!     analysis::rollout,
//!     gridworld::{GridWorld, GridWorldConfig},
//!     pipeline::TrainingLoop,
//!     q_learning::Hyperparameters,
//! };
//!
//! let world = GridWorld::new(GridWorldConfig::default())?;
//! let params = Hyperparameters::default().with_num_episodes(50);
//! let mut training = TrainingLoop::new(world.clone(), params)?;
//! let result = training.run_seeded(Some(42))?;
//! assert_eq!(result.episodes.len(), 50);
//!
//! let path = rollout(&result.q_table, &world, world.start(), 20);
//! assert!(path.steps() <= 20);
//! # Ok::<(), qgrid::Error>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use error::{Error, Result};
pub use types::{Action, Position};
