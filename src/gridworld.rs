//! Deterministic grid world environment

pub mod config;
pub mod world;

pub use config::{GridWorldConfig, Rewards};
pub use world::{GridWorld, MAX_GRID_SIZE};
