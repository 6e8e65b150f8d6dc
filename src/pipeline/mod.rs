//! Training pipeline
//!
//! This module provides:
//! - The episodic Q-learning training loop
//! - Per-episode and per-step records
//! - Observers that record telemetry during training

pub mod episode;
pub mod observers;
pub mod training;

pub use episode::{EpisodeResult, StepObservation, Termination};
// Re-export observer implementations (adapters)
pub use observers::{
    CsvObserver, JsonlObserver, LoggingObserver, MetricsObserver, MetricsSummary, Observation,
    ProgressObserver,
};
pub use training::{TrainingLoop, TrainingResult, build_rng};

pub use crate::ports::Observer;
