//! Observer port - abstraction for training telemetry
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling the training
//! loop to specific output formats or metrics.

use crate::{
    Result,
    pipeline::{EpisodeResult, StepObservation},
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different kinds of data during
/// training: progress bars, JSONL or CSV export, running metrics, log lines.
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - After each step's Q-value update
///    - `on_episode_end(result)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```
/// use qgrid::{pipeline::EpisodeResult, ports::Observer};
///
/// struct GoalCounter {
///     goals: usize,
/// }
///
/// impl Observer for GoalCounter {
///     fn on_episode_end(&mut self, result: &EpisodeResult) -> qgrid::Result<()> {
///         if result.reached_goal() {
///             self.goals += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    ///
    /// # Default Implementation
    ///
    /// Does nothing. Override to initialize observation state.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts, with its 0-based index.
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every step, once the Q-table has been updated.
    ///
    /// Episodes that start on a terminal cell produce no steps.
    fn on_step(&mut self, _step: &StepObservation) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal state.
    fn on_episode_end(&mut self, _result: &EpisodeResult) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    ///
    /// Use this to finalize outputs, flush files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
