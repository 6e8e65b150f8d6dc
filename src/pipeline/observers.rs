//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! the training loop to specific output formats.

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::episode::{EpisodeResult, StepObservation, Termination};
use crate::{Result, ports::Observer};

/// Complete observation of a training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Episode summary
    #[serde(flatten)]
    pub result: EpisodeResult,
    /// Steps in the episode
    pub steps: Vec<StepObservation>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    traps: usize,
    limits: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            traps: 0,
            limits: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} T:{} L:{}", self.goals, self.traps, self.limits)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (G:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        match result.termination {
            Termination::Goal => self.goals += 1,
            Termination::Trap => self.traps += 1,
            Termination::StepLimit => self.limits += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(result.episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks training metrics
#[derive(Debug, Default)]
pub struct MetricsObserver {
    goals: usize,
    traps: usize,
    step_limits: usize,
    total_episodes: usize,
    total_steps: usize,
    total_reward: f64,
    bounces: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            count as f64 / self.total_episodes as f64
        }
    }

    /// Fraction of episodes ending at the goal
    pub fn goal_rate(&self) -> f64 {
        self.rate(self.goals)
    }

    /// Fraction of episodes ending in a trap
    pub fn trap_rate(&self) -> f64 {
        self.rate(self.traps)
    }

    /// Fraction of episodes cut off by the step cap
    pub fn step_limit_rate(&self) -> f64 {
        self.rate(self.step_limits)
    }

    fn per_episode(&self, total: f64) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            total / self.total_episodes as f64
        }
    }

    pub fn avg_episode_length(&self) -> f64 {
        self.per_episode(self.total_steps as f64)
    }

    pub fn avg_reward(&self) -> f64 {
        self.per_episode(self.total_reward)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            goals: self.goals,
            traps: self.traps,
            step_limits: self.step_limits,
            goal_rate: self.goal_rate(),
            trap_rate: self.trap_rate(),
            step_limit_rate: self.step_limit_rate(),
            avg_episode_length: self.avg_episode_length(),
            avg_reward: self.avg_reward(),
            wall_bounces: self.bounces,
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub goals: usize,
    pub traps: usize,
    pub step_limits: usize,
    pub goal_rate: f64,
    pub trap_rate: f64,
    pub step_limit_rate: f64,
    pub avg_episode_length: f64,
    pub avg_reward: f64,
    pub wall_bounces: usize,
}

impl Observer for MetricsObserver {
    fn on_step(&mut self, step: &StepObservation) -> Result<()> {
        if step.position == step.next_position {
            self.bounces += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        self.total_episodes += 1;
        self.total_steps += result.steps;
        self.total_reward += result.total_reward;
        match result.termination {
            Termination::Goal => self.goals += 1,
            Termination::Trap => self.traps += 1,
            Termination::StepLimit => self.step_limits += 1,
        }
        Ok(())
    }
}

/// JSONL observer - Exports one JSON object per episode, steps included
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(&mut self, step: &StepObservation) -> Result<()> {
        self.current_steps.push(step.clone());
        Ok(())
    }

    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        let observation = Observation {
            result: result.clone(),
            steps: std::mem::take(&mut self.current_steps),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// CSV observer - One row per episode, for learning-curve plots
pub struct CsvObserver {
    writer: csv::Writer<File>,
}

impl CsvObserver {
    /// Create a new CSV observer; the header row is written with the first record
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(Self { writer })
    }
}

impl Observer for CsvObserver {
    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        self.writer.serialize(result)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Logging observer - Emits the trailing average reward every `interval` episodes
pub struct LoggingObserver {
    interval: usize,
    window: usize,
    recent: VecDeque<f64>,
}

impl LoggingObserver {
    /// Create a logging observer.
    ///
    /// # Arguments
    /// * `interval` - Log every N episodes (e.g., 100)
    /// * `window` - Number of trailing episodes averaged
    pub fn new(interval: usize, window: usize) -> Self {
        Self {
            interval: interval.max(1),
            window: window.max(1),
            recent: VecDeque::new(),
        }
    }

    /// Average reward over the trailing window
    pub fn trailing_average(&self) -> f64 {
        if self.recent.is_empty() {
            0.0
        } else {
            self.recent.iter().sum::<f64>() / self.recent.len() as f64
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

impl Observer for LoggingObserver {
    fn on_episode_end(&mut self, result: &EpisodeResult) -> Result<()> {
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(result.total_reward);

        let played = result.episode + 1;
        if played.is_multiple_of(self.interval) {
            info!(
                episode = played,
                window = self.recent.len(),
                avg_reward = self.trailing_average(),
                epsilon = result.epsilon,
                "training progress"
            );
        }
        Ok(())
    }
}
