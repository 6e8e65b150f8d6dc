//! Learning-curve statistics over episode results

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::pipeline::{EpisodeResult, Termination};

/// Summary of how rewards and episode lengths evolved during training
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningCurve {
    /// Window length used for the moving average and the trailing statistics
    pub window: usize,
    /// Moving average of total reward; entry `i` covers episodes `i+1-window..=i`
    /// (fewer at the start)
    pub moving_average: Vec<f64>,
    /// Mean reward over the last `window` episodes
    pub final_mean_reward: f64,
    /// Sample standard deviation of the reward over the last `window` episodes
    pub final_reward_std_dev: f64,
    /// Mean episode length over the last `window` episodes
    pub final_mean_steps: f64,
    /// Fraction of all episodes that reached the goal
    pub success_rate: f64,
    /// First episode that reached the goal
    pub first_success: Option<usize>,
}

impl LearningCurve {
    /// Compute the curve; `window` is clamped to at least one episode.
    pub fn from_episodes(episodes: &[EpisodeResult], window: usize) -> Self {
        let window = window.max(1);
        let rewards: Vec<f64> = episodes.iter().map(|e| e.total_reward).collect();

        let mut moving_average = Vec::with_capacity(rewards.len());
        let mut running = 0.0;
        for (i, reward) in rewards.iter().enumerate() {
            running += reward;
            if i >= window {
                running -= rewards[i - window];
            }
            moving_average.push(running / (i + 1).min(window) as f64);
        }

        let tail_start = rewards.len().saturating_sub(window);
        let tail = &rewards[tail_start..];
        let (final_mean_reward, final_reward_std_dev) = match tail.len() {
            0 => (0.0, 0.0),
            1 => (tail[0], 0.0),
            _ => (tail.mean(), tail.std_dev()),
        };
        let final_mean_steps = if tail.is_empty() {
            0.0
        } else {
            episodes[tail_start..]
                .iter()
                .map(|e| e.steps as f64)
                .mean()
        };

        let goals = episodes
            .iter()
            .filter(|e| e.termination == Termination::Goal)
            .count();
        let success_rate = if episodes.is_empty() {
            0.0
        } else {
            goals as f64 / episodes.len() as f64
        };

        Self {
            window,
            moving_average,
            final_mean_reward,
            final_reward_std_dev,
            final_mean_steps,
            success_rate,
            first_success: episodes.iter().find(|e| e.reached_goal()).map(|e| e.episode),
        }
    }
}
