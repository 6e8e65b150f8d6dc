//! Train command - Run Q-learning on a grid world and report the result

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::{info, warn};

use crate::{
    analysis::{GreedyPolicy, LearningCurve, Rollout, greedy_policy, rollout},
    cli::{config::RunConfig, output},
    gridworld::GridWorld,
    pipeline::{
        CsvObserver, EpisodeResult, JsonlObserver, LoggingObserver, ProgressObserver, Termination,
        TrainingLoop, TrainingResult,
    },
    types::Position,
};

/// Window used for the trailing learning-curve statistics.
const CURVE_WINDOW: usize = 100;

#[derive(Debug, Serialize)]
struct SummaryStats {
    total_episodes: usize,
    goals: usize,
    traps: usize,
    step_limits: usize,
    success_rate: f64,
    final_epsilon: f64,
    final_mean_reward: f64,
    final_reward_std_dev: f64,
    final_mean_steps: f64,
    first_success: Option<usize>,
}

impl SummaryStats {
    fn new(result: &TrainingResult, curve: &LearningCurve) -> Self {
        Self {
            total_episodes: result.total_episodes(),
            goals: result.count(Termination::Goal),
            traps: result.count(Termination::Trap),
            step_limits: result.count(Termination::StepLimit),
            success_rate: result.success_rate(),
            final_epsilon: result.final_epsilon,
            final_mean_reward: curve.final_mean_reward,
            final_reward_std_dev: curve.final_reward_std_dev,
            final_mean_steps: curve.final_mean_steps,
            first_success: curve.first_success,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    config: &'a RunConfig,
    training: SummaryStats,
    moving_average: &'a [f64],
    episodes: &'a [EpisodeResult],
    policy: &'a GreedyPolicy,
    state_values: Vec<Vec<f64>>,
    rollout: &'a Rollout,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

fn parse_position(value: &str) -> std::result::Result<Position, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected 'row,col', got '{value}'"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row in '{value}': {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column in '{value}': {e}"))?;
    Ok(Position::new(row, col))
}

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// JSON run configuration; flags below override its fields
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    pub grid_size: Option<usize>,

    /// Goal cell as `row,col`
    #[arg(long, value_parser = parse_position)]
    pub goal: Option<Position>,

    /// Start cell as `row,col`
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Trap cells as `row,col` (repeatable; replaces the configured traps)
    #[arg(long = "trap", value_parser = parse_position)]
    pub traps: Vec<Position>,

    /// Remove every trap from the configuration
    #[arg(long, conflicts_with = "traps")]
    pub no_traps: bool,

    /// Number of training episodes
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Step cap per episode
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Learning rate α
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub discount: Option<f64>,

    /// Exploration rate ε
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Multiplicative ε decay per episode
    #[arg(long)]
    pub epsilon_decay: Option<f64>,

    /// Lower bound for the decayed ε
    #[arg(long)]
    pub min_epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Step cap for the greedy rollout after training
    #[arg(long)]
    pub rollout_steps: Option<usize>,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional CSV file with one row per episode
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Log the trailing average reward every N episodes
    #[arg(long, default_value_t = 100)]
    pub log_every: usize,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Skip the printed report
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl TrainArgs {
    /// Merge the optional config file with command-line overrides.
    pub fn resolve_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("loading run configuration from {}", path.display()))?,
            None => RunConfig::default(),
        };

        let world = &mut config.world;
        if let Some(size) = self.grid_size {
            world.grid_size = size;
        }
        if let Some(goal) = self.goal {
            world.goal = goal;
        }
        if let Some(start) = self.start {
            world.start = start;
        }
        if self.no_traps {
            world.traps.clear();
        } else if !self.traps.is_empty() {
            world.traps = self.traps.clone();
        }

        let params = &mut config.hyperparameters;
        if let Some(episodes) = self.episodes {
            params.num_episodes = episodes;
        }
        if let Some(max_steps) = self.max_steps {
            params.max_steps_per_episode = max_steps;
        }
        if let Some(lr) = self.learning_rate {
            params.learning_rate = lr;
        }
        if let Some(gamma) = self.discount {
            params.discount_factor = gamma;
        }
        if let Some(epsilon) = self.epsilon {
            params.epsilon = epsilon;
        }
        if let Some(decay) = self.epsilon_decay {
            params.epsilon_decay = decay;
        }
        if let Some(min_epsilon) = self.min_epsilon {
            params.min_epsilon = min_epsilon;
        }

        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(steps) = self.rollout_steps {
            config.rollout_steps = steps;
        }
        if self.log_every == 0 {
            return Err(anyhow!("--log-every must be a positive integer"));
        }
        Ok(config)
    }
}

fn state_values(result: &TrainingResult) -> Vec<Vec<f64>> {
    let size = result.q_table.grid_size() as i32;
    (0..size)
        .map(|row| {
            (0..size)
                .map(|col| result.q_table.best_value(Position::new(row, col)))
                .collect()
        })
        .collect()
}

fn print_report(
    world: &GridWorld,
    result: &TrainingResult,
    curve: &LearningCurve,
    policy: &GreedyPolicy,
    path: &Rollout,
) {
    output::print_section("Training Complete");
    output::print_stats_table(&[
        ("Episodes", result.total_episodes().to_string()),
        (
            "Reached goal",
            format!(
                "{} ({:.1}%)",
                result.count(Termination::Goal),
                result.success_rate() * 100.0
            ),
        ),
        ("Fell in trap", result.count(Termination::Trap).to_string()),
        ("Hit step limit", result.count(Termination::StepLimit).to_string()),
        (
            "Final avg reward",
            format!(
                "{:.2} ± {:.2} (last {})",
                curve.final_mean_reward,
                curve.final_reward_std_dev,
                curve.window.min(result.total_episodes())
            ),
        ),
        ("Final avg steps", format!("{:.2}", curve.final_mean_steps)),
        ("Final epsilon", format!("{:.4}", result.final_epsilon)),
    ]);

    output::print_section("Learned Policy");
    print!("{}", output::format_policy_grid(policy, world));

    output::print_section("State Values");
    print!("{}", output::format_value_grid(&result.q_table));

    output::print_section("Greedy Rollout");
    output::print_kv("Outcome", &path.outcome.to_string());
    output::print_kv("Steps", &path.steps().to_string());
    output::print_kv("Path", &output::format_path(path));
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let summary_path = args.summary.as_deref().map(sanitize_summary_path);

    let world = GridWorld::new(config.world.clone())?;
    let mut training = TrainingLoop::new(world.clone(), config.hyperparameters.clone())?
        .with_observer(Box::new(LoggingObserver::new(args.log_every, CURVE_WINDOW)));

    if !args.no_progress {
        training = training.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        training = training.with_observer(Box::new(JsonlObserver::new(path)?));
    }
    if let Some(path) = &args.csv {
        training = training.with_observer(Box::new(CsvObserver::new(path)?));
    }

    let result = training.run_seeded(config.seed)?;

    let curve = LearningCurve::from_episodes(&result.episodes, CURVE_WINDOW);
    let policy = greedy_policy(&result.q_table, &world);
    let path = rollout(&result.q_table, &world, world.start(), config.rollout_steps);

    if path.is_success() {
        info!(steps = path.steps(), "greedy rollout reached the goal");
    } else {
        warn!(outcome = %path.outcome, steps = path.steps(), "greedy rollout did not reach the goal");
    }

    if !args.quiet {
        print_report(&world, &result, &curve, &policy, &path);
    }

    if let Some(summary_path) = summary_path {
        if let Some(parent) = summary_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating summary directory {}", parent.display()))?;
        }
        let summary = TrainingSummaryFile {
            config: &config,
            training: SummaryStats::new(&result, &curve),
            moving_average: &curve.moving_average,
            episodes: &result.episodes,
            policy: &policy,
            state_values: state_values(&result),
            rollout: &path,
        };
        let file = File::create(&summary_path)
            .with_context(|| format!("creating summary file {}", summary_path.display()))?;
        to_writer_pretty(file, &summary)?;
        info!(path = %summary_path.display(), "wrote training summary");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
        let dir = format!("out{}", std::path::MAIN_SEPARATOR);
        assert_eq!(
            sanitize_summary_path(Path::new(&dir)),
            PathBuf::from("out").join("training_summary.json")
        );
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("2, 3"), Ok(Position::new(2, 3)));
        assert!(parse_position("2;3").is_err());
        assert!(parse_position("a,3").is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let args = TrainArgs::parse_from([
            "train",
            "--grid-size",
            "3",
            "--goal",
            "0,2",
            "--start",
            "2,0",
            "--no-traps",
            "--episodes",
            "20",
            "--seed",
            "9",
        ]);
        let config = args.resolve_config().unwrap();
        assert_eq!(config.world.grid_size, 3);
        assert_eq!(config.world.goal, Position::new(0, 2));
        assert!(config.world.traps.is_empty());
        assert_eq!(config.hyperparameters.num_episodes, 20);
        assert_eq!(config.hyperparameters.learning_rate, 0.1);
        assert_eq!(config.seed, Some(9));
    }
}
