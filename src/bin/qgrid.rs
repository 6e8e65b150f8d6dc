//! qgrid CLI - Tabular Q-learning in a grid world
//!
//! This CLI provides:
//! - Training with configurable grid, rewards and hyperparameters
//! - Episode telemetry export (JSONL, CSV) and a JSON run summary
//! - The default run configuration as an editable JSON template

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qgrid")]
#[command(version, about = "Q-learning agent for a deterministic grid world", long_about = None)]
struct Cli {
    /// Enable debug logging (one line per episode)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent and report the learned policy
    Train(Box<qgrid::cli::commands::train::TrainArgs>),

    /// Print the default run configuration
    Config(qgrid::cli::commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("qgrid={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Train(args) => qgrid::cli::commands::train::execute(*args),
        Commands::Config(args) => qgrid::cli::commands::config::execute(args),
    }
}
