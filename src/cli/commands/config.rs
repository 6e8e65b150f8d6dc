//! Config command - Print or write the default run configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::config::RunConfig;

#[derive(Parser, Debug)]
#[command(about = "Print the default run configuration as JSON")]
pub struct ConfigArgs {
    /// Write the configuration to this file instead of stdout
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = RunConfig::default();
    match args.output {
        Some(path) => {
            config
                .save(&path)
                .with_context(|| format!("writing configuration to {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
