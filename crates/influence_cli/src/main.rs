//! Influence - diagram scene planner
//!
//! Reads a `diagram.toml` description and prints the laid-out scene as JSON:
//! node boxes, arrow routes, relabel plan and reveal order.

mod config;
mod plan;
mod project;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::DiagramConfig;
use crate::plan::ScenePlan;

/// Plan influence diagram scenes
#[derive(Parser, Debug)]
#[command(name = "influence")]
#[command(about = "Lay out influence diagrams for animated physics explainers")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a diagram and print the scene plan
    Plan {
        /// Description file, or a directory containing diagram.toml
        #[arg(default_value = ".")]
        file: PathBuf,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a directory with a sample diagram.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Diagram name
        #[arg(long, default_value = "spring")]
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Plan {
            file,
            compact,
            output,
        } => {
            let config = DiagramConfig::load(&file)?;
            let plan = ScenePlan::build(&config)?;
            let json = plan.to_json(!compact)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote scene plan to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Init { path, name } => {
            project::create_project(&path, &name)?;
            info!("Created diagram {name} in {}", path.display());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
