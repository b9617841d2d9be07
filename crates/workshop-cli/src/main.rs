//! Workshop Sim CLI
//!
//! Thin driver around `workshop-core`: loads a JSON configuration, runs the
//! four-stage simulation and prints the aggregate stats.
//!
//! ## Commands
//!
//! - `run`: run the simulation (optionally from a JSON config file)
//! - `sample-config`: print the default configuration as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use workshop_core::{init_tracing, run_simulation, SimConfig};

#[derive(Parser)]
#[command(name = "workshop-sim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Four-stage vehicle workshop pipeline simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the workshop simulation
    Run {
        /// Path to a JSON configuration file (defaults used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured random seed (0 derives from time)
        #[arg(long)]
        seed: Option<u64>,

        /// Suppress the per-vehicle ENTRA/SALE event lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the default configuration as JSON
    SampleConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    match cli.command {
        Commands::Run {
            config,
            seed,
            quiet,
        } => cmd_run(config.as_deref(), seed, quiet).await,
        Commands::SampleConfig => cmd_sample_config(),
    }
}

/// Run the simulation and print the aggregate stats.
async fn cmd_run(config: Option<&std::path::Path>, seed: Option<u64>, quiet: bool) -> Result<()> {
    let mut cfg = load_config(config)?;
    if let Some(seed) = seed {
        cfg.seed = seed;
    }

    let stats = run_simulation(cfg, !quiet)
        .await
        .context("simulation run failed")?;

    println!();
    println!("Vehicles processed: {}", stats.total_vehicles);
    println!("Elapsed:            {:.3}s", stats.elapsed.as_secs_f64());
    println!("Strategy:           {}", stats.strategy);

    Ok(())
}

/// Print the default configuration so it can be edited and fed back in.
fn cmd_sample_config() -> Result<()> {
    let cfg = SimConfig::default();
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {path:?}"))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON config in {path:?}"))
        }
        None => Ok(SimConfig::default()),
    }
}
