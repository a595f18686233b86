//! Graphfold CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "graphfold")]
#[command(about = "Inspect the compacted visible subgraph of a graph snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// TOML file with compaction settings (e.g. `block_size = 64`)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the visible graph in short-index space
    Show {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Full indices to make visible before printing
        #[arg(long)]
        reveal: Vec<usize>,

        /// Full indices to hide before printing
        #[arg(long)]
        hide: Vec<usize>,
    },
    /// Verify the compaction invariants for a snapshot
    Check {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "graphfold={log_level},graphfold_core={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Show { snapshot, reveal, hide } => commands::show(&snapshot, config, &reveal, &hide),
        Commands::Check { snapshot } => commands::check(&snapshot, config),
        Commands::Version => {
            println!("Graphfold v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
