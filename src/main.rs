//! Boundary CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// Environment variable that overrides the default log filter
const LOG_ENV: &str = "BOUNDARY_LOG";

#[derive(Parser)]
#[command(name = "boundary")]
#[command(about = "Classify TypeScript/JSX files as client, server, or universal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root path (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Module resolution config (defaults to tsconfig.json, then jsconfig.json)
    #[arg(long, global = true)]
    tsconfig: Option<PathBuf>,

    /// Extra exclude glob, relative to the root (repeatable)
    #[arg(short, long = "exclude", global = true)]
    exclude: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph once and print every file's type
    Scan {
        /// Print a JSON snapshot instead of `path<TAB>type` lines
        #[arg(long)]
        json: bool,

        /// Neither read nor write the snapshot cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Keep the graph up to date and print type changes as they happen
    Watch {
        /// Quiet period, in milliseconds, that closes a batch of changes
        #[arg(long, default_value = "100")]
        debounce_ms: u64,
    },
    /// Clear the cache
    Clear,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("boundary={}", log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Boundary v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Scan { json, no_cache } => {
            let config = commands::engine_config(&cli.root, cli.tsconfig, cli.exclude)?;
            commands::scan(config, json, no_cache)
        }
        Commands::Watch { debounce_ms } => {
            let config = commands::engine_config(&cli.root, cli.tsconfig, cli.exclude)?;
            commands::watch(config, debounce_ms).await
        }
        Commands::Clear => {
            commands::clear(cli.root)
        }
        Commands::Version => {
            println!("Boundary v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
