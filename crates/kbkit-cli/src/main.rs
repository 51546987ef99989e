//! kbkit CLI
//!
//! Command-line interface for the kbkit document cache

use clap::{Parser, Subcommand};
use kbkit_core::config::KbConfig;
use kbkit_core::logging_facility;
use kbkit_core::{RendererKind, Severity};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "kbkit")]
#[command(about = "kbkit - Cached document tooling", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Minimum severity (debug, info, warning, error, critical)
    #[arg(long, global = true)]
    log_level: Option<Severity>,

    /// Table renderer (plain, rich, silent)
    #[arg(long, global = true)]
    table: Option<RendererKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Document cache operations
    Cache(commands::cache::CacheArgs),
}

impl Cli {
    /// File, then environment, then flags
    fn resolve_config(&self) -> Result<KbConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => KbConfig::load(path)?,
            None => KbConfig::default(),
        }
        .apply_env()?;

        // --verbose alone must make verbose records visible
        if self.verbose {
            config.output.verbose = true;
            config.logging.level = Severity::Debug;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(table) = self.table {
            config.output.renderer = table;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.resolve_config()?;
    logging_facility::init(&config.logging);
    tracing::debug!(config = ?config, "configuration resolved");

    match cli.command {
        Commands::Cache(args) => commands::cache::execute(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
