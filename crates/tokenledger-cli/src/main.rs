//! # tokenledger-cli
//!
//! Command-line interface for tokenledger.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tokenledger_core::Config;
use tokenledger_store::JsonFileStore;
use tokenledger_tracker::UsageTracker;

mod commands;
mod output;

/// tokenledger - local token usage ledger
#[derive(Parser)]
#[command(name = "tokenledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the ledger file (overrides config)
    #[arg(long, global = true, env = "TOKENLEDGER_LEDGER", value_name = "PATH")]
    ledger: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current usage
    Status,
    /// Record one interaction and update the used count
    Record {
        /// Input text sent to the model
        #[arg(short, long, default_value = "")]
        input: String,
        /// Output text returned by the model
        #[arg(short, long, default_value = "")]
        output: String,
    },
    /// Grant the configured bonus tokens
    Grant,
    /// Write the usage record directly
    Set {
        /// New total token count
        #[arg(long)]
        total: Option<u64>,
        /// New used token count
        #[arg(long)]
        used: Option<u64>,
    },
    /// Estimate the token count of the given text
    Estimate {
        /// Text to estimate
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show effective configuration
    Show,
    /// Show the config file location
    Path,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load configuration
    let config = Config::load_validated().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    // Estimation and config inspection don't touch the ledger.
    match cli.command {
        Commands::Estimate { ref text } => {
            return commands::estimate::handle(text, cli.json);
        }
        Commands::Config { ref action } => {
            return commands::config::handle(action, &config);
        }
        _ => {}
    }

    let store = match cli.ledger.clone().or_else(|| config.storage.path.clone()) {
        Some(path) => JsonFileStore::new(path)?,
        None => JsonFileStore::open_default()?,
    };
    let tracker = UsageTracker::with_quota(store, config.quota.clone());

    match cli.command {
        Commands::Status => {
            commands::status::handle(&tracker, &config.display, cli.json)?;
        }
        Commands::Record { input, output } => {
            commands::record::handle(&tracker, &input, &output, cli.json)?;
        }
        Commands::Grant => {
            commands::grant::handle(&tracker, cli.json)?;
        }
        Commands::Set { total, used } => {
            commands::set::handle(&tracker, total, used, cli.json)?;
        }
        Commands::Estimate { .. } | Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
