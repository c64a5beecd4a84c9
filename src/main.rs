//! capstone-search - semantic search over Launch School Capstone presentations
//!
//! Type a topic, get the exact moments in the presentation videos where it was
//! discussed. Embedding and vector lookup happen behind the hosted search API;
//! this binary owns the query state, debouncing and presentation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod config;
mod search;
mod ui;

/// Search Launch School Capstone presentations by meaning
#[derive(Parser)]
#[command(name = "capstone-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Semantic search over Launch School Capstone presentations", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the presentations
    Search {
        /// Search query
        query: String,

        /// Maximum results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print raw results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pick an example query and search it
    Examples {
        /// Only print the example queries
        #[arg(long)]
        list: bool,

        /// Maximum results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Incremental full-screen search
    #[cfg(feature = "tui")]
    Live,

    /// Show configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize configuration file
        #[arg(long)]
        init: bool,
    },

    /// Show version and settings
    Info,
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false);

    // The live view owns the terminal; log lines would tear it
    if quiet {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::sink).finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "tui")]
    let quiet = matches!(cli.command, Some(Commands::Live));
    #[cfg(not(feature = "tui"))]
    let quiet = false;
    init_logging(cli.verbose, quiet)?;

    let config = config::load_config(cli.config.as_deref())?;

    info!("capstone-search v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Search { query, limit, json }) => {
            cli::search::run(config, &query, limit, json).await?;
        }
        Some(Commands::Examples { list, limit }) => {
            cli::examples::run(config, list, limit).await?;
        }
        #[cfg(feature = "tui")]
        Some(Commands::Live) => {
            cli::live::run(config).await?;
        }
        Some(Commands::Config { show, init }) => {
            if init {
                config::init_config(cli.config.as_deref())?;
            } else if show {
                config::show_config(&config)?;
            }
        }
        Some(Commands::Info) => {
            cli::info::run(&config)?;
        }
        None => {
            // Default: the empty-query prompt
            cli::search::run(config, "", 10, false).await?;
        }
    }

    Ok(())
}
