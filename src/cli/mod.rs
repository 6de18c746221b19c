//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod articles;
pub mod config;
pub mod import;
pub mod search;
pub mod serve;
pub mod status;
pub mod viewport;

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Places and local news for an interactive map
#[derive(Parser)]
#[command(name = "mashup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Search places by name, region or postal code
    Search(search::SearchArgs),

    /// List places within a viewport
    Viewport(viewport::ViewportArgs),

    /// Look up news articles for a place
    Articles(articles::ArticlesArgs),

    /// Import a GeoNames postal-code dump
    Import(import::ImportArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show database and server status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Viewport(args) => viewport::run(args).await,
        Commands::Articles(args) => articles::run(args).await,
        Commands::Import(args) => import::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

/// Install the log subscriber; `RUST_LOG` overrides `default_filter`
pub(crate) fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Database path from the command line, falling back to the config
pub(crate) fn database_path(config: &Config, flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| config.database.path.clone())
}
