//! Status command handler
//!
//! Shows database contents, external service configuration and whether a
//! server is answering.

use crate::cli::database_path;
use crate::config::Config;
use crate::error::Result;
use crate::news::source_from_config;
use crate::place::PlaceStore;
use clap::Args;
use std::path::PathBuf;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Places database (overrides database.path)
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,

    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    println!("mashup v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let path = database_path(&config, args.database);
    println!("Database: {}", path.display());
    match PlaceStore::open(&path).await {
        Ok(store) => match store.count().await {
            Ok(count) => println!("  Places: {}", count),
            Err(e) => println!("  Error: {}", e),
        },
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    let news = source_from_config(&config.news)?;
    println!("News source: {}", news.name());
    println!(
        "Map API key: {}",
        if config.maps_api_key().is_some() {
            "configured"
        } else {
            "NOT configured"
        }
    );
    println!();

    if args.server {
        check_server_status(&config).await;
    }

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/search?q=a", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) if response.status().is_success() => {
            println!("Server: RUNNING on {}", config.server_addr());
        }
        Ok(response) => {
            println!("Server: ERROR (status {})", response.status());
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
}
