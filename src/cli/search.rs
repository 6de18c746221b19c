//! Search command handler
//!
//! Runs a free-text place search against the local database.

use crate::cli::database_path;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::place::PlaceStore;
use crate::search::search;
use clap::Args;
use std::path::PathBuf;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Query, e.g. "Cambridge, MA" or "95139"
    pub query: String,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Places database (overrides database.path)
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.query.is_empty() {
        return Err(Error::MissingParameter("query".to_string()));
    }

    let formatter = get_formatter(&args.format).ok_or_else(|| unknown_format(&args.format))?;

    let config = Config::load()?;
    let store = PlaceStore::open(&database_path(&config, args.database)).await?;
    let places = search(&store, &args.query).await?;

    print!("{}", formatter.format(&places)?);
    Ok(())
}

/// Error listing the formats that do exist
pub(crate) fn unknown_format(name: &str) -> Error {
    let known: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
    Error::InvalidParameter(format!(
        "Unknown format: {} (available: {})",
        name,
        known.join(", ")
    ))
}
