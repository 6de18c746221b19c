//! Viewport command handler
//!
//! Lists up to ten random places inside a map rectangle.

use crate::cli::database_path;
use crate::cli::search::unknown_format;
use crate::config::Config;
use crate::error::Result;
use crate::format::get_formatter;
use crate::place::PlaceStore;
use crate::viewport::{find_places, Viewport};
use clap::Args;
use std::path::PathBuf;

/// Viewport command arguments
#[derive(Args)]
pub struct ViewportArgs {
    /// Southwest corner as lat,lng
    #[arg(allow_hyphen_values = true)]
    pub sw: String,

    /// Northeast corner as lat,lng
    #[arg(allow_hyphen_values = true)]
    pub ne: String,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Places database (overrides database.path)
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,
}

/// Run the viewport command
pub async fn run(args: ViewportArgs) -> Result<()> {
    let viewport = Viewport::parse(&args.sw, &args.ne)?;
    let formatter = get_formatter(&args.format).ok_or_else(|| unknown_format(&args.format))?;

    let config = Config::load()?;
    let store = PlaceStore::open(&database_path(&config, args.database)).await?;
    let places = find_places(&store, &viewport).await?;

    print!("{}", formatter.format(&places)?);
    Ok(())
}
