//! Articles command handler
//!
//! Looks up news for a place through the configured news source.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::news::{lookup_articles, source_from_config};
use clap::Args;

/// Articles command arguments
#[derive(Args)]
pub struct ArticlesArgs {
    /// Place to look up, e.g. "Cambridge, MA"
    pub geo: String,
}

/// Run the articles command
pub async fn run(args: ArticlesArgs) -> Result<()> {
    if args.geo.is_empty() {
        return Err(Error::MissingParameter("geo".to_string()));
    }

    let config = Config::load()?;
    let source = source_from_config(&config.news)?;
    let articles = lookup_articles(source.as_ref(), &args.geo).await?;

    println!("{}", serde_json::to_string_pretty(&articles)?);
    Ok(())
}
