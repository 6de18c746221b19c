//! Import command handler
//!
//! Loads a GeoNames postal-code dump into the places database.

use crate::cli::{database_path, init_logging};
use crate::config::Config;
use crate::error::Result;
use crate::place::import::{import_file, read_file};
use crate::place::PlaceStore;
use clap::Args;
use std::path::PathBuf;

/// Import command arguments
#[derive(Args)]
pub struct ImportArgs {
    /// Tab-separated dump, e.g. US.txt from download.geonames.org/export/zip
    pub file: PathBuf,

    /// Places database (overrides database.path)
    #[arg(long, short = 'd')]
    pub database: Option<PathBuf>,

    /// Parse the file without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the import command
pub async fn run(args: ImportArgs) -> Result<()> {
    init_logging("info");

    if args.dry_run {
        let places = read_file(&args.file)?;
        println!("{} places parsed from {}", places.len(), args.file.display());
        return Ok(());
    }

    let config = Config::load()?;
    let path = database_path(&config, args.database);
    let store = PlaceStore::open_writable(&path).await?;
    let imported = import_file(&store, &args.file).await?;

    println!(
        "Imported {} places into {} ({} total)",
        imported,
        path.display(),
        store.count().await?
    );
    Ok(())
}
