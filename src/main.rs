//! mashup CLI entry point
//!
//! Map mashup server - CLI + web app

use mashup::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
