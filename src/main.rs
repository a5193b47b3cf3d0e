//! placefinder CLI entry point
//!
//! Place recommendations from an AI backend - CLI + web app

use placefinder::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
