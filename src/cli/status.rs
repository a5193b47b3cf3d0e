//! Status command handler
//!
//! Shows backend reachability and how searches will be made.

use crate::client::BackendClient;
use crate::config::Config;
use crate::error::Result;
use crate::geo::DeviceLocator;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check a different backend URL
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Check if the web UI is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = args.backend {
        config.backend.url = url;
    }

    println!("placefinder v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let client = BackendClient::new(&config)?;
    println!("Backend: {}", client.base_url());
    match client.health().await {
        Ok(health) => {
            println!("  Status: {}", health.status);
            if let Some(version) = health.version {
                println!("  Version: {}", version);
            }
        }
        Err(e) => println!("  Status: UNREACHABLE ({})", e),
    }
    println!();

    println!(
        "Map: {}",
        if config.maps_key().is_some() {
            "enabled"
        } else {
            "disabled (no maps.embed_api_key)"
        }
    );
    println!(
        "Location: {}",
        DeviceLocator::from_config(&config).describe()
    );

    if args.server {
        println!();
        check_server_status(&config).await;
    }

    Ok(())
}

/// Check if the web UI is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/health", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) if response.status().is_success() => {
            println!("Server: RUNNING on {}", config.server_addr());
            if let Ok(status) = response.json::<serde_json::Value>().await {
                if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                    println!("  Version: {}", version);
                }
            }
        }
        Ok(response) => println!("Server: ERROR (status {})", response.status()),
        Err(_) => println!("Server: NOT RUNNING on {}", config.server_addr()),
    }
}
