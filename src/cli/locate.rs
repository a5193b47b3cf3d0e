//! Locate command handler
//!
//! Shows the location searches would be made from, and its label.

use crate::client::BackendClient;
use crate::config::Config;
use crate::controller::PageController;
use crate::error::Result;
use crate::geo::{ip_location::IpLocator, DeviceLocator};
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Ignore any cached location and look it up again
    #[arg(long)]
    pub refresh: bool,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    super::init_logging("warn");

    let config = Config::load()?;
    let locator = DeviceLocator::from_config(&config);
    println!("Source: {}", locator.describe());

    if !args.refresh && matches!(locator, DeviceLocator::Ip(_)) {
        println!(
            "(cached for up to {} minutes; use --refresh to look up again)",
            IpLocator::cache_duration().as_secs() / 60
        );
    }

    let controller = PageController::new(BackendClient::new(&config)?, locator);
    let location = if args.refresh {
        controller.refresh_location().await
    } else {
        controller.ensure_location().await
    };

    match location {
        Some(location) => {
            println!(
                "Location: ({:.4}, {:.4})",
                location.coords.lat, location.coords.lng
            );
            println!("Label: {}", location.label.as_deref().unwrap_or("(unknown)"));
        }
        None => {
            println!("Location: unavailable");
            println!("Searches will be sent without a location.");
        }
    }

    println!("\nExample queries:");
    for example in controller.example_queries().await {
        println!("  {}", example);
    }

    Ok(())
}
