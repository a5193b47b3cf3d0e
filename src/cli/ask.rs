//! Ask command handler
//!
//! Runs one search through the page controller and prints the result.

use crate::client::BackendClient;
use crate::config::Config;
use crate::controller::state::RequestState;
use crate::controller::{PageController, SubmitOutcome};
use crate::error::{Error, Result};
use crate::geo::{Coordinates, DeviceLocator};
use crate::render::{available_renderers, get_renderer, ResultView};
use clap::Args;

/// Ask command arguments
#[derive(Args)]
pub struct AskArgs {
    /// What you're looking for, e.g. "Where can I eat ramen near Blok M?"
    #[arg(required_unless_present = "list_formats")]
    pub query: Option<String>,

    /// Your latitude
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Your longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Don't share any location with the backend
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub no_location: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl AskArgs {
    /// Location source for this invocation
    fn locator(&self, config: &Config) -> DeviceLocator {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => DeviceLocator::Fixed(Coordinates::new(lat, lng)),
            _ if self.no_location => DeviceLocator::Disabled,
            _ => DeviceLocator::from_config(config),
        }
    }
}

/// Run the ask command
pub async fn run(args: AskArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    super::init_logging("warn");

    let renderer = get_renderer(&args.format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", args.format)))?;

    let config = Config::load()?;
    let backend = BackendClient::new(&config)?;
    let controller = PageController::new(backend, args.locator(&config));

    let query = args.query.as_deref().unwrap_or_default();
    let response = match controller.submit(query).await {
        SubmitOutcome::Finished(RequestState::Success(response)) => response,
        SubmitOutcome::Finished(RequestState::Error(message)) => {
            return Err(Error::BackendRequest(message))
        }
        SubmitOutcome::Rejected => {
            return Err(Error::Config("Query must not be empty".to_string()))
        }
        SubmitOutcome::Busy | SubmitOutcome::Finished(_) => {
            return Err(Error::Server("Search did not complete".to_string()))
        }
    };

    let snapshot = controller.snapshot().await;
    if let Some(label) = snapshot.location_label() {
        eprintln!("Searching near: {}", label);
    }

    let view = ResultView::new(&response, snapshot.card_origin(), config.maps_key());
    let output = renderer.render(&view)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output.trim_end());
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_renderers() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
