//! placefinder: ask an AI place-recommendation backend where to go
//!
//! A library, CLI and small web UI in front of a backend that answers natural
//! language queries like "Where can I eat ramen near Blok M?" with an
//! explanation and a list of places.
//!
//! ## Features
//!
//! - Device location from fixed coordinates or an IP lookup, with a city label
//! - Place cards with rating, travel times per transport mode and directions
//! - Embedded map centered on the results
//! - Page state machine: idle, loading, success, error
//! - Web UI + JSON API + CLI interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use placefinder::client::BackendClient;
//! use placefinder::controller::{PageController, SubmitOutcome};
//! use placefinder::geo::{Coordinates, DeviceLocator};
//! use placefinder::Config;
//!
//! # async fn demo() -> placefinder::Result<()> {
//! let config = Config::default();
//! let locator = DeviceLocator::Fixed(Coordinates::new(-6.2446, 106.7997));
//! let controller = PageController::new(BackendClient::new(&config)?, locator);
//!
//! if let SubmitOutcome::Finished(state) = controller.submit("ramen near Blok M").await {
//!     if let Some(response) = state.response() {
//!         println!("{} places", response.places.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod geo;
pub mod model;
pub mod render;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use controller::{PageController, SubmitOutcome};
pub use error::{Error, Result};
pub use geo::{Coordinates, UserLocation};
pub use model::{Place, QueryResponse, TransportMode};
