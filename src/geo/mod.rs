//! Geolocation adapter
//!
//! Resolves the device location from a fixed coordinate pair, an IP lookup,
//! or nothing at all. Every lookup failure degrades to `None`; callers never
//! see an error from this module's `LocationProvider` surface.

pub mod ip_location;

use crate::config::Config;
use crate::error::{Error, Result};
use ip_location::IpLocator;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, warn};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// The user's location as known to the page: coordinates plus an optional
/// human-readable label (e.g. a city name from reverse geocoding)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub coords: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl UserLocation {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Trait for device location sources
///
/// Implementations must swallow their own failures and return `None`.
pub trait LocationProvider: Send + Sync {
    /// Resolve the current location, reusing any cached answer
    fn resolve_location(&self) -> impl Future<Output = Option<Coordinates>> + Send;

    /// Resolve the current location, bypassing any cached answer
    fn refresh_location(&self) -> impl Future<Output = Option<Coordinates>> + Send;
}

/// Location source selected from configuration or the command line
#[derive(Debug)]
pub enum DeviceLocator {
    /// User-supplied coordinates
    Fixed(Coordinates),
    /// IP geolocation with file cache
    Ip(IpLocator),
    /// Location sharing turned off
    Disabled,
}

impl DeviceLocator {
    /// Pick the locator described by the `[location]` config section
    pub fn from_config(config: &Config) -> Self {
        if let Some(coords) = config.location.fixed() {
            return Self::Fixed(coords);
        }
        match config.location.source.as_str() {
            "none" => Self::Disabled,
            _ => Self::Ip(IpLocator::new()),
        }
    }

    /// Short name of the source, for status output
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Ip(_) => "ip",
            Self::Disabled => "disabled",
        }
    }

    async fn lookup(&self, refresh: bool) -> Option<Coordinates> {
        let result = match self {
            Self::Fixed(coords) => coords.validate().map(|_| *coords),
            Self::Ip(locator) => {
                if refresh {
                    locator.clear_cache();
                }
                locator.locate().await
            }
            Self::Disabled => {
                debug!("Location lookup skipped: location is disabled");
                return None;
            }
        };

        match result {
            Ok(coords) => {
                debug!("Resolved location ({:.4}, {:.4})", coords.lat, coords.lng);
                Some(coords)
            }
            Err(e) => {
                warn!("Location unavailable, continuing without it: {}", e);
                None
            }
        }
    }
}

impl LocationProvider for DeviceLocator {
    async fn resolve_location(&self) -> Option<Coordinates> {
        self.lookup(false).await
    }

    async fn refresh_location(&self) -> Option<Coordinates> {
        self.lookup(true).await
    }
}
