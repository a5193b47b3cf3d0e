//! Server shared state
//!
//! Holds the immutable configuration and the page controller.

use crate::client::{BackendApi, BackendClient};
use crate::config::Config;
use crate::controller::PageController;
use crate::error::Result;
use crate::geo::{DeviceLocator, LocationProvider};
use std::sync::Arc;

/// Shared state for the HTTP server
pub struct AppState<B, L> {
    /// Configuration, fixed at startup
    pub config: Arc<Config>,

    /// The page's controller; one page per server
    pub controller: PageController<B, L>,
}

impl AppState<BackendClient, DeviceLocator> {
    /// Build state wired to the real backend and location source
    pub fn from_config(config: Config) -> Result<Self> {
        let backend = BackendClient::new(&config)?;
        let locator = DeviceLocator::from_config(&config);
        Ok(Self::new(Arc::new(config), PageController::new(backend, locator)))
    }
}

impl<B: BackendApi, L: LocationProvider> AppState<B, L> {
    pub fn new(config: Arc<Config>, controller: PageController<B, L>) -> Self {
        Self { config, controller }
    }

    /// The map embed key, if configured
    pub fn maps_key(&self) -> Option<&str> {
        self.config.maps_key()
    }
}
