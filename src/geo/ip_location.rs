//! IP-based geolocation
//!
//! Stands in for a device location sensor. Uses ip-api.com with a
//! file-based cache so repeated searches don't repeat the lookup.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::config::defaults::APP_DIR_NAME;
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Cached location data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedLocation {
    coords: Coordinates,
    timestamp: u64,
}

impl IpLocator {
    /// Create a new IP locator with default cache path
    pub fn new() -> Self {
        let cache_path = dirs::cache_dir()
            .map(|p| p.join(APP_DIR_NAME).join(IP_LOCATION_CACHE_FILE));

        Self {
            client: reqwest::Client::new(),
            endpoint: IP_API_URL.to_string(),
            cache_path,
        }
    }

    /// Create an IP locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Self {
        Self {
            cache_path: Some(cache_path),
            ..Self::without_cache()
        }
    }

    /// Create an IP locator without caching
    pub fn without_cache() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: IP_API_URL.to_string(),
            cache_path: None,
        }
    }

    /// Point the locator at a different lookup endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Get current location based on IP address
    pub async fn locate(&self) -> Result<Coordinates> {
        if let Some(cached) = self.load_cache() {
            return Ok(cached);
        }

        let coords = self.fetch_location().await?;
        self.save_cache(&coords);

        Ok(coords)
    }

    /// Fetch location from the lookup endpoint
    async fn fetch_location(&self) -> Result<Coordinates> {
        let response = self.client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::LocationUnavailable(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::LocationUnavailable(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            Error::LocationUnavailable(format!("Failed to parse IP location response: {}", e))
        })?;

        if data.status != "success" {
            return Err(Error::LocationUnavailable(format!(
                "IP location lookup failed: {}",
                data.message.as_deref().unwrap_or("unknown reason")
            )));
        }

        match (data.lat, data.lon) {
            (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
            _ => Err(Error::LocationUnavailable(
                "No coordinates in IP location response".to_string(),
            )),
        }
    }

    /// Load cached location if valid
    fn load_cache(&self) -> Option<Coordinates> {
        let cache_path = self.cache_path.as_ref()?;

        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedLocation = serde_json::from_str(&content).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        if now.saturating_sub(cached.timestamp) < IP_LOCATION_TTL_SECS {
            Some(cached.coords)
        } else {
            None
        }
    }

    /// Save location to cache
    fn save_cache(&self, coords: &Coordinates) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let cached = CachedLocation {
            coords: *coords,
            timestamp,
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }

    /// Get cache duration
    pub fn cache_duration() -> Duration {
        Duration::from_secs(IP_LOCATION_TTL_SECS)
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    async fn serve_json(body: serde_json::Value) -> String {
        let app = Router::new().route("/json", get(move || async move { Json(body) }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/json", addr)
    }

    #[test]
    fn test_ip_locator_without_cache() {
        let locator = IpLocator::without_cache();
        assert!(locator.cache_path.is_none());
        assert_eq!(locator.endpoint, IP_API_URL);
    }

    #[test]
    fn test_cache_operations() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");
        let locator = IpLocator::with_cache_path(cache_path.clone());

        assert!(locator.load_cache().is_none());

        locator.save_cache(&Coordinates::new(-6.2, 106.8));

        let loaded = locator.load_cache().unwrap();
        assert_eq!(loaded, Coordinates::new(-6.2, 106.8));

        locator.clear_cache();
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_expired_cache_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("stale.json");
        let stale = CachedLocation {
            coords: Coordinates::new(1.0, 2.0),
            timestamp: 0,
        };
        fs::write(&cache_path, serde_json::to_string(&stale).unwrap()).unwrap();

        let locator = IpLocator::with_cache_path(cache_path);
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_cache_duration() {
        assert_eq!(IpLocator::cache_duration().as_secs(), 3600);
    }

    #[tokio::test]
    async fn test_locate_success_populates_cache() {
        let endpoint = serve_json(serde_json::json!({
            "status": "success",
            "lat": -6.2,
            "lon": 106.8
        }))
        .await;
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("ip.json");
        let locator = IpLocator::with_cache_path(cache_path.clone()).with_endpoint(endpoint);

        let coords = locator.locate().await.unwrap();
        assert_eq!(coords, Coordinates::new(-6.2, 106.8));
        assert!(cache_path.exists());
    }

    #[tokio::test]
    async fn test_locate_failure_status() {
        let endpoint = serve_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        }))
        .await;
        let locator = IpLocator::without_cache().with_endpoint(endpoint);

        let err = locator.locate().await.unwrap_err();
        assert!(matches!(err, Error::LocationUnavailable(_)));
        assert!(err.to_string().contains("reserved range"));
    }
}
