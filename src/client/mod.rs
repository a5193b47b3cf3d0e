//! Backend client
//!
//! Talks to the place-recommendation backend over HTTP. The base URL is fixed
//! when the client is built; it is never re-read per call.
//!
//! Query failures of every kind (transport, non-2xx, undecodable body) come
//! back as a single `Error::BackendRequest` carrying a user-facing message.
//! Reverse geocoding never fails: it returns `None` and logs instead.

use crate::config::Config;
use crate::constants::backend::{
    GENERIC_ERROR, GEOCODE_PATH, HEALTH_PATH, QUERY_FAILED, QUERY_PATH,
};
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::model::{ErrorBody, GeocodeResponse, HealthStatus, QueryRequest, QueryResponse};
use std::future::Future;
use tracing::{debug, info, warn};

/// Operations the page needs from the backend
pub trait BackendApi: Send + Sync {
    /// Ask the backend for places matching a free-text query
    fn submit_query(
        &self,
        query: &str,
        location: Option<Coordinates>,
    ) -> impl Future<Output = Result<QueryResponse>> + Send;

    /// Turn coordinates into a short place name, if the backend knows one
    fn reverse_geocode(&self, coords: Coordinates) -> impl Future<Output = Option<String>> + Send;
}

/// HTTP client for the backend API
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("placefinder/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.backend_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.backend_url().to_string(),
        })
    }

    /// Base URL all calls are made against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe the backend's health endpoint
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;

        if !response.status().is_success() {
            return Err(Error::BackendRequest(format!(
                "Backend health check returned status: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn try_reverse_geocode(&self, coords: Coordinates) -> Result<String> {
        let response = self
            .client
            .post(self.url(GEOCODE_PATH))
            .json(&coords)
            .send()
            .await
            .map_err(|e| Error::Geocode(format!("Geocode request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocode(format!(
                "Geocode returned status: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocode(format!("Failed to parse geocode response: {}", e)))?;

        body.city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| Error::Geocode("Geocode response had no city".to_string()))
    }
}

impl BackendApi for BackendClient {
    async fn submit_query(
        &self,
        query: &str,
        location: Option<Coordinates>,
    ) -> Result<QueryResponse> {
        let request = QueryRequest::new(query, location);
        info!(
            "Submitting query ({} location)",
            if location.is_some() { "with" } else { "without" }
        );

        let response = self
            .client
            .post(self.url(QUERY_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Query request failed: {}", e);
                Error::BackendRequest(format!("Could not reach the backend: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = error_message(&body);
            warn!("Backend returned {}: {}", status, message);
            return Err(Error::BackendRequest(message));
        }

        let payload: QueryResponse = response.json().await.map_err(|e| {
            warn!("Failed to decode query response: {}", e);
            Error::BackendRequest("Received an invalid response from the backend".to_string())
        })?;

        debug!("Query returned {} places", payload.places.len());
        Ok(payload)
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Option<String> {
        match self.try_reverse_geocode(coords).await {
            Ok(city) => Some(city),
            Err(e) => {
                debug!("Reverse geocode unavailable: {}", e);
                None
            }
        }
    }
}

/// Extract the user-facing message from a non-2xx response body
///
/// A string `detail` wins; JSON without one yields a query-failed message;
/// anything that isn't JSON yields the generic message.
pub fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(detail)),
        }) if !detail.trim().is_empty() => detail,
        Ok(_) => QUERY_FAILED.to_string(),
        Err(_) => GENERIC_ERROR.to_string(),
    }
}
