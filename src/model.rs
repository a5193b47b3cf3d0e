//! Wire types exchanged with the place-recommendation backend

use crate::geo::Coordinates;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Travel mode the backend can recommend for reaching a place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walk,
    Bike,
    Drive,
}

impl TransportMode {
    /// All modes in display order
    pub const ALL: [TransportMode; 3] = [Self::Walk, Self::Bike, Self::Drive];

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Walk => "🚶",
            Self::Bike => "🚴",
            Self::Drive => "🚗",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Walk => "Walking",
            Self::Bike => "Biking",
            Self::Drive => "Driving",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Walk => "walk",
            Self::Bike => "bike",
            Self::Drive => "drive",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walk" => Ok(Self::Walk),
            "bike" => Ok(Self::Bike),
            "drive" => Ok(Self::Drive),
            _ => Err(format!("Unknown transport mode: {}", s)),
        }
    }
}

/// Unknown modes are dropped rather than failing the whole response
fn lenient_transport<'de, D>(deserializer: D) -> Result<Option<TransportMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse() {
        Ok(mode) => Some(mode),
        Err(e) => {
            debug!("{}", e);
            None
        }
    }))
}

/// A single point-of-interest result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bike_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_transport",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_transport: Option<TransportMode>,
    pub maps_url: String,
}

impl Place {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Travel time text for a mode, if the backend computed one
    pub fn travel_time(&self, mode: TransportMode) -> Option<&str> {
        match mode {
            TransportMode::Walk => self.walk_time.as_deref(),
            TransportMode::Bike => self.bike_time.as_deref(),
            TransportMode::Drive => self.drive_time.as_deref(),
        }
    }
}

/// Successful `/api/query` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub ai_response: String,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_location: Option<Coordinates>,
}

/// `/api/query` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lng: Option<f64>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, location: Option<Coordinates>) -> Self {
        Self {
            query: query.into(),
            user_lat: location.map(|c| c.lat),
            user_lng: location.map(|c| c.lng),
        }
    }
}

/// `/api/geocode` response body
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub city: Option<String>,
}

/// Non-2xx response body
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

/// `/health` response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}
