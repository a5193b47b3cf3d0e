//! Error types for placefinder

use thiserror::Error;

/// Main error type for placefinder operations
#[derive(Error, Debug)]
pub enum Error {
    /// The backend rejected or failed a query. Carries the user-facing message.
    #[error("{0}")]
    BackendRequest(String),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Geocoding error: {0}")]
    Geocode(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for placefinder operations
pub type Result<T> = std::result::Result<T, Error>;
