//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/placefinder/config.toml
//!
//! Configuration is read once at startup. Environment variables override the
//! file for the backend URL and the map embed key, after which the resulting
//! `Config` is treated as immutable and shared behind an `Arc`.

pub mod defaults;

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Embedded map settings
    #[serde(default)]
    pub maps: MapsConfig,

    /// Web UI server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the place-recommendation backend
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

/// Embedded map settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Maps Embed API key. The map is omitted when this is empty.
    #[serde(default)]
    pub embed_api_key: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Where the device location comes from: "ip" or "none"
    #[serde(default = "default_location_source")]
    pub source: String,

    /// Fixed latitude, used together with `lng` instead of `source`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Fixed longitude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

// Default value functions for serde
fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}
fn default_backend_timeout() -> u64 {
    DEFAULT_BACKEND_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_location_source() -> String {
    DEFAULT_LOCATION_SOURCE.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            source: default_location_source(),
            lat: None,
            lng: None,
        }
    }
}

impl LocationConfig {
    /// Fixed coordinates, if both halves are configured
    pub fn fixed(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path and apply environment overrides
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    ///
    /// Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_blank(ENV_BACKEND_URL) {
            self.backend.url = url;
        }
        if let Some(key) = non_blank(ENV_MAPS_EMBED_API_KEY) {
            self.maps.embed_api_key = key;
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["backend", "url"] => Some(self.backend.url.clone()),
            ["backend", "timeout_secs"] => Some(self.backend.timeout_secs.to_string()),

            ["maps", "embed_api_key"] => Some(self.maps.embed_api_key.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["location", "source"] => Some(self.location.source.clone()),
            ["location", "lat"] => self.location.lat.map(|v| v.to_string()),
            ["location", "lng"] => self.location.lng.map(|v| v.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["backend", "url"] => {
                self.backend.url = value.to_string();
            }
            ["backend", "timeout_secs"] => {
                self.backend.timeout_secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        Error::Config(format!(
                            "Invalid timeout value: {} (expected whole seconds above 0)",
                            value
                        ))
                    })?;
            }

            ["maps", "embed_api_key"] => {
                self.maps.embed_api_key = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["location", "source"] => match value {
                "ip" | "none" => self.location.source = value.to_string(),
                _ => {
                    return Err(Error::Config(format!(
                        "Invalid location source: {} (expected ip or none)",
                        value
                    )))
                }
            },
            ["location", "lat"] => {
                self.location.lat = Some(parse_coordinate(value, -90.0, 90.0)?);
            }
            ["location", "lng"] => {
                self.location.lng = Some(parse_coordinate(value, -180.0, 180.0)?);
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "backend.url",
            "backend.timeout_secs",
            "maps.embed_api_key",
            "server.host",
            "server.port",
            "location.source",
            "location.lat",
            "location.lng",
        ]
    }

    /// Backend base URL without a trailing slash
    pub fn backend_url(&self) -> &str {
        self.backend.url.trim_end_matches('/')
    }

    /// Backend request timeout; a file value of 0 means no timeout
    pub fn backend_timeout(&self) -> Option<Duration> {
        (self.backend.timeout_secs > 0).then(|| Duration::from_secs(self.backend.timeout_secs))
    }

    /// The map embed key, if one is configured
    pub fn maps_key(&self) -> Option<&str> {
        let key = self.maps.embed_api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_coordinate(value: &str, min: f64, max: f64) -> Result<f64> {
    let parsed: f64 = value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid coordinate value: {}", value)))?;
    if !(min..=max).contains(&parsed) {
        return Err(Error::Config(format!(
            "Coordinate {} is out of range [{}, {}]",
            parsed, min, max
        )));
    }
    Ok(parsed)
}
