//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default backend base URL
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default backend request timeout in seconds
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Default location source
pub const DEFAULT_LOCATION_SOURCE: &str = "ip";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable overriding `backend.url`
pub const ENV_BACKEND_URL: &str = "PLACEFINDER_API_URL";

/// Environment variable overriding `maps.embed_api_key`
pub const ENV_MAPS_EMBED_API_KEY: &str = "PLACEFINDER_MAPS_EMBED_API_KEY";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "placefinder";
