//! Centralized constants for the placefinder crate

/// Backend API paths, relative to the configured base URL
pub mod backend {
    pub const QUERY_PATH: &str = "/api/query";
    pub const GEOCODE_PATH: &str = "/api/geocode";
    pub const HEALTH_PATH: &str = "/health";

    /// Used when a non-2xx body is not JSON at all
    pub const GENERIC_ERROR: &str = "An error occurred";

    /// Used when a non-2xx body is JSON but carries no `detail`
    pub const QUERY_FAILED: &str = "Failed to process query";
}

/// Page controller messages
pub mod page {
    /// Error state left behind by a search that was dropped mid-flight
    pub const SEARCH_CANCELLED: &str = "Search was cancelled";
}

/// External API endpoints
pub mod api {
    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// Google Maps directions deep link
    pub const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";

    /// Google Maps Embed API, place mode
    pub const MAPS_EMBED_URL: &str = "https://www.google.com/maps/embed/v1/place";
}

/// Map embed settings
pub mod map {
    pub const EMBED_ZOOM: u8 = 14;
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}
