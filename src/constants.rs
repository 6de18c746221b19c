//! Centralized constants for the mashup crate
//!
//! Result limits and header values shared between the HTTP layer and the CLI.

/// Result size limits
pub mod limits {
    /// Maximum places returned by a free-text search
    pub const SEARCH_RESULTS: u32 = 10;

    /// Maximum places returned for a viewport
    pub const VIEWPORT_RESULTS: u32 = 10;

    /// Maximum articles returned for a place
    pub const ARTICLES: usize = 5;
}

/// Environment variables
pub mod env {
    /// Map widget API key, overrides `api_keys.maps`
    pub const API_KEY: &str = "API_KEY";
}

/// Values for the headers that disable client caching
pub mod headers {
    pub const CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";
    pub const PRAGMA: &str = "no-cache";
    pub const EXPIRES: &str = "0";
}

/// External API endpoints
pub mod api {
    /// Map widget script, the key is appended as a query parameter
    pub const MAPS_JS_URL: &str = "https://maps.googleapis.com/maps/api/js";
}
