//! Server shared state
//!
//! Everything here is read-only for the lifetime of the process and shared by
//! all requests.

use crate::config::Config;
use crate::error::Result;
use crate::news::{source_from_config, NewsSource};
use crate::place::PlaceStore;
use std::sync::Arc;

/// Shared state for the HTTP server
pub struct AppState {
    /// Places database
    pub store: PlaceStore,

    /// Article lookup service
    pub news: Arc<dyn NewsSource>,

    /// Key embedded in the map page, if configured
    pub maps_api_key: Option<String>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: PlaceStore,
        news: Arc<dyn NewsSource>,
        maps_api_key: Option<String>,
    ) -> Self {
        Self {
            store,
            news,
            maps_api_key,
        }
    }

    /// Open the database and news source described by the config
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = PlaceStore::open(&config.database.path).await?;
        let news = source_from_config(&config.news)?;
        Ok(Self::new(store, news, config.maps_api_key()))
    }
}
