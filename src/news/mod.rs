//! Local news lookup
//!
//! Articles come from an external service and are passed through untouched;
//! only the first few are kept.

pub mod fixed;
pub mod http;

use crate::config::NewsConfig;
use crate::constants::limits::ARTICLES;
use crate::error::{Error, Result};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// An article record as the upstream service returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(pub serde_json::Map<String, serde_json::Value>);

/// A service that finds articles about a place
pub trait NewsSource: Send + Sync {
    /// Short name for logs and status output
    fn name(&self) -> &'static str;

    /// All articles the service has for `geo`, in its order
    fn lookup<'a>(&'a self, geo: &'a str) -> BoxFuture<'a, Result<Vec<Article>>>;
}

/// Source used when no lookup URL is configured; every lookup fails
#[derive(Debug, Default)]
pub struct UnconfiguredNewsSource;

impl NewsSource for UnconfiguredNewsSource {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    fn lookup<'a>(&'a self, _geo: &'a str) -> BoxFuture<'a, Result<Vec<Article>>> {
        Box::pin(async {
            Err(Error::UnconfiguredServer(
                "news.url is not set".to_string(),
            ))
        })
    }
}

/// Build the source described by the config
pub fn source_from_config(config: &NewsConfig) -> Result<Arc<dyn NewsSource>> {
    if config.url.is_empty() {
        return Ok(Arc::new(UnconfiguredNewsSource));
    }

    let fallback = (!config.fallback_url.is_empty()).then(|| config.fallback_url.clone());
    Ok(Arc::new(http::HttpNewsSource::new(config.url.clone(), fallback)?))
}

/// The first five articles about `geo`
pub async fn lookup_articles(source: &dyn NewsSource, geo: &str) -> Result<Vec<Article>> {
    let mut articles = source.lookup(geo).await?;
    debug!(
        "{} returned {} articles for {:?}",
        source.name(),
        articles.len(),
        geo
    );
    articles.truncate(ARTICLES);
    Ok(articles)
}
