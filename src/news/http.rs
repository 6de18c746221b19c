//! HTTP article lookup
//!
//! Queries a JSON service that answers `GET <url>` with an array of article
//! objects. URLs are templates with a `{geo}` placeholder.

use crate::error::{Error, Result};
use crate::news::{Article, NewsSource};
use futures::future::BoxFuture;
use tracing::debug;

const USER_AGENT: &str = concat!("mashup/", env!("CARGO_PKG_VERSION"));

/// Article lookup over HTTP
#[derive(Debug, Clone)]
pub struct HttpNewsSource {
    client: reqwest::Client,
    url: String,
    fallback_url: Option<String>,
}

impl HttpNewsSource {
    /// Create a source for the given URL templates
    ///
    /// `fallback_url` is queried only when `url` yields no articles.
    pub fn new(url: String, fallback_url: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            url,
            fallback_url,
        })
    }

    /// Fill the `{geo}` placeholder of a template
    pub fn lookup_url(template: &str, geo: &str) -> String {
        template.replace("{geo}", &urlencoding::encode(geo))
    }

    async fn fetch(&self, template: &str, geo: &str) -> Result<Vec<Article>> {
        let url = Self::lookup_url(template, geo);
        debug!("Fetching articles from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("News request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "News service returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse news response: {}", e)))
    }
}

impl NewsSource for HttpNewsSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn lookup<'a>(&'a self, geo: &'a str) -> BoxFuture<'a, Result<Vec<Article>>> {
        Box::pin(async move {
            let articles = self.fetch(&self.url, geo).await?;

            match &self.fallback_url {
                Some(fallback) if articles.is_empty() => self.fetch(fallback, geo).await,
                _ => Ok(articles),
            }
        })
    }
}
