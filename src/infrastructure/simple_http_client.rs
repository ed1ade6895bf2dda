//! HTTP client for fetching the operator's pages
//!
//! One `reqwest::Client` is shared by every request of a run, so all detail
//! fetches go through the same connection pool. No retries: a page is either
//! there (status 200) or it is not.

use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::{debug, info, warn};

use crate::domain::services::PageFetcher;
use crate::infrastructure::config::ScraperConfig;

/// Configuration for HTTP client behavior
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
}

impl HttpClientConfig {
    pub fn from_scraper_config(scraper_config: &ScraperConfig) -> Self {
        Self {
            user_agent: scraper_config.user_agent.clone(),
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: crate::infrastructure::config::defaults::USER_AGENT.to_string(),
        }
    }
}

/// HTTP client with a fixed browser User-Agent
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client from the scraper settings
    pub fn from_scraper_config(scraper_config: &ScraperConfig) -> Result<Self> {
        Self::with_config(HttpClientConfig::from_scraper_config(scraper_config))
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(&config.user_agent)
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    /// GET `url`; the body when the status is 200, `None` for any other status
    pub async fn fetch_html_string(&self, url: &str, timeout: Option<Duration>) -> Result<Option<String>> {
        info!("🌐 HTTP GET: {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed for {}: {}", url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("❌ HTTP {} for {}", status, url);
            return Ok(None);
        }

        let html_content = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body from {}: {}", url, e))?;

        debug!("Fetched {} bytes from {}", html_content.len(), url);
        Ok(Some(html_content))
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &str, timeout: Option<Duration>) -> Result<Option<String>> {
        self.fetch_html_string(url, timeout).await
    }
}
