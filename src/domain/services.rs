//! Service traits the application layer depends on

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

/// Page source for the scrape pipeline
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page body.
    ///
    /// `Ok(None)` means the server answered with something other than 200.
    /// `Err` is a transport failure (connect, timeout, body read).
    async fn fetch_page(&self, url: &str, timeout: Option<Duration>) -> Result<Option<String>>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_page(&self, url: &str, timeout: Option<Duration>) -> Result<Option<String>> {
        (**self).fetch_page(url, timeout).await
    }
}
