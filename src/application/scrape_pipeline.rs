//! Listing → detail scrape pipeline
//!
//! The listing page is fetched and parsed first. Every itinerary's detail page
//! is then requested at once and the responses are applied in the order they
//! complete. A detail page that cannot be fetched leaves its itinerary without
//! dates; a page whose markup does not match stops the run.

use std::collections::HashMap;

use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::domain::services::PageFetcher;
use crate::domain::Cruise;
use crate::infrastructure::config::ScraperConfig;
use crate::infrastructure::parsing::{
    CruiseListParser, DetailParseContext, ItineraryDetailParser, ListingParseContext,
    StructuralParseError,
};
use crate::infrastructure::simple_http_client::HttpClient;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Listing page {url} returned no content")]
    ListingUnavailable { url: String },

    #[error("Listing page {url} could not be fetched: {reason}")]
    ListingFetch { url: String, reason: String },

    #[error("Page structure mismatch: {0}")]
    Structural(#[from] StructuralParseError),

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client setup failed: {reason}")]
    HttpClient { reason: String },
}

/// How detail pages are fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// All detail requests in flight together
    #[default]
    Concurrent,
    /// One detail request at a time, in listing order
    Sequential,
}

/// Detail fetch counters of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub attempted: usize,
    pub with_content: usize,
    /// Answered with a status other than 200
    pub absent: usize,
    /// Transport errors and timeouts
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub cruises: Vec<Cruise>,
    pub summary: FetchSummary,
}

/// Cruise and itinerary index of one stub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItineraryPosition {
    cruise: usize,
    itinerary: usize,
}

/// Detail URLs in first-seen order, each mapped to the itinerary it fills
///
/// If two stubs share a URL the later one owns it.
#[derive(Debug, Default)]
struct DetailIndex {
    urls: Vec<String>,
    by_url: HashMap<String, ItineraryPosition>,
}

pub struct ScrapePipeline<F> {
    fetcher: F,
    config: ScraperConfig,
    base_url: Url,
    list_parser: CruiseListParser,
    detail_parser: ItineraryDetailParser,
}

impl ScrapePipeline<HttpClient> {
    /// Pipeline over a real HTTP client built from `config`
    pub fn from_config(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let client = HttpClient::from_scraper_config(&config).map_err(|e| ScrapeError::HttpClient {
            reason: format!("{e:#}"),
        })?;
        Self::new(client, config)
    }
}

impl<F: PageFetcher> ScrapePipeline<F> {
    pub fn new(fetcher: F, config: ScraperConfig) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ScrapeError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            fetcher,
            config,
            base_url,
            list_parser: CruiseListParser::new()?,
            detail_parser: ItineraryDetailParser::new()?,
        })
    }

    /// Fetch and parse detail pages for every itinerary on the listing page
    #[instrument(skip(self))]
    pub async fn run(&self, mode: FetchMode) -> Result<ScrapeOutcome, ScrapeError> {
        let mut cruises = self.fetch_listing().await?;
        let index = self.build_detail_index(&cruises)?;
        info!(
            "Listing has {} cruises, {} detail pages to fetch",
            cruises.len(),
            index.urls.len()
        );

        let summary = match mode {
            FetchMode::Concurrent => self.fetch_details_concurrent(&mut cruises, &index).await?,
            FetchMode::Sequential => self.fetch_details_sequential(&mut cruises, &index).await?,
        };

        info!(
            "Detail fetch finished: {} attempted, {} with content, {} absent, {} failed",
            summary.attempted, summary.with_content, summary.absent, summary.failed
        );
        Ok(ScrapeOutcome { cruises, summary })
    }

    /// Fetch the listing page and parse its cruises
    pub async fn fetch_listing(&self) -> Result<Vec<Cruise>, ScrapeError> {
        let url = self
            .config
            .listing_url()
            .map_err(|e| ScrapeError::InvalidUrl {
                url: self.config.listing_path.clone(),
                reason: e.to_string(),
            })?;

        let html = match self.fetcher.fetch_page(&url, self.config.listing_timeout()).await {
            Ok(Some(html)) => html,
            Ok(None) => return Err(ScrapeError::ListingUnavailable { url }),
            Err(e) => {
                return Err(ScrapeError::ListingFetch {
                    url,
                    reason: format!("{e:#}"),
                });
            }
        };

        let context = ListingParseContext::new(&url).with_cruise_limit(self.config.cruise_limit);
        Ok(self.list_parser.parse(&html, &context)?)
    }

    /// Absolute detail URL of an itinerary href
    pub fn detail_url(&self, href: &str) -> Result<String, ScrapeError> {
        self.base_url
            .join(href)
            .map(String::from)
            .map_err(|e| ScrapeError::InvalidUrl {
                url: href.to_string(),
                reason: e.to_string(),
            })
    }

    fn build_detail_index(&self, cruises: &[Cruise]) -> Result<DetailIndex, ScrapeError> {
        let mut index = DetailIndex::default();

        for (cruise_idx, cruise) in cruises.iter().enumerate() {
            for (itinerary_idx, itinerary) in cruise.itinerary.iter().enumerate() {
                let url = self.detail_url(&itinerary.href)?;
                let position = ItineraryPosition {
                    cruise: cruise_idx,
                    itinerary: itinerary_idx,
                };
                if index.by_url.insert(url.clone(), position).is_some() {
                    debug!("Detail URL {} shared by several itineraries; last one wins", url);
                } else {
                    index.urls.push(url);
                }
            }
        }

        Ok(index)
    }

    async fn fetch_details_concurrent(
        &self,
        cruises: &mut [Cruise],
        index: &DetailIndex,
    ) -> Result<FetchSummary, ScrapeError> {
        let timeout = Some(self.config.detail_timeout());
        let mut in_flight = index
            .urls
            .iter()
            .map(|url| async move { (url, self.fetcher.fetch_page(url, timeout).await) })
            .collect::<FuturesUnordered<_>>();

        let mut summary = FetchSummary::default();
        while let Some((url, result)) = in_flight.next().await {
            self.handle_detail_result(cruises, index, url, result, &mut summary)?;
        }
        Ok(summary)
    }

    async fn fetch_details_sequential(
        &self,
        cruises: &mut [Cruise],
        index: &DetailIndex,
    ) -> Result<FetchSummary, ScrapeError> {
        let timeout = Some(self.config.detail_timeout());
        let mut summary = FetchSummary::default();

        for url in &index.urls {
            let result = self.fetcher.fetch_page(url, timeout).await;
            self.handle_detail_result(cruises, index, url, result, &mut summary)?;
        }
        Ok(summary)
    }

    fn handle_detail_result(
        &self,
        cruises: &mut [Cruise],
        index: &DetailIndex,
        url: &str,
        result: anyhow::Result<Option<String>>,
        summary: &mut FetchSummary,
    ) -> Result<(), ScrapeError> {
        summary.attempted += 1;

        let html = match result {
            Ok(Some(html)) => html,
            Ok(None) => {
                summary.absent += 1;
                debug!("No content for {}", url);
                return Ok(());
            }
            Err(e) => {
                summary.failed += 1;
                warn!("Dropping detail page {}: {:#}", url, e);
                return Ok(());
            }
        };
        summary.with_content += 1;

        // Every fetched URL came from the index
        let Some(position) = index.by_url.get(url) else {
            return Ok(());
        };
        let itinerary = &mut cruises[position.cruise].itinerary[position.itinerary];
        let appended = self
            .detail_parser
            .parse_into(&html, itinerary, &DetailParseContext::new(url))?;
        debug!("Appended {} sailings to '{}'", appended, itinerary.name);
        Ok(())
    }
}

/// Run the pipeline against the live site
pub async fn scrape(config: &ScraperConfig, mode: FetchMode) -> Result<ScrapeOutcome, ScrapeError> {
    ScrapePipeline::from_config(config.clone())?.run(mode).await
}
