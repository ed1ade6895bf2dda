//! Shared fixtures for pipeline tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use cruise_scraper_lib::domain::PageFetcher;
use cruise_scraper_lib::infrastructure::config::{ScraperConfig, lueftner};

pub const BASE_URL: &str = "https://cruises.test";

pub fn listing_url() -> String {
    format!("{BASE_URL}{}", lueftner::LISTING_PATH)
}

pub fn detail_url(href: &str) -> String {
    format!("{BASE_URL}{href}")
}

pub fn test_config() -> ScraperConfig {
    ScraperConfig {
        base_url: BASE_URL.to_string(),
        ..ScraperConfig::default()
    }
}

#[derive(Debug, Clone)]
pub enum StubResponse {
    Page(String),
    /// Non-200 status
    Absent,
    /// Transport failure, e.g. a timeout
    Fail(String),
}

/// In-memory `PageFetcher` recording what was asked of it
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, StubResponse>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<(String, Option<Duration>)>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, response: StubResponse) -> Self {
        self.responses.insert(url.into(), response);
        self
    }

    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.with(url, StubResponse::Page(html.into()))
    }

    /// Every fetch sleeps this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, Option<Duration>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_page(&self, url: &str, timeout: Option<Duration>) -> anyhow::Result<Option<String>> {
        self.requests.lock().unwrap().push((url.to_string(), timeout));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.responses.get(url) {
            Some(StubResponse::Page(html)) => Ok(Some(html.clone())),
            Some(StubResponse::Fail(reason)) => Err(anyhow!("{reason}")),
            Some(StubResponse::Absent) | None => Ok(None),
        }
    }
}

pub struct Stub<'a> {
    pub route: &'a str,
    pub days: &'a str,
    pub href: &'a str,
}

pub fn itinerary_row(stub: &Stub<'_>) -> String {
    format!(
        r#"<div class="row item_new">
            <div class="col"><p class="cruise-route"><span class="label">Route</span> {}</p></div>
            <div class="col"><p class="cruise-duration"><span class="label">Duration</span> {}</p></div>
            <div class="col"><p class="cruise-button"><a class="btn" href="{}">More</a></p></div>
        </div>"#,
        stub.route, stub.days, stub.href
    )
}

pub fn cruise_box(name: &str, year: u32, stubs: &[Stub<'_>]) -> String {
    let rows: String = stubs.iter().map(itinerary_row).collect();
    format!(
        r#"<div class="travel-box-container">
            <h3 class="travel-box-heading"><span><a href="/en/cruise/{year}.html">{name}</a></span></h3>
            <div class="showYear{year} yearContainer">{rows}</div>
        </div>"#
    )
}

pub fn listing_page(boxes: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>River cruises</title></head><body><main>{}</main></body></html>",
        boxes.concat()
    )
}

pub fn date_panel(range: &str, ship: &str, price: &str) -> String {
    format!(
        r#"<div class="accordeon-panel accordeon-panel-default">
            <div class="accordeon-heading"><span class="price-duration">{range}</span></div>
            <div class="accordeon-body">
                <div class="price-ship">
                    <span class="table-ship-name">{ship}</span>
                    <span class="big-table-font">{price}</span>
                </div>
            </div>
        </div>"#
    )
}

pub fn detail_page(panels: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><body><section class=\"dates\">{}</section></body></html>",
        panels.concat()
    )
}
