//! Parsing context for listing and detail extraction

use crate::infrastructure::config::defaults::CRUISE_LIMIT;

/// Context information for the listing page
#[derive(Debug, Clone)]
pub struct ListingParseContext {
    /// Page being parsed, for log and error messages
    pub page_url: String,

    /// Maximum number of cruise containers taken from the page
    pub cruise_limit: usize,
}

impl ListingParseContext {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            cruise_limit: CRUISE_LIMIT,
        }
    }

    /// Set the cruise cap
    pub fn with_cruise_limit(mut self, cruise_limit: usize) -> Self {
        self.cruise_limit = cruise_limit;
        self
    }
}

/// Detail parsing context for one itinerary page
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Absolute URL of the detail page
    pub url: String,
}

impl DetailParseContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
