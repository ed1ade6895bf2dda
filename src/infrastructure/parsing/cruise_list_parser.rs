//! Cruise listing parser
//!
//! Reads the operator's listing page into cruises and their itinerary stubs.
//! The page groups itineraries per year; only visible year containers count.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::listing;
use super::{
    ContextualParser, ListingParseContext, ParsingResult, StructuralParseError, child_node_text,
    compile_selector, joined_classes, require_first, trimmed_text,
};
use crate::domain::{Cruise, Itinerary};

/// Parser for the cruise listing page
pub struct CruiseListParser {
    cruise_container: Selector,
    heading: Selector,
    heading_span: Selector,
    heading_link: Selector,
    year_container: Selector,
    year_container_class: Regex,
    row: Selector,
    route: Selector,
    duration: Selector,
    detail_link: Selector,
}

impl CruiseListParser {
    pub fn new() -> ParsingResult<Self> {
        let year_container_class = Regex::new(listing::YEAR_CONTAINER_CLASS_PATTERN).map_err(|e| {
            StructuralParseError::invalid_selector(listing::YEAR_CONTAINER_CLASS_PATTERN, &e.to_string())
        })?;

        Ok(Self {
            cruise_container: compile_selector(listing::CRUISE_CONTAINER)?,
            heading: compile_selector(listing::HEADING)?,
            heading_span: compile_selector(listing::HEADING_SPAN)?,
            heading_link: compile_selector(listing::HEADING_LINK)?,
            year_container: compile_selector(listing::YEAR_CONTAINER)?,
            year_container_class,
            row: compile_selector(listing::ROW)?,
            route: compile_selector(listing::ROUTE)?,
            duration: compile_selector(listing::DURATION)?,
            detail_link: compile_selector(listing::DETAIL_LINK)?,
        })
    }

    /// Parse a listing page from its raw HTML
    pub fn parse(&self, html: &str, context: &ListingParseContext) -> ParsingResult<Vec<Cruise>> {
        let document = Html::parse_document(html);
        self.parse_with_context(&document, context)
    }

    fn extract_cruise(&self, container: ElementRef<'_>, index: usize) -> ParsingResult<Cruise> {
        let context = format!("cruise container {index}");

        let heading = require_first(container, &self.heading, listing::HEADING, &context)?;
        let span = require_first(heading, &self.heading_span, "h3.travel-box-heading span", &context)?;
        let link = require_first(span, &self.heading_link, "h3.travel-box-heading span a", &context)?;
        let name = trimmed_text(link);

        let mut itinerary = Vec::new();
        for year_container in container
            .select(&self.year_container)
            .filter(|el| self.year_container_class.is_match(&joined_classes(*el)))
        {
            for row in year_container
                .select(&self.row)
                .filter(|el| joined_classes(*el) == listing::ROW_CLASS)
            {
                let row_context = format!("{context}, itinerary row {}", itinerary.len());
                itinerary.push(self.extract_itinerary(row, &row_context)?);
            }
        }

        debug!("Cruise '{}' has {} itineraries", name, itinerary.len());
        Ok(Cruise { name, itinerary })
    }

    fn extract_itinerary(&self, row: ElementRef<'_>, context: &str) -> ParsingResult<Itinerary> {
        let route = require_first(row, &self.route, listing::ROUTE, context)?;
        let name = child_node_text(route, listing::VALUE_NODE_INDEX).ok_or_else(|| {
            StructuralParseError::missing_child_node(listing::ROUTE, listing::VALUE_NODE_INDEX, context)
        })?;

        let duration = require_first(row, &self.duration, listing::DURATION, context)?;
        let days = child_node_text(duration, listing::VALUE_NODE_INDEX).ok_or_else(|| {
            StructuralParseError::missing_child_node(listing::DURATION, listing::VALUE_NODE_INDEX, context)
        })?;

        let link = require_first(row, &self.detail_link, listing::DETAIL_LINK, context)?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| StructuralParseError::missing_attribute("href", listing::DETAIL_LINK))?;

        Ok(Itinerary::new(name, days, href))
    }
}

impl ContextualParser for CruiseListParser {
    type Output = Vec<Cruise>;
    type Context = ListingParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!(
            "Parsing cruise listing {} (limit {})",
            context.page_url, context.cruise_limit
        );

        let cruises = html
            .select(&self.cruise_container)
            .take(context.cruise_limit)
            .enumerate()
            .map(|(index, container)| self.extract_cruise(container, index))
            .collect::<ParsingResult<Vec<_>>>()?;

        debug!("Extracted {} cruises from {}", cruises.len(), context.page_url);
        Ok(cruises)
    }
}
