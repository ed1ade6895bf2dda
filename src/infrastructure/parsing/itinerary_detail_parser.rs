//! Itinerary detail parser
//!
//! Each date panel on a detail page holds one sailing: the date range, the
//! ship, and the price from the panel's price table.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::detail;
use super::{
    ContextualParser, DetailParseContext, ParsingResult, compile_selector, require_first,
    trimmed_text,
};
use crate::domain::{DateEntry, Itinerary};

/// Parser for itinerary detail pages
pub struct ItineraryDetailParser {
    date_panel: Selector,
    date_range: Selector,
    price_ship: Selector,
    ship_name: Selector,
    price: Selector,
}

impl ItineraryDetailParser {
    pub fn new() -> ParsingResult<Self> {
        Ok(Self {
            date_panel: compile_selector(detail::DATE_PANEL)?,
            date_range: compile_selector(detail::DATE_RANGE)?,
            price_ship: compile_selector(detail::PRICE_SHIP)?,
            ship_name: compile_selector(detail::SHIP_NAME)?,
            price: compile_selector(detail::PRICE)?,
        })
    }

    /// Parse a detail page and append its sailings to `itinerary.dates`
    ///
    /// Returns the number of entries appended. On error nothing is appended.
    pub fn parse_into(
        &self,
        html: &str,
        itinerary: &mut Itinerary,
        context: &DetailParseContext,
    ) -> ParsingResult<usize> {
        let document = Html::parse_document(html);
        let entries = self.parse_with_context(&document, context)?;
        let count = entries.len();
        itinerary.dates.extend(entries);
        Ok(count)
    }

    fn extract_entry(&self, panel: ElementRef<'_>, context: &str) -> ParsingResult<DateEntry> {
        let label = trimmed_text(require_first(panel, &self.date_range, detail::DATE_RANGE, context)?);

        let price_ship = require_first(panel, &self.price_ship, detail::PRICE_SHIP, context)?;
        let ship = trimmed_text(require_first(price_ship, &self.ship_name, detail::SHIP_NAME, context)?);
        let price = trimmed_text(require_first(price_ship, &self.price, detail::PRICE, context)?);

        Ok(DateEntry::new(label, ship, price))
    }
}

impl ContextualParser for ItineraryDetailParser {
    type Output = Vec<DateEntry>;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let entries = html
            .select(&self.date_panel)
            .enumerate()
            .map(|(index, panel)| {
                self.extract_entry(panel, &format!("date panel {index} of {}", context.url))
            })
            .collect::<ParsingResult<Vec<_>>>()?;

        debug!("Extracted {} sailings from {}", entries.len(), context.url);
        Ok(entries)
    }
}
