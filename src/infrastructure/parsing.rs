//! HTML parsing infrastructure for the cruise operator's pages
//!
//! Two parsers share one trait: the listing parser builds cruises with itinerary
//! stubs, the detail parser produces the sailing dates of one itinerary.

pub mod config;
pub mod context;
pub mod cruise_list_parser;
pub mod error;
pub mod itinerary_detail_parser;

// Re-export public types
pub use context::{DetailParseContext, ListingParseContext};
pub use cruise_list_parser::CruiseListParser;
pub use error::{ParsingResult, StructuralParseError};
pub use itinerary_detail_parser::ItineraryDetailParser;

use scraper::{ElementRef, Html, Selector};

/// Parser over an already-built document with caller-supplied context
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}

/// Compile a selector, reporting the offending string on failure
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| StructuralParseError::invalid_selector(selector, &e.to_string()))
}

/// First match of `selector` under `scope`, or a structural error naming it
pub(crate) fn require_first<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    selector_name: &str,
    context: &str,
) -> ParsingResult<ElementRef<'a>> {
    scope
        .select(selector)
        .next()
        .ok_or_else(|| StructuralParseError::missing_element(selector_name, context))
}

/// All text under an element, trimmed
pub(crate) fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the child node at `index`, counting element and text nodes
///
/// `None` when there is no such node or it is not a text node.
pub(crate) fn child_node_text(element: ElementRef<'_>, index: usize) -> Option<String> {
    let node = element.children().nth(index)?;
    node.value().as_text().map(|text| text.trim().to_string())
}

/// Class attribute in document order, names joined by single spaces
pub(crate) fn joined_classes(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("class")
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
