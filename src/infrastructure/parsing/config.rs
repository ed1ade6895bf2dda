//! Selectors for the operator's listing and detail markup
//!
//! These are fixed to the site's structure and deliberately not part of the
//! runtime configuration.

/// Listing page (`/en/river-cruises/cruise.html`)
pub mod listing {
    pub const CRUISE_CONTAINER: &str = "div.travel-box-container";
    pub const HEADING: &str = "h3.travel-box-heading";
    pub const HEADING_SPAN: &str = "span";
    pub const HEADING_LINK: &str = "a";

    /// Candidates for year containers; hidden ones carry a `style` attribute
    pub const YEAR_CONTAINER: &str = "div[class]:not([style])";
    /// Matched against the whole class attribute
    pub const YEAR_CONTAINER_CLASS_PATTERN: &str = r"showYear\d{4} yearContainer";

    pub const ROW: &str = "div[class]";
    /// A row's class attribute must be exactly this
    pub const ROW_CLASS: &str = "row item_new";

    pub const ROUTE: &str = "p.cruise-route";
    pub const DURATION: &str = "p.cruise-duration";
    pub const DETAIL_LINK: &str = "p.cruise-button a";

    /// Route and duration text follow a label element inside their `<p>`
    pub const VALUE_NODE_INDEX: usize = 1;
}

/// Itinerary detail page
pub mod detail {
    pub const DATE_PANEL: &str = "div.accordeon-panel-default";
    pub const DATE_RANGE: &str = "span.price-duration";
    pub const PRICE_SHIP: &str = "div.price-ship";
    pub const SHIP_NAME: &str = "span.table-ship-name";
    pub const PRICE: &str = "span.big-table-font";
}
