//! Raw cruise entities as scraped from the operator's pages
//!
//! These carry the site's text verbatim. Cleaning happens later in
//! `application::normalizer`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A cruise from the listing page with its itinerary stubs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cruise {
    pub name: String,
    pub itinerary: Vec<Itinerary>,
}

/// One route of a cruise, e.g. "Amsterdam \t→ Basel"
///
/// Built by the listing parser with empty `dates`; the detail parser only ever
/// appends to `dates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    /// Raw route text
    pub name: String,
    /// Raw duration text, e.g. "8 Days"
    pub days: String,
    /// Relative path of the detail page
    pub href: String,
    pub dates: Vec<DateEntry>,
}

impl Itinerary {
    pub fn new(name: impl Into<String>, days: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            days: days.into(),
            href: href.into(),
            dates: Vec::new(),
        }
    }
}

/// Ship and price of a single sailing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sailing {
    pub ship: String,
    /// Raw currency text, e.g. "€ 1.769,00"
    pub price: String,
}

/// A date-range label keyed to its sailing
///
/// Serializes as a one-entry map, `{"24. Oct 2019 - 31. Oct 2019": {"ship": .., "price": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateEntry {
    pub label: String,
    pub sailing: Sailing,
}

impl DateEntry {
    pub fn new(label: impl Into<String>, ship: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sailing: Sailing {
                ship: ship.into(),
                price: price.into(),
            },
        }
    }
}

impl Serialize for DateEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.label, &self.sailing)?;
        map.end()
    }
}
