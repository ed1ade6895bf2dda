//! Flattening of scraped cruises into export records
//!
//! Prices stay as the numeric tokens found in the text ("1.769,00"); the site
//! mixes thousands and decimal separators, so nothing is converted here.
//! Only the start of a date range is kept.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::{Cruise, DateEntry, Itinerary, NormalizedDate, NormalizedRecord};

/// Separator between legs in route text ("Amsterdam \t→ Basel")
pub const ROUTE_SEPARATOR: char = '→';

/// Separator between start and end of a date range
pub const DATE_RANGE_SEPARATOR: char = '-';

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d.,]+").expect("numeric token pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("No day count in duration '{raw}' of '{itinerary}'")]
    MissingDays { itinerary: String, raw: String },

    #[error("Day count '{token}' in duration '{raw}' of '{itinerary}' is not a whole number")]
    InvalidDays {
        itinerary: String,
        raw: String,
        token: String,
    },
}

/// All runs of digits, dots and commas in `text`
pub fn numeric_tokens(text: &str) -> Vec<String> {
    NUMERIC_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Leading numeric token of a duration ("8 Days" -> 8)
pub fn parse_days(itinerary: &Itinerary) -> Result<u32, NormalizeError> {
    let token = NUMERIC_TOKEN
        .find(&itinerary.days)
        .ok_or_else(|| NormalizeError::MissingDays {
            itinerary: itinerary.name.clone(),
            raw: itinerary.days.clone(),
        })?
        .as_str();

    token.parse().map_err(|_| NormalizeError::InvalidDays {
        itinerary: itinerary.name.clone(),
        raw: itinerary.days.clone(),
        token: token.to_string(),
    })
}

/// Route legs, trimmed ("Amsterdam \t→ Basel" -> ["Amsterdam", "Basel"])
pub fn split_route(route: &str) -> Vec<String> {
    route
        .split(ROUTE_SEPARATOR)
        .map(|leg| leg.trim().to_string())
        .collect()
}

/// Start of a date range ("24. Oct 2019 - 31. Oct 2019" -> "24. Oct 2019")
pub fn start_date(label: &str) -> String {
    label
        .split(DATE_RANGE_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn normalize_date(entry: &DateEntry) -> NormalizedDate {
    NormalizedDate {
        date: start_date(&entry.label),
        ship: entry.sailing.ship.clone(),
        price: numeric_tokens(&entry.sailing.price),
    }
}

/// One record per itinerary, cruises and itineraries in input order
pub fn to_output_format(cruises: &[Cruise]) -> Result<Vec<NormalizedRecord>, NormalizeError> {
    let mut records = Vec::new();

    for cruise in cruises {
        for itinerary in &cruise.itinerary {
            records.push(NormalizedRecord {
                name: cruise.name.clone(),
                days: parse_days(itinerary)?,
                itinerary: split_route(&itinerary.name),
                dates: itinerary.dates.iter().map(normalize_date).collect(),
            });
        }
    }

    Ok(records)
}
