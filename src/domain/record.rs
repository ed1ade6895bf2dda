//! Flattened output records consumed downstream

use serde::{Deserialize, Serialize};

/// One itinerary of one cruise, cleaned for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Cruise name
    pub name: String,
    pub days: u32,
    /// Route legs in travel order
    pub itinerary: Vec<String>,
    pub dates: Vec<NormalizedDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDate {
    /// Start of the date range only
    pub date: String,
    pub ship: String,
    /// Numeric tokens of the price text, unconverted ("1.769,00")
    pub price: Vec<String>,
}
