//! Application layer module
//!
//! The scrape pipeline orchestrates fetching and parsing; the normalizer turns
//! its result into export records.

pub mod normalizer;
pub mod scrape_pipeline;

pub use normalizer::{NormalizeError, to_output_format};
pub use scrape_pipeline::{
    FetchMode, FetchSummary, ScrapeError, ScrapeOutcome, ScrapePipeline, scrape,
};
