//! Command-line arguments
//!
//! A bare invocation runs the concurrent scrape with built-in settings.

use std::path::PathBuf;

use clap::Parser;

use crate::application::FetchMode;

#[derive(Parser, Debug, Default)]
#[command(name = "cruise-scraper")]
#[command(version, about = "Scrape cruise itineraries and print them as JSON", long_about = None)]
pub struct Cli {
    /// Fetch detail pages one at a time instead of all at once
    #[arg(long)]
    pub sequential: bool,

    /// Print the scraped cruises as-is instead of normalized records
    #[arg(long)]
    pub raw: bool,

    /// Configuration file (toml, json, yaml, ...)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn fetch_mode(&self) -> FetchMode {
        if self.sequential {
            FetchMode::Sequential
        } else {
            FetchMode::Concurrent
        }
    }
}
